//! End-to-end runs covering every record outcome.

use iconsextract_cli::RecordOutcome;
use iconsextract_tests::{FakeExtractor, FakeFileTypes, TestHarness};
use pretty_assertions::assert_eq;

#[test]
fn test_direct_ico_is_copied_and_index_ignored() {
    let harness = TestHarness::new();
    let source = harness.write_ico("y.ico", b"standalone icon");
    let raw = format!("{},3", source.display());
    let types = FakeFileTypes::new(&[("foo", raw.as_str())]);
    let extractor = FakeExtractor::new();

    let report = harness.execute(&types, &extractor).unwrap();

    assert_eq!(harness.read_output("foo"), "standalone icon");
    assert!(extractor.calls().is_empty());
    assert!(matches!(
        report.outcome_for("foo"),
        Some(RecordOutcome::Copied { .. })
    ));
}

#[test]
fn test_quoted_direct_ico_is_copied() {
    let harness = TestHarness::new();
    let source = harness.write_ico("quoted.ico", b"quoted");
    let raw = format!("\"{}\"", source.display());
    let types = FakeFileTypes::new(&[("q", raw.as_str())]);

    harness.execute(&types, &FakeExtractor::new()).unwrap();

    assert_eq!(harness.read_output("q"), "quoted");
}

#[test]
fn test_short_spec_is_skipped() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::new(&[("qux", "%1"), ("nil", "")]);
    let extractor = FakeExtractor::new();

    let report = harness.execute(&types, &extractor).unwrap();

    assert!(harness.output_files().is_empty());
    assert!(extractor.calls().is_empty());
    assert!(matches!(
        report.outcome_for("qux"),
        Some(RecordOutcome::Skipped { .. })
    ));
    assert_eq!(report.counts().skipped, 2);
}

#[test]
fn test_invalid_index_is_skipped() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::new(&[("bad", "shell32.dll,abc")]);
    let extractor = FakeExtractor::new().with_container("shell32.dll", &["shell32_1.ico"]);

    let report = harness.execute(&types, &extractor).unwrap();

    assert!(harness.output_files().is_empty());
    assert!(matches!(
        report.outcome_for("bad"),
        Some(RecordOutcome::Skipped { .. })
    ));
}

#[test]
fn test_empty_extraction_continues_run() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::new(&[("zap", "empty.dll,0"), ("bar", "shell32.dll,2")]);
    let extractor = FakeExtractor::new()
        .with_container("empty.dll", &[])
        .with_container("shell32.dll", &["shell32_3.ico"]);

    let report = harness.execute(&types, &extractor).unwrap();

    assert_eq!(harness.output_files(), vec!["bar.ico"]);
    assert_eq!(
        report.outcome_for("zap"),
        Some(&RecordOutcome::NoIcon {
            container: "empty.dll".to_string()
        })
    );
}

#[test]
fn test_missing_ico_fails_only_that_record() {
    let harness = TestHarness::new();
    let missing = harness.path().join("nowhere").join("gone.ico");
    let raw = missing.display().to_string();
    let source = harness.write_ico("ok.ico", b"fine");
    let ok_raw = source.display().to_string();
    let types = FakeFileTypes::new(&[("gone", raw.as_str()), ("ok", ok_raw.as_str())]);

    let report = harness.execute(&types, &FakeExtractor::new()).unwrap();

    assert!(matches!(
        report.outcome_for("gone"),
        Some(RecordOutcome::Failed { .. })
    ));
    assert_eq!(harness.output_files(), vec!["ok.ico"]);
    assert_eq!(report.counts().failed, 1);
}

#[test]
fn test_later_record_overwrites_same_extension() {
    let harness = TestHarness::new();
    let first = harness.write_ico("first.ico", b"first");
    let second = harness.write_ico("second.ico", b"second");
    let first_raw = first.display().to_string();
    let second_raw = second.display().to_string();
    let types = FakeFileTypes::new(&[("txt", first_raw.as_str()), ("TXT", second_raw.as_str())]);

    let report = harness.execute(&types, &FakeExtractor::new()).unwrap();

    assert_eq!(harness.output_files(), vec!["txt.ico"]);
    assert_eq!(harness.read_output("txt"), "second");
    match report.outcome_for("txt") {
        Some(RecordOutcome::Copied { source, .. }) => assert_eq!(source, &second),
        other => panic!("unexpected outcome: {:?}", other),
    }
}

#[test]
fn test_json_report_lists_every_record() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::new(&[("bar", "shell32.dll,2"), ("qux", "%1")]);
    let extractor = FakeExtractor::new().with_container("shell32.dll", &["shell32_3.ico"]);

    let report = harness.execute(&types, &extractor).unwrap();
    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["counts"]["records"], 2);
    assert_eq!(json["counts"]["extracted"], 1);
    assert_eq!(json["counts"]["skipped"], 1);
    assert_eq!(json["entries"][0]["extension"], "bar");
    assert_eq!(json["entries"][0]["status"], "extracted");
    assert_eq!(json["entries"][0]["container"], "shell32.dll");
    assert_eq!(json["entries"][1]["status"], "skipped");
}
