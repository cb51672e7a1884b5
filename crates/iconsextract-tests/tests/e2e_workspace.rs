//! Workspace lifecycle and run preconditions.

use std::fs;

use iconsextract_cli::PreconditionError;
use iconsextract_spec::ToolFailure;
use iconsextract_tests::{FakeExtractor, FakeFileTypes, TestHarness};
use pretty_assertions::assert_eq;

#[test]
fn test_workspace_removed_after_run() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::new(&[("bar", "shell32.dll,0")]);
    let extractor = FakeExtractor::new().with_container("shell32.dll", &["shell32_1.ico"]);

    harness.execute(&types, &extractor).unwrap();

    assert_eq!(types.dump_paths(), vec![harness.temp_root().join("list.txt")]);
    assert!(!harness.temp_root().exists());
}

#[test]
fn test_workspace_removed_after_enumerator_failure() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::failing(3);

    let err = harness.execute(&types, &FakeExtractor::new()).unwrap_err();

    assert!(!harness.temp_root().exists());
    assert!(err.to_string().contains("Failed to enumerate"));
}

#[test]
fn test_enumerator_exit_code_is_kept() {
    let harness = TestHarness::new();
    let types = FakeFileTypes::failing(7);

    let err = harness.execute(&types, &FakeExtractor::new()).unwrap_err();

    let failure = err.downcast_ref::<ToolFailure>().unwrap();
    assert_eq!(failure.exit_code, Some(7));
}

#[test]
fn test_stale_workspace_is_replaced() {
    let harness = TestHarness::new();
    let stale = harness.temp_root().join("containers").join("shell32.dll");
    fs::create_dir_all(&stale).unwrap();
    fs::write(stale.join("stale_1.ico"), b"stale").unwrap();

    let types = FakeFileTypes::new(&[("bar", "shell32.dll,0")]);
    let extractor = FakeExtractor::new().with_container("shell32.dll", &["fresh_1.ico"]);

    harness.execute(&types, &extractor).unwrap();

    assert_eq!(extractor.call_count("shell32.dll"), 1);
    assert_eq!(harness.read_output("bar"), "fresh_1.ico");
}

#[test]
fn test_populated_output_dir_aborts_before_enumeration() {
    let harness = TestHarness::new();
    fs::create_dir_all(harness.output_dir()).unwrap();
    fs::write(harness.output_icon("old"), b"old").unwrap();
    let types = FakeFileTypes::new(&[("bar", "shell32.dll,0")]);

    let err = harness.execute(&types, &FakeExtractor::new()).unwrap_err();

    assert!(matches!(
        err.downcast_ref::<PreconditionError>(),
        Some(PreconditionError::OutputNotEmpty { .. })
    ));
    assert!(types.dump_paths().is_empty());
    assert_eq!(harness.output_files(), vec!["old.ico"]);
    assert!(!harness.temp_root().exists());
}

#[test]
fn test_empty_output_dir_is_accepted() {
    let harness = TestHarness::new();
    fs::create_dir_all(harness.output_dir()).unwrap();
    let source = harness.write_ico("y.ico", b"y");
    let raw = source.display().to_string();
    let types = FakeFileTypes::new(&[("foo", raw.as_str())]);

    harness.execute(&types, &FakeExtractor::new()).unwrap();

    assert_eq!(harness.output_files(), vec!["foo.ico"]);
}
