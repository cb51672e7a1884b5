//! iconsextract End-to-End Test Infrastructure
//!
//! This crate drives whole runs through [`iconsextract_cli::commands::run::execute`]
//! with fake tools standing in for FileTypesMan and IconsExtract, so every
//! flow can be exercised on any host.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p iconsextract-tests
//! ```
//!
//! ## Writing a Test
//!
//! ```rust,ignore
//! use iconsextract_tests::{FakeExtractor, FakeFileTypes, TestHarness};
//!
//! let harness = TestHarness::new();
//! let types = FakeFileTypes::new(&[("bar", "shell32.dll,2")]);
//! let extractor = FakeExtractor::new().with_container("shell32.dll", &["shell32_3.ico"]);
//! let report = harness.execute(&types, &extractor).unwrap();
//! assert!(harness.output_icon("bar").exists());
//! ```

pub mod fakes;
pub mod harness;

pub use fakes::{FakeExtractor, FakeFileTypes};
pub use harness::TestHarness;
