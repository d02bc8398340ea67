//! Test Suite for labgrid
//!
//! Synthetic report generators and output validators used to exercise the
//! parser end to end, plus the property tests and benchmarks built on them.

pub mod generators;
pub mod validators;

pub use generators::report_builder::{CategorySpec, ReportBuilder};
pub use validators::output_validator::{OutputValidator, ValidationReport};

/// Common test utilities
pub mod utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    /// Get the path to the test fixtures directory
    pub fn fixtures_dir() -> PathBuf {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        PathBuf::from(manifest_dir).join("fixtures")
    }

    /// Create a temporary directory for test outputs
    pub fn create_test_output_dir() -> anyhow::Result<tempfile::TempDir> {
        Ok(tempfile::tempdir()?)
    }

    /// Write `contents` to `dir/name`, returning the full path
    pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> anyhow::Result<PathBuf> {
        let path = dir.join(name);
        fs::write(&path, contents)?;
        Ok(path)
    }
}
