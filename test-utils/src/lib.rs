//! Test helpers shared by the workspace crates: recorded accelerometer data, a
//! drawing surface that records every call, and a gnuplot backed surface for the
//! examples.

pub mod csv_loader;
pub mod surfaces;

use std::path::PathBuf;

/// Absolute path of a file stored in `test-utils/test_data`
pub fn test_data_path(file_name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_data")
        .join(file_name)
}
