//! Version string for the frest binary.

/// The current version of frest, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Line printed by `--version`.
pub fn version_line() -> String {
    format!("frest {}", VERSION)
}
