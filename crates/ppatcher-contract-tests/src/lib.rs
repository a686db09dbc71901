//! Helpers for loading frozen contract schemas and fixtures.

use std::path::PathBuf;

use serde_json::Value;

/// Root of the `contracts/` directory.
pub fn contracts_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/../../contracts"))
}

/// Reads a contract file relative to [`contracts_dir`].
///
/// # Panics
/// Panics when the file is missing, since contract files are part of the
/// repository.
pub fn read_contract(relative: &str) -> String {
    let path = contracts_dir().join(relative);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|error| panic!("contract file {} unreadable: {error}", path.display()))
}

/// Reads and decodes a JSON contract file.
///
/// # Panics
/// Panics when the file is missing or is not valid JSON.
pub fn load_json(relative: &str) -> Value {
    serde_json::from_str(&read_contract(relative))
        .unwrap_or_else(|error| panic!("contract file {relative} is not json: {error}"))
}
