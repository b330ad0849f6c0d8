//! Shared helpers for plsync-core integration tests.

#![allow(dead_code)]

pub mod fake_backend;

use std::fs;
use std::path::Path;

/// Sorted file names in `dir`.
pub fn list_files(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}
