#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::{Arc, Mutex},
};

use bakery_core::BakeryBooks;
use bakery_storage_json::JsonFileStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated application home directory for one test.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Directory the shell uses for saved ledgers under `home` with the default config.
pub fn books_dir(home: &Path) -> PathBuf {
    home.join("books")
}

/// Opens the books saved under `dir`, as a fresh session would.
pub fn open_books(dir: &Path) -> BakeryBooks {
    let store = JsonFileStore::new(dir.to_path_buf()).expect("create json store");
    BakeryBooks::open(Arc::new(store))
}
