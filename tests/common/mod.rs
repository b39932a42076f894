#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use spendwise_core::{
    config::Config,
    core::{FixedClock, RandomIds, SpendWise},
    storage::JsonFileStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh data directory that outlives the test body.
pub fn temp_data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// 1 July 2024, 10:00 local.
pub fn morning() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 7, 1)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// Opens the controller over a file store in `dir` with a shared fixed clock.
pub fn open_app(dir: &PathBuf, clock: &FixedClock) -> SpendWise {
    let store = JsonFileStore::at(dir.join("records")).expect("create json store");
    SpendWise::open_with(
        Box::new(store),
        Box::new(clock.clone()),
        Box::new(RandomIds),
        &Config::default(),
    )
    .expect("hydrate app")
}

/// Isolated controller plus its data directory and clock.
pub fn setup_test_env() -> (SpendWise, PathBuf, FixedClock) {
    let dir = temp_data_dir();
    let clock = FixedClock::new(morning());
    let app = open_app(&dir, &clock);
    (app, dir, clock)
}
