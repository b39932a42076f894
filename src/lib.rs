#![doc(test(attr(deny(warnings))))]

//! SpendWise Core tracks day-to-day spending on a single device: transactions,
//! categories, rollups, a draft/commit settings editor and a local profile.
//!
//! The [`core::SpendWise`] controller owns all in-memory state and mirrors each
//! mutation into a [`storage::KeyValueStore`].

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::SpendWise;
pub use errors::{Result, SpendError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(None);
        tracing::info!("SpendWise tracing initialized.");
    });
}

/// Same as [`init`], with an extra `EnvFilter` directive from configuration.
pub fn init_with_filter(directive: Option<&str>) {
    INIT_TRACING.call_once(|| {
        utils::init_tracing(directive);
        tracing::info!("SpendWise tracing initialized.");
    });
}
