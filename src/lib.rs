#![doc(test(attr(deny(warnings))))]

//! Shopfront Core offers the inventory, sales, user, and reporting
//! primitives that power the point-of-sale desktop shell and CLI.

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod reporting;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Shopfront Core tracing initialized.");
    });
}
