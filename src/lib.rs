//! Mandarin 10 (workspace facade crate).
//!
//! The game logic lives in dedicated crates under `crates/`; this package
//! re-exports them under one name and adds the pieces the terminal binary
//! needs: configuration, logging, sharing and the `App` glue.

pub use mandarin_core as core;
pub use mandarin_input as input;
pub use mandarin_service as service;
pub use mandarin_store as store;
pub use mandarin_term as term;
pub use mandarin_types as types;

pub mod app;
pub mod config;
pub mod logging;
pub mod share;
