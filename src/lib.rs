//! Veggie Saga (workspace facade crate).
//!
//! Re-exports the rules engine crates under `veggie_saga::{types, core, engine}`
//! and hosts the headless line-protocol driver used by the binary.

pub use veggie_saga_core as core;
pub use veggie_saga_engine as engine;
pub use veggie_saga_types as types;

pub mod driver;
pub mod logger;
