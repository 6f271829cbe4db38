//! Blockfall (workspace facade crate).
//!
//! Re-exports the member crates under one name: `blockfall::{core,engine,types}`.
//! The implementation lives in dedicated crates under `crates/`.

pub use blockfall_core as core;
pub use blockfall_engine as engine;
pub use blockfall_types as types;
