//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keyboard codes and touch buttons to per-tick intent)
//! - Storage (LocalStorage on web, in-memory elsewhere)

pub mod input;
pub mod storage;

pub use input::{Action, Controls, TouchButton};
pub use storage::{KeyValueStore, MemoryStore};

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;
