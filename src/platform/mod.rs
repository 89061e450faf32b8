//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input events (keys, touch and mouse map to one jump button)
//! - Storage (LocalStorage on web, in-memory on native)

pub mod input;
pub mod storage;

pub use input::{JumpSignal, key_signal};
pub use storage::StorageError;
