//! Settings persistence
//!
//! Features:
//! - Plain string keys with integer/boolean values
//! - JSON file backing on native, in-memory store for tests
//! - Unreadable files fall back to an empty store

pub mod store;

pub use store::{JsonFileStore, KeyValueStore, MemoryStore, PersistenceError};
