//! Repository layer — table-scoped database operations.

mod local_storage;

pub use local_storage::*;
