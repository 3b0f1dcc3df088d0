#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{ClientStorage, InMemoryRepository, Storage, StorageError};
