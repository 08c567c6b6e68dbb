use std::path::PathBuf;

use thiserror::Error;

use crate::storage::codec::Record;

pub mod codec;
pub mod flat_file;
pub mod store;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to initialize data file '{path}': {source}")]
    InitFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to load records from '{path}': {source}")]
    LoadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save records to '{path}': {source}")]
    SaveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {kind} with id {id}")]
    NotFound { kind: &'static str, id: u64 },

    #[error("Failed to back up '{path}': {source}")]
    BackupFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No {kind} ids left to allocate")]
    IdsExhausted { kind: &'static str },

    #[error("No backups found in '{dir}'")]
    NoBackups { dir: PathBuf },
}

/// CRUD over one collection of records plus its id allocator.
///
/// Every call is synchronous and leaves the collection exactly as it was when it
/// fails. There is no locking: one process, one user, sequential access.
pub trait Storage<T: Record> {
    /// Appends one record. Advances the id watermark past `record.id()`.
    fn create(&mut self, record: &T) -> Result<(), StorageError>;

    /// Reads every record in file order. A missing file is an empty collection.
    fn load_all(&mut self) -> Result<Vec<T>, StorageError>;

    /// Replaces the first record with the same id and rewrites the collection.
    /// An unknown id rewrites the collection unchanged and still succeeds.
    fn update(&mut self, record: &T) -> Result<(), StorageError>;

    /// Removes the record with `id`, or fails with `NotFound` without touching the file.
    fn delete(&mut self, id: u64) -> Result<(), StorageError>;

    /// Hands out the next id. Never returns the same value twice, and fails with
    /// `IdsExhausted` once the largest id has been seen.
    fn next_id(&mut self) -> Result<u64, StorageError>;
}
