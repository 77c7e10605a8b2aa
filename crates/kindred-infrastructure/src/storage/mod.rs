//! File storage with atomic writes.

mod atomic_file;
mod config_storage;
mod secret_storage;

pub(crate) use atomic_file::{write_atomic, write_new};
pub use atomic_file::{AtomicFileError, FileLock};
pub use config_storage::{ConfigStorage, ConfigStorageError};
pub use secret_storage::{SecretStorage, SecretStorageError};
