mod data_file;
mod storage;

pub use data_file::{DataFile, FileMode};
pub use storage::{DiskStorage, FileContents, MemoryStorage, Storage, StoredObject};
