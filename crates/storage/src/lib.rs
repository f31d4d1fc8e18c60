#![forbid(unsafe_code)]

pub mod parse;
pub mod repository;

pub use parse::WordList;
pub use repository::{DirectoryRepository, InMemoryRepository, StorageError, WordListRepository};
