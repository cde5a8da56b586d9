#![forbid(unsafe_code)]

pub mod audio_cache;
pub mod builtin;
pub mod repository;

pub use audio_cache::AudioCache;
pub use builtin::builtin_catalog;
pub use repository::{
    CatalogRepository, InMemoryRepository, ProgressRepository, ProgressUpdate, Storage,
    StorageError,
};
