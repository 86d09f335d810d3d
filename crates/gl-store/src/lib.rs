//! Glossa storage layer: dictionary side-files, document files and batches.

pub mod batch;
pub mod bundle;
pub mod error;
pub mod store;

pub use batch::{compress_files, decompress_files, BatchOutcome};
pub use bundle::{BundleStats, ClassStats, DictionaryBundle};
pub use error::{Result, StoreError};
pub use store::DocumentStore;

#[cfg(test)]
mod tests;
