//! Parallel batch compression. Each document gets its own codec, so one bad
//! document never affects the others.

use crate::bundle::BundleStats;
use crate::error::StoreError;
use crate::store::DocumentStore;
use gl_core::CodecConfig;
use rayon::prelude::*;
use std::path::PathBuf;
use tracing::{info, warn};

/// Outcome of one document in a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    pub source: PathBuf,
    pub target: PathBuf,
    pub result: Result<BundleStats, StoreError>,
}

impl BatchOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Name of the compressed file for `source`.
pub fn compressed_name(source: &std::path::Path, extension: &str) -> PathBuf {
    let mut name = source.as_os_str().to_os_string();
    name.push(".");
    name.push(extension);
    PathBuf::from(name)
}

/// Compress every `(source, target)` pair in parallel. Results keep the
/// input order.
pub fn compress_files(
    store: &DocumentStore,
    jobs: &[(PathBuf, PathBuf)],
    config: &CodecConfig,
) -> Vec<BatchOutcome> {
    let outcomes: Vec<BatchOutcome> = jobs
        .par_iter()
        .map(|(source, target)| {
            let result = store
                .compress_file(source, target, config)
                .map(|bundle| bundle.stats);
            if let Err(e) = &result {
                warn!(source = %source.display(), error = %e, "document failed");
            }
            BatchOutcome {
                source: source.clone(),
                target: target.clone(),
                result,
            }
        })
        .collect();

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    info!(documents = outcomes.len(), failed, "batch complete");
    outcomes
}

/// Restore every compressed file in parallel.
pub fn decompress_files(store: &DocumentStore, jobs: &[(PathBuf, PathBuf)]) -> Vec<(PathBuf, Result<(), StoreError>)> {
    jobs.par_iter()
        .map(|(source, target)| (source.clone(), store.decompress_file(source, target)))
        .collect()
}
