//! DocumentStore: compressed documents and their dictionary side-files under
//! one root directory.

use crate::bundle::{BundleStats, DictionaryBundle};
use crate::error::{Result, StoreError};
use gl_codec::{DictionaryCodec, DictionarySet};
use gl_core::CodecConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Suffix appended to a compressed file's name for its side-file.
pub const SIDE_FILE_SUFFIX: &str = ".dict.json";

/// Suffix of the human-readable `code = pattern` listing.
pub const LISTING_SUFFIX: &str = ".dict.md";

pub struct DocumentStore {
    root: PathBuf,
}

impl DocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    // ========== Paths ==========

    /// Resolve a document name relative to the root. Absolute paths pass
    /// through.
    pub fn path(&self, name: impl AsRef<Path>) -> PathBuf {
        let name = name.as_ref();
        if name.is_absolute() {
            name.to_path_buf()
        } else {
            self.root.join(name)
        }
    }

    pub fn side_file_path(&self, name: impl AsRef<Path>) -> PathBuf {
        with_suffix(&self.path(name), SIDE_FILE_SUFFIX)
    }

    pub fn listing_path(&self, name: impl AsRef<Path>) -> PathBuf {
        with_suffix(&self.path(name), LISTING_SUFFIX)
    }

    // ========== File Operations ==========

    pub fn read_string(&self, name: impl AsRef<Path>) -> Result<String> {
        let path = self.path(name);
        fs::read_to_string(&path).map_err(|e| StoreError::read(&path, e))
    }

    /// Write a file, creating parent directories.
    pub fn write_string(&self, name: impl AsRef<Path>, content: &str) -> Result<()> {
        write_file(&self.path(name), content)
    }

    pub fn exists(&self, name: impl AsRef<Path>) -> bool {
        self.path(name).exists()
    }

    // ========== Side-files ==========

    pub fn save_bundle(&self, name: impl AsRef<Path>, bundle: &DictionaryBundle) -> Result<()> {
        let path = self.side_file_path(name);
        let json = serde_json::to_string_pretty(bundle)?;
        write_file(&path, &json)?;
        debug!(path = %path.display(), entries = bundle.dictionaries.total_entries(), "side-file saved");
        Ok(())
    }

    pub fn load_bundle(&self, name: impl AsRef<Path>) -> Result<DictionaryBundle> {
        let path = self.side_file_path(name);
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::read(&path, e))?;
        serde_json::from_str(&raw).map_err(|e| StoreError::CorruptSideFile {
            path,
            reason: e.to_string(),
        })
    }

    pub fn write_listing(&self, name: impl AsRef<Path>, dictionaries: &DictionarySet) -> Result<()> {
        write_file(&self.listing_path(name), &dictionaries.to_listing())
    }

    pub fn read_listing(&self, name: impl AsRef<Path>, config: &CodecConfig) -> Result<DictionarySet> {
        let path = self.listing_path(name);
        let raw = fs::read_to_string(&path).map_err(|e| StoreError::read(&path, e))?;
        Ok(DictionarySet::from_listing(&raw, config)?)
    }

    // ========== Documents ==========

    /// Build dictionaries for `source`, write the compressed text to `target`
    /// and the side-file next to it.
    pub fn compress_file(
        &self,
        source: impl AsRef<Path>,
        target: impl AsRef<Path>,
        config: &CodecConfig,
    ) -> Result<DictionaryBundle> {
        let source = source.as_ref();
        let text = self.read_string(source)?;
        let mut codec = DictionaryCodec::new(config.clone())?;
        let result = codec.compress_document(&text)?;

        let stats = BundleStats::from_result(&result, codec.allocation_reports());
        let bundle = DictionaryBundle::new(config.clone(), result.dictionaries, stats)
            .with_source(source.to_string_lossy());
        self.write_string(&target, &result.output)?;
        self.save_bundle(&target, &bundle)?;

        info!(
            source = %source.display(),
            target = %target.as_ref().display(),
            original = bundle.stats.original_size,
            compressed = bundle.stats.compressed_size,
            "document compressed"
        );
        Ok(bundle)
    }

    /// Restore `source` (a compressed file with a side-file) into `target`.
    pub fn decompress_file(&self, source: impl AsRef<Path>, target: impl AsRef<Path>) -> Result<()> {
        let source = source.as_ref();
        let bundle = self.load_bundle(source)?;
        let text = self.read_string(source)?;
        let codec = DictionaryCodec::with_dictionaries(bundle.config, bundle.dictionaries)?;
        let (restored, stats) = codec.decompress(&text)?;
        self.write_string(&target, &restored)?;

        info!(
            source = %source.display(),
            target = %target.as_ref().display(),
            ratio = stats.expansion_ratio,
            "document restored"
        );
        Ok(())
    }
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}
