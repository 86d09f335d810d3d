//! Dictionary side-file: everything needed to restore one compressed document.

use chrono::{DateTime, Utc};
use gl_codec::{AllocationReport, CompressionResult, DictionarySet};
use gl_core::{CodecConfig, PatternClass};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-class dictionary statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassStats {
    pub class: Option<PatternClass>,
    pub entries: usize,
    pub replacements: usize,
    pub total_savings: i64,
    /// Candidates that found no code.
    pub dropped: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BundleStats {
    pub original_size: usize,
    pub compressed_size: usize,
    pub chars_saved: i64,
    pub pairs_joined: usize,
    pub classes: Vec<ClassStats>,
    /// `"PASS"`, `"FAIL"` or `None` when validation was off.
    #[serde(default)]
    pub validation: Option<String>,
}

impl BundleStats {
    pub fn from_result(result: &CompressionResult, reports: &[AllocationReport]) -> Self {
        let classes = PatternClass::ALL
            .into_iter()
            .map(|class| {
                let report = reports.iter().find(|r| r.class == Some(class));
                ClassStats {
                    class: Some(class),
                    entries: result.dictionaries.get(class).len(),
                    replacements: result.stats.replacements(class),
                    total_savings: report.map_or(0, |r| r.total_savings),
                    dropped: report.map_or(0, |r| r.dropped_capacity),
                }
            })
            .collect();
        Self {
            original_size: result.stats.original_size,
            compressed_size: result.stats.compressed_size,
            chars_saved: result.stats.chars_saved,
            pairs_joined: result.stats.join.as_ref().map_or(0, |j| j.pairs_joined),
            classes,
            validation: result.validation.as_ref().map(|v| v.status.to_string()),
        }
    }

    pub fn class(&self, class: PatternClass) -> Option<&ClassStats> {
        self.classes.iter().find(|c| c.class == Some(class))
    }
}

/// Persisted next to the compressed text as `<file>.dict.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionaryBundle {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    /// Name of the document the dictionaries were built from.
    #[serde(default)]
    pub source: Option<String>,
    pub config: CodecConfig,
    pub stats: BundleStats,
    pub dictionaries: DictionarySet,
}

impl DictionaryBundle {
    pub fn new(config: CodecConfig, dictionaries: DictionarySet, stats: BundleStats) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            source: None,
            config,
            stats,
            dictionaries,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}
