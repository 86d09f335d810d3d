//! Codec pipeline: analyze, allocate, substitute, join, validate.

use crate::allocator::{allocate, AllocationReport};
use crate::analyzer::FrequencyAnalyzer;
use crate::compressor::{compress_pass, PassStats};
use crate::decompressor::{decompress_ordered, DecompressionStats};
use crate::dictionary::DictionarySet;
use crate::escape::Escaper;
use crate::registry::StrategyRegistry;
use crate::token_join::{join_tokens, JoinStats};
use crate::tokens::CodeScanner;
use crate::validator::{validate_roundtrip, validate_token_join, RoundTripReport, TokenJoinReport};
use gl_core::{CodecConfig, GlossaError, PatternClass, Result, Strategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Sizes in chars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_size: usize,
    pub compressed_size: usize,
    pub chars_saved: i64,
    pub passes: Vec<PassStats>,
    pub join: Option<JoinStats>,
}

impl CompressionStats {
    pub fn pass(&self, class: PatternClass) -> Option<&PassStats> {
        self.passes.iter().find(|p| p.class == Some(class))
    }

    pub fn replacements(&self, class: PatternClass) -> usize {
        self.pass(class).map_or(0, |p| p.replacements)
    }
}

/// Compression result with statistics.
#[derive(Debug, Clone)]
pub struct CompressionResult {
    pub output: String,
    pub dictionaries: DictionarySet,
    pub stats: CompressionStats,
    /// `None` when validation is switched off.
    pub validation: Option<RoundTripReport>,
    pub join_validation: Option<TokenJoinReport>,
}

impl CompressionResult {
    pub fn ratio(&self) -> f64 {
        if self.stats.original_size == 0 {
            return 1.0;
        }
        self.stats.compressed_size as f64 / self.stats.original_size as f64
    }

    pub fn reduction_pct(&self) -> f64 {
        (1.0 - self.ratio()) * 100.0
    }
}

/// The dictionary codec for one document.
pub struct DictionaryCodec {
    config: CodecConfig,
    registry: StrategyRegistry,
    dictionaries: Option<DictionarySet>,
    reports: Vec<AllocationReport>,
}

impl DictionaryCodec {
    pub fn new(config: CodecConfig) -> Result<Self> {
        config.validate()?;
        let registry = StrategyRegistry::new(&config);
        Ok(Self {
            config,
            registry,
            dictionaries: None,
            reports: Vec::new(),
        })
    }

    pub fn standard() -> Result<Self> {
        Self::new(CodecConfig::default())
    }

    pub fn aggressive() -> Result<Self> {
        Self::new(CodecConfig::aggressive())
    }

    /// Codec over dictionaries loaded from elsewhere. Their sigils must
    /// match `config`.
    pub fn with_dictionaries(config: CodecConfig, dictionaries: DictionarySet) -> Result<Self> {
        for class in PatternClass::ALL {
            let expected = config.sigil(class);
            let found = dictionaries.get(class).sigil();
            if expected != found {
                return Err(GlossaError::config(format!(
                    "{class} dictionary uses sigil {found:?}, config expects {expected:?}"
                )));
            }
        }
        let mut codec = Self::new(config)?;
        codec.dictionaries = Some(dictionaries);
        Ok(codec)
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn registry(&self) -> &StrategyRegistry {
        &self.registry
    }

    pub fn dictionaries(&self) -> Option<&DictionarySet> {
        self.dictionaries.as_ref()
    }

    pub fn allocation_reports(&self) -> &[AllocationReport] {
        &self.reports
    }

    /// Analyze `text` and allocate codes for every enabled class.
    pub fn build_dictionaries(&mut self, text: &str) -> Result<&DictionarySet> {
        let analyzer = FrequencyAnalyzer::new(&self.config)?;
        let reserved = self.config.reserved_set();
        let mut set = DictionarySet::empty(&self.config);
        let mut reports = Vec::new();

        for strategy in self.registry.compression_order() {
            let Some(class) = strategy.class() else { continue };
            let analysis = analyzer.analyze(text, class);
            let allocation = allocate(class, &analysis.candidates, self.config.class(class), &reserved)?;
            *set.get_mut(class) = allocation.dictionary;
            reports.push(allocation.report);
        }

        info!(
            templates = set.template.len(),
            phrases = set.phrase.len(),
            words = set.word.len(),
            "dictionaries built"
        );
        self.reports = reports;
        Ok(self.dictionaries.insert(set))
    }

    /// Run every registered pass over `text`.
    pub fn compress(&self, text: &str) -> Result<CompressionResult> {
        let set = self
            .dictionaries
            .as_ref()
            .ok_or(GlossaError::DictionaryNotBuilt { operation: "compress" })?;
        let escaper = Escaper::new(set.sigils());
        let codes = CodeScanner::new(set)?;
        let joinable = CodeScanner::joinable(set)?;

        let original_size = text.chars().count();
        let mut current = escaper.escape(text).into_owned();
        let mut passes = Vec::new();
        let mut join = None;
        let mut join_validation = None;

        for strategy in self.registry.compression_order() {
            match strategy.class() {
                Some(class) => {
                    let (next, stats) =
                        compress_pass(&current, set.get(class), set.case_mode, &escaper, &codes)?;
                    current = next;
                    passes.push(stats);
                }
                None => {
                    let (joined, stats) = join_tokens(&current, &joinable);
                    join_validation = Some(validate_token_join(&current, &joined, &joinable));
                    current = joined;
                    join = Some(stats);
                }
            }
        }

        let compressed_size = current.chars().count();
        let stats = CompressionStats {
            original_size,
            compressed_size,
            chars_saved: original_size as i64 - compressed_size as i64,
            passes,
            join,
        };

        let validation = if self.config.validate {
            let (restored, _) = self.decompress_with(&current, set)?;
            let report = validate_roundtrip(text, &restored, set.case_mode);
            if let Some(m) = &report.mismatch {
                warn!(offset = m.offset, line = m.line, column = m.column, "round-trip mismatch");
                if self.config.strict_validation {
                    return Err(GlossaError::ValidationFailed { offset: m.offset });
                }
            }
            Some(report)
        } else {
            None
        };

        info!(
            original = original_size,
            compressed = compressed_size,
            saved = stats.chars_saved,
            validation = validation.as_ref().map_or("skipped", |r| if r.is_pass() { "PASS" } else { "FAIL" }),
            "compression complete"
        );
        Ok(CompressionResult {
            output: current,
            dictionaries: set.clone(),
            stats,
            validation,
            join_validation,
        })
    }

    /// Build dictionaries from `text`, then compress it.
    pub fn compress_document(&mut self, text: &str) -> Result<CompressionResult> {
        self.build_dictionaries(text)?;
        self.compress(text)
    }

    pub fn decompress(&self, text: &str) -> Result<(String, DecompressionStats)> {
        let set = self
            .dictionaries
            .as_ref()
            .ok_or(GlossaError::DictionaryNotBuilt { operation: "decompress" })?;
        self.decompress_with(text, set)
    }

    fn decompress_with(&self, text: &str, set: &DictionarySet) -> Result<(String, DecompressionStats)> {
        let order: Vec<PatternClass> = self
            .registry
            .decompression_order()
            .into_iter()
            .filter_map(|s: Strategy| s.class())
            .collect();
        let (restored, stats) = decompress_ordered(text, set, &order)?;
        debug!(joins = stats.joins_split, ratio = stats.expansion_ratio, "decompressed");
        Ok((restored, stats))
    }
}
