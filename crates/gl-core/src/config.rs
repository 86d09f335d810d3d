use crate::error::{GlossaError, Result};
use crate::types::{CaseMode, PatternClass, ReservedSet, TierScheme, TierSpec, ESCAPE};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Top-level codec configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub analyzer: AnalyzerConfig,
    pub template: ClassConfig,
    pub phrase: ClassConfig,
    pub word: ClassConfig,
    pub reserved: ReservedConfig,
    pub case_mode: CaseMode,
    /// Glue adjacent word/phrase codes together.
    pub token_join: bool,
    /// Run the round-trip check after compressing.
    pub validate: bool,
    /// Turn a failed round-trip check into an error.
    pub strict_validation: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub min_word_length: usize,
    pub min_phrase_words: usize,
    pub max_phrase_words: usize,
    /// Minimum phrase length in chars.
    pub min_phrase_length: usize,
    /// Regexes describing structural template blocks.
    pub template_shapes: Vec<String>,
}

/// Per-class allocation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassConfig {
    pub sigil: char,
    pub tiers: Vec<TierSpec>,
    pub min_occurrences: usize,
    /// Minimum `(pattern_len - code_len) * count` for a pattern to get a code.
    pub min_savings: i64,
    pub max_entries: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReservedConfig {
    pub words: Vec<String>,
    pub code_suffixes: Vec<String>,
}

fn s(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_word_length: 4,
            min_phrase_words: 2,
            max_phrase_words: 5,
            min_phrase_length: 15,
            template_shapes: s(&[
                // bold header followed by a bold secondary label line
                r"#{2,6} \*\*[^*\n]+\*\*\n\*\*[^*\n]+\*\*",
                r"#### \*\*[📜📊🏗💡🎯🧠][^*\n]+\*\*",
                r"\*\*[📜📊🏗💡🎯🧠][^*\n]{10,50}\*\*",
                r"- \*\*[A-Z][a-z]+ [A-Z][a-z]+\*\*: ",
            ]),
        }
    }
}

impl ClassConfig {
    pub fn template() -> Self {
        Self {
            sigil: '§',
            tiers: vec![
                TierSpec::new(TierScheme::Upper),
                TierSpec::new(TierScheme::LowerPair),
            ],
            min_occurrences: 2,
            min_savings: 50,
            max_entries: 20,
        }
    }

    pub fn phrase() -> Self {
        Self {
            sigil: '€',
            tiers: vec![
                TierSpec::new(TierScheme::Upper),
                TierSpec::new(TierScheme::LowerPair),
                TierSpec::new(TierScheme::Numeric { width: 3 }),
            ],
            min_occurrences: 3,
            min_savings: 21,
            max_entries: 250,
        }
    }

    pub fn word() -> Self {
        Self {
            sigil: '$',
            tiers: vec![
                TierSpec::new(TierScheme::Upper),
                TierSpec::new(TierScheme::LowerPair),
                TierSpec::new(TierScheme::Numeric { width: 3 }),
            ],
            min_occurrences: 3,
            min_savings: 10,
            max_entries: 800,
        }
    }

    /// Shortest code the ladder can hand out.
    pub fn cheapest_code_len(&self) -> usize {
        self.tiers
            .iter()
            .map(|t| t.scheme.code_len())
            .min()
            .unwrap_or(2)
    }
}

impl Default for ReservedConfig {
    fn default() -> Self {
        Self {
            words: s(&[
                "is", "are", "the", "and", "or", "not", "for", "with", "from",
                "this", "that", "have", "has", "was", "were", "been", "being",
                "can", "may", "will", "but", "she", "her", "his", "its",
                "our", "we", "you", "they", "them", "their", "all", "one",
                "two", "who", "what", "when", "where", "why", "how",
            ]),
            code_suffixes: s(&[
                "md", "py", "js", "ts", "go", "rs", "sh", "rb",
                "id", "in", "on", "at", "by", "to", "of", "or",
                "if", "is", "it", "as", "be", "we", "me", "he",
            ]),
        }
    }
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            analyzer: AnalyzerConfig::default(),
            template: ClassConfig::template(),
            phrase: ClassConfig::phrase(),
            word: ClassConfig::word(),
            reserved: ReservedConfig::default(),
            case_mode: CaseMode::Preserve,
            token_join: true,
            validate: true,
            strict_validation: false,
        }
    }
}

impl CodecConfig {
    /// Lower word thresholds: two occurrences are enough, no savings floor.
    pub fn aggressive() -> Self {
        let mut config = Self::default();
        config.word.min_occurrences = 2;
        config.word.min_savings = 0;
        config
    }

    pub fn class(&self, class: PatternClass) -> &ClassConfig {
        match class {
            PatternClass::Template => &self.template,
            PatternClass::Phrase => &self.phrase,
            PatternClass::Word => &self.word,
        }
    }

    pub fn class_mut(&mut self, class: PatternClass) -> &mut ClassConfig {
        match class {
            PatternClass::Template => &mut self.template,
            PatternClass::Phrase => &mut self.phrase,
            PatternClass::Word => &mut self.word,
        }
    }

    pub fn sigil(&self, class: PatternClass) -> char {
        self.class(class).sigil
    }

    pub fn reserved_set(&self) -> ReservedSet {
        ReservedSet::new(&self.reserved.words, &self.reserved.code_suffixes)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), case_mode = ?config.case_mode, "codec config loaded");
        Ok(config)
    }

    /// Check ladders, sigils, thresholds and template shapes.
    pub fn validate(&self) -> Result<()> {
        let mut sigils = HashSet::new();
        for class in PatternClass::ALL {
            let cfg = self.class(class);
            let sigil = cfg.sigil;
            if sigil.is_alphanumeric() || sigil.is_whitespace() || sigil == '_' {
                return Err(GlossaError::config(format!(
                    "{class} sigil {sigil:?} must not be a word or whitespace character"
                )));
            }
            if ('\u{E000}'..='\u{E00F}').contains(&sigil) || sigil == ESCAPE {
                return Err(GlossaError::config(format!(
                    "{class} sigil {sigil:?} overlaps the escape range"
                )));
            }
            if !sigils.insert(sigil) {
                return Err(GlossaError::config(format!(
                    "sigil {sigil:?} is used by more than one class"
                )));
            }
            if cfg.tiers.is_empty() {
                return Err(GlossaError::config(format!("{class} ladder has no tiers")));
            }
            let mut kinds = HashSet::new();
            for tier in &cfg.tiers {
                if !kinds.insert(tier.scheme.kind()) {
                    return Err(GlossaError::config(format!(
                        "{class} ladder repeats the {} scheme",
                        tier.scheme.kind()
                    )));
                }
                if let TierScheme::Numeric { width } = tier.scheme {
                    if !(1..=4).contains(&width) {
                        return Err(GlossaError::config(format!(
                            "{class} numeric tier width {width} outside 1..=4"
                        )));
                    }
                }
            }
            if cfg.min_occurrences == 0 {
                return Err(GlossaError::config(format!(
                    "{class} min_occurrences must be at least 1"
                )));
            }
        }

        let a = &self.analyzer;
        if a.min_word_length == 0 {
            return Err(GlossaError::config("min_word_length must be at least 1"));
        }
        if a.min_phrase_words < 2 || a.max_phrase_words < a.min_phrase_words {
            return Err(GlossaError::config(format!(
                "phrase window {}..={} is invalid",
                a.min_phrase_words, a.max_phrase_words
            )));
        }
        for shape in &a.template_shapes {
            regex::Regex::new(shape)?;
        }
        Ok(())
    }
}
