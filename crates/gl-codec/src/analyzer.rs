//! Frequency analysis: discover recurring templates, phrases and words.

use gl_core::{AnalyzerConfig, CaseMode, CodecConfig, PatternClass, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

static RE_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b[A-Za-z]+\b").unwrap());

/// A pattern that met the class thresholds, with its occurrence count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub class: PatternClass,
    pub pattern: String,
    pub count: usize,
}

impl Candidate {
    pub fn char_len(&self) -> usize {
        self.pattern.chars().count()
    }

    /// `(pattern_len - code_len) * count`
    pub fn savings(&self, code_len: usize) -> i64 {
        (self.char_len() as i64 - code_len as i64) * self.count as i64
    }
}

/// Result of analyzing one class.
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub candidates: Vec<Candidate>,
    /// Distinct patterns seen before thresholds were applied.
    pub distinct_seen: usize,
}

pub struct FrequencyAnalyzer {
    config: AnalyzerConfig,
    case_mode: CaseMode,
    min_occurrences: [usize; 3],
    shapes: Vec<Regex>,
}

impl FrequencyAnalyzer {
    pub fn new(config: &CodecConfig) -> Result<Self> {
        let shapes = config
            .analyzer
            .template_shapes
            .iter()
            .map(|s| Regex::new(s))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            config: config.analyzer.clone(),
            case_mode: config.case_mode,
            min_occurrences: [
                config.template.min_occurrences,
                config.phrase.min_occurrences,
                config.word.min_occurrences,
            ],
            shapes,
        })
    }

    fn min_occurrences(&self, class: PatternClass) -> usize {
        self.min_occurrences[class as usize]
    }

    fn key(&self, surface: &str) -> String {
        match self.case_mode {
            CaseMode::Preserve => surface.to_string(),
            CaseMode::Fold => surface.to_lowercase(),
        }
    }

    pub fn analyze(&self, text: &str, class: PatternClass) -> Analysis {
        let counts = match class {
            PatternClass::Template => self.count_templates(text),
            PatternClass::Phrase => self.count_phrases(text),
            PatternClass::Word => self.count_words(text),
        };
        let distinct_seen = counts.len();
        let min = self.min_occurrences(class);
        let mut candidates: Vec<Candidate> = counts
            .into_iter()
            .filter(|(_, count)| *count >= min)
            .map(|(pattern, count)| Candidate { class, pattern, count })
            .collect();
        rank(&mut candidates);
        debug!(
            class = %class,
            distinct = distinct_seen,
            kept = candidates.len(),
            "frequency analysis"
        );
        Analysis { candidates, distinct_seen }
    }

    fn count_words(&self, text: &str) -> HashMap<String, usize> {
        let mut counter = HashMap::new();
        for m in RE_WORD.find_iter(text) {
            if m.as_str().len() >= self.config.min_word_length {
                *counter.entry(self.key(m.as_str())).or_insert(0) += 1;
            }
        }
        counter
    }

    /// Sliding 2..=5 word windows over runs of words separated only by
    /// spaces or tabs.
    fn count_phrases(&self, text: &str) -> HashMap<String, usize> {
        let mut counter = HashMap::new();
        for run in word_runs(text) {
            for n in self.config.min_phrase_words..=self.config.max_phrase_words {
                for window in run.windows(n) {
                    let (start, _) = window[0];
                    let (_, end) = window[n - 1];
                    let surface = &text[start..end];
                    if surface.chars().count() >= self.config.min_phrase_length {
                        *counter.entry(self.key(surface)).or_insert(0) += 1;
                    }
                }
            }
        }
        counter
    }

    /// Identical blocks matched by any template shape. Overlapping shapes
    /// are counted independently.
    fn count_templates(&self, text: &str) -> HashMap<String, usize> {
        let mut counter = HashMap::new();
        for shape in &self.shapes {
            for m in shape.find_iter(text) {
                if !m.as_str().is_empty() {
                    *counter.entry(m.as_str().to_string()).or_insert(0) += 1;
                }
            }
        }
        counter
    }
}

/// Byte spans of words, grouped into runs joined by horizontal whitespace.
fn word_runs(text: &str) -> Vec<Vec<(usize, usize)>> {
    let mut runs = Vec::new();
    let mut current: Vec<(usize, usize)> = Vec::new();
    for m in RE_WORD.find_iter(text) {
        if let Some(&(_, prev_end)) = current.last() {
            let gap = &text[prev_end..m.start()];
            let joined = !gap.is_empty() && gap.chars().all(|c| c == ' ' || c == '\t');
            if !joined {
                runs.push(std::mem::take(&mut current));
            }
        }
        current.push((m.start(), m.end()));
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

/// Count desc, then longer first, then lexical.
fn rank(candidates: &mut [Candidate]) {
    candidates.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.char_len().cmp(&a.char_len()))
            .then_with(|| a.pattern.cmp(&b.pattern))
    });
}
