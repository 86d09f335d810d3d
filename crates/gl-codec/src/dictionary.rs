//! Per-class pattern ↔ code dictionaries.

use gl_core::{CaseMode, CodecConfig, GlossaError, PatternClass, Result, TierScheme};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One `code = pattern` mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictEntry {
    pub code: String,
    pub pattern: String,
    /// Index into the class ladder the code was drawn from.
    pub tier: usize,
    /// Occurrences counted at analysis time.
    #[serde(default)]
    pub count: usize,
}

impl DictEntry {
    pub fn code_len(&self) -> usize {
        self.code.chars().count()
    }

    pub fn pattern_len(&self) -> usize {
        self.pattern.chars().count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawDictionary {
    class: PatternClass,
    sigil: char,
    tiers: Vec<TierScheme>,
    entries: Vec<DictEntry>,
}

/// Bidirectional mapping for one pattern class. Immutable once handed to
/// the substitution passes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawDictionary", into = "RawDictionary")]
pub struct Dictionary {
    class: PatternClass,
    sigil: char,
    tiers: Vec<TierScheme>,
    entries: Vec<DictEntry>,
    by_code: HashMap<String, usize>,
    by_pattern: HashMap<String, usize>,
}

impl TryFrom<RawDictionary> for Dictionary {
    type Error = GlossaError;

    fn try_from(raw: RawDictionary) -> Result<Self> {
        let mut dict = Dictionary::new(raw.class, raw.sigil, raw.tiers);
        for entry in raw.entries {
            dict.insert(entry)?;
        }
        Ok(dict)
    }
}

impl From<Dictionary> for RawDictionary {
    fn from(dict: Dictionary) -> Self {
        Self {
            class: dict.class,
            sigil: dict.sigil,
            tiers: dict.tiers,
            entries: dict.entries,
        }
    }
}

impl Dictionary {
    pub fn new(class: PatternClass, sigil: char, tiers: Vec<TierScheme>) -> Self {
        Self {
            class,
            sigil,
            tiers,
            entries: Vec::new(),
            by_code: HashMap::new(),
            by_pattern: HashMap::new(),
        }
    }

    /// Empty dictionary using the ladder from `config`.
    pub fn empty(class: PatternClass, config: &CodecConfig) -> Self {
        let cfg = config.class(class);
        Self::new(class, cfg.sigil, cfg.tiers.iter().map(|t| t.scheme).collect())
    }

    pub fn class(&self) -> PatternClass {
        self.class
    }

    pub fn sigil(&self) -> char {
        self.sigil
    }

    pub fn tiers(&self) -> &[TierScheme] {
        &self.tiers
    }

    /// Ladder position of the scheme that produced `code`.
    pub fn tier_of(&self, code: &str) -> Option<usize> {
        let mut chars = code.chars();
        if chars.next()? != self.sigil {
            return None;
        }
        let suffix = chars.as_str();
        let first = suffix.chars().next()?;
        self.tiers.iter().position(|scheme| {
            scheme.starts_with(first)
                && suffix.chars().count() == scheme.suffix_len()
                && suffix.chars().all(|c| scheme.starts_with(c))
        })
    }

    /// Add an entry. Duplicate codes or patterns and codes outside the
    /// ladder are rejected.
    pub fn insert(&mut self, entry: DictEntry) -> Result<()> {
        let tier = self.tier_of(&entry.code).ok_or_else(|| {
            GlossaError::config(format!(
                "{} code {:?} does not fit the {} ladder",
                self.class, entry.code, self.class
            ))
        })?;
        if entry.pattern.is_empty() {
            return Err(GlossaError::config(format!("{} code {} has an empty pattern", self.class, entry.code)));
        }
        if self.by_code.contains_key(&entry.code) {
            return Err(GlossaError::config(format!("duplicate {} code {}", self.class, entry.code)));
        }
        if self.by_pattern.contains_key(&entry.pattern) {
            return Err(GlossaError::config(format!(
                "duplicate {} pattern {:?}",
                self.class, entry.pattern
            )));
        }
        let idx = self.entries.len();
        self.by_code.insert(entry.code.clone(), idx);
        self.by_pattern.insert(entry.pattern.clone(), idx);
        self.entries.push(DictEntry { tier, ..entry });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[DictEntry] {
        &self.entries
    }

    pub fn pattern(&self, code: &str) -> Option<&str> {
        self.by_code.get(code).map(|&i| self.entries[i].pattern.as_str())
    }

    pub fn code(&self, pattern: &str) -> Option<&str> {
        self.by_pattern.get(pattern).map(|&i| self.entries[i].code.as_str())
    }

    pub fn contains_code(&self, code: &str) -> bool {
        self.by_code.contains_key(code)
    }

    /// Compression order: longest pattern first, ties by code.
    pub fn by_pattern_len_desc(&self) -> Vec<&DictEntry> {
        let mut sorted: Vec<&DictEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.pattern_len()
                .cmp(&a.pattern_len())
                .then_with(|| a.code.cmp(&b.code))
        });
        sorted
    }

    /// Decompression order: longest code first, then later tier first.
    pub fn by_code_len_desc(&self) -> Vec<&DictEntry> {
        let mut sorted: Vec<&DictEntry> = self.entries.iter().collect();
        sorted.sort_by(|a, b| {
            b.code_len()
                .cmp(&a.code_len())
                .then_with(|| b.tier.cmp(&a.tier))
                .then_with(|| a.code.cmp(&b.code))
        });
        sorted
    }

    /// Regex fragment matching any code shape of this class.
    pub fn shape_pattern(&self) -> String {
        let alternatives: Vec<String> = self.tiers.iter().map(|t| t.suffix_pattern()).collect();
        format!(
            "{}(?:{})",
            regex::escape(&self.sigil.to_string()),
            alternatives.join("|")
        )
    }
}

/// The three dictionaries of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionarySet {
    pub case_mode: CaseMode,
    pub template: Dictionary,
    pub phrase: Dictionary,
    pub word: Dictionary,
}

impl DictionarySet {
    pub fn empty(config: &CodecConfig) -> Self {
        Self {
            case_mode: config.case_mode,
            template: Dictionary::empty(PatternClass::Template, config),
            phrase: Dictionary::empty(PatternClass::Phrase, config),
            word: Dictionary::empty(PatternClass::Word, config),
        }
    }

    pub fn get(&self, class: PatternClass) -> &Dictionary {
        match class {
            PatternClass::Template => &self.template,
            PatternClass::Phrase => &self.phrase,
            PatternClass::Word => &self.word,
        }
    }

    pub fn get_mut(&mut self, class: PatternClass) -> &mut Dictionary {
        match class {
            PatternClass::Template => &mut self.template,
            PatternClass::Phrase => &mut self.phrase,
            PatternClass::Word => &mut self.word,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Dictionary> {
        PatternClass::ALL.into_iter().map(move |c| self.get(c))
    }

    /// Sigils in compression class order.
    pub fn sigils(&self) -> [char; 3] {
        [self.template.sigil, self.phrase.sigil, self.word.sigil]
    }

    pub fn total_entries(&self) -> usize {
        self.iter().map(Dictionary::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries() == 0
    }

    /// Render the `code = pattern` listing, one fenced section per class.
    pub fn to_listing(&self) -> String {
        let mut out = String::new();
        for dict in self.iter() {
            out.push_str(&format!(
                "### **{} ({} entries)**\n```\n",
                dict.class.title(),
                dict.len()
            ));
            let mut entries: Vec<&DictEntry> = dict.entries.iter().collect();
            entries.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.code.cmp(&b.code)));
            for entry in entries {
                out.push_str(&entry.code);
                out.push_str(" = ");
                out.push_str(&escape_listing(&entry.pattern));
                out.push('\n');
            }
            out.push_str("```\n\n");
        }
        out
    }

    /// Parse a listing produced by [`DictionarySet::to_listing`]. Sigils,
    /// ladders and case mode come from `config`; occurrence counts are lost.
    pub fn from_listing(text: &str, config: &CodecConfig) -> Result<Self> {
        let mut set = Self::empty(config);
        for class in PatternClass::ALL {
            let Some(section) = extract_section(text, class.title()) else {
                continue;
            };
            let dict = set.get_mut(class);
            for line in section.lines().filter(|l| !l.trim().is_empty()) {
                let items: Vec<&str> = if class.is_word_bounded() {
                    line.split(" | ").collect()
                } else {
                    vec![line]
                };
                for item in items {
                    let (code, pattern) = item.split_once(" = ").ok_or_else(|| {
                        GlossaError::CorruptInput {
                            offset: 0,
                            reason: format!("malformed {class} listing line {item:?}"),
                        }
                    })?;
                    dict.insert(DictEntry {
                        code: code.trim().to_string(),
                        pattern: unescape_listing(pattern),
                        tier: 0,
                        count: 0,
                    })?;
                }
            }
        }
        Ok(set)
    }
}

fn extract_section<'t>(text: &'t str, title: &str) -> Option<&'t str> {
    let header = format!("### **{title} (");
    let start = text.find(&header)?;
    let rest = &text[start..];
    let body_start = rest.find("```\n")? + 4;
    let body = &rest[body_start..];
    let body_end = body.find("```")?;
    Some(&body[..body_end])
}

fn escape_listing(pattern: &str) -> String {
    pattern
        .replace('\\', "\\\\")
        .replace('\n', "\\n")
        .replace('\r', "\\r")
        .replace('`', "\\`")
}

fn unescape_listing(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
