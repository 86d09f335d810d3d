use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Escape character used to neutralise sigils that already occur in the input.
pub const ESCAPE: char = '\u{E000}';

/// The three kinds of pattern the codec substitutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternClass {
    /// Structural markup block matched by a fixed shape.
    Template,
    /// Run of 2-5 words.
    Phrase,
    /// Single alphabetic token.
    Word,
}

impl PatternClass {
    /// Compression order. Decompression walks it backwards.
    pub const ALL: [PatternClass; 3] = [Self::Template, Self::Phrase, Self::Word];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Phrase => "phrase",
            Self::Word => "word",
        }
    }

    /// Title used in dictionary listings.
    pub fn title(&self) -> &'static str {
        match self {
            Self::Template => "Template Dictionary",
            Self::Phrase => "Phrase Dictionary",
            Self::Word => "Word Dictionary",
        }
    }

    /// Word and phrase patterns only match on word boundaries.
    pub fn is_word_bounded(&self) -> bool {
        !matches!(self, Self::Template)
    }

    /// Codes of this class may be glued to a neighbouring code by the join pass.
    pub fn is_joinable(&self) -> bool {
        self.is_word_bounded()
    }
}

impl fmt::Display for PatternClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Enumeration scheme of one tier. Each scheme starts with a different
/// character class and has a fixed length, so a ladder that uses each scheme
/// at most once is prefix-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TierScheme {
    /// `A`..`Z`
    Upper,
    /// `aa`..`zz`
    LowerPair,
    /// Zero-padded decimal, `width` digits.
    Numeric { width: u8 },
}

impl TierScheme {
    pub fn suffix_len(&self) -> usize {
        match self {
            Self::Upper => 1,
            Self::LowerPair => 2,
            Self::Numeric { width } => *width as usize,
        }
    }

    /// Code length including the sigil.
    pub fn code_len(&self) -> usize {
        self.suffix_len() + 1
    }

    /// Number of suffixes the scheme can enumerate before reserved filtering.
    pub fn natural_capacity(&self) -> usize {
        match self {
            Self::Upper => 26,
            Self::LowerPair => 26 * 26,
            Self::Numeric { width } => 10usize.pow(*width as u32),
        }
    }

    /// The `index`-th suffix of the scheme.
    pub fn suffix(&self, index: usize) -> Option<String> {
        if index >= self.natural_capacity() {
            return None;
        }
        let s = match self {
            Self::Upper => ((b'A' + index as u8) as char).to_string(),
            Self::LowerPair => {
                let first = (b'a' + (index / 26) as u8) as char;
                let second = (b'a' + (index % 26) as u8) as char;
                format!("{first}{second}")
            }
            Self::Numeric { width } => format!("{:0w$}", index, w = *width as usize),
        };
        Some(s)
    }

    /// All suffixes in enumeration order.
    pub fn suffixes(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.natural_capacity()).filter_map(move |i| self.suffix(i))
    }

    /// Regex fragment matching one suffix of this scheme.
    pub fn suffix_pattern(&self) -> String {
        match self {
            Self::Upper => "[A-Z]".to_string(),
            Self::LowerPair => "[a-z]{2}".to_string(),
            Self::Numeric { width } => format!("[0-9]{{{width}}}"),
        }
    }

    /// Whether a suffix starting with `c` belongs to this scheme.
    pub fn starts_with(&self, c: char) -> bool {
        match self {
            Self::Upper => c.is_ascii_uppercase(),
            Self::LowerPair => c.is_ascii_lowercase(),
            Self::Numeric { .. } => c.is_ascii_digit(),
        }
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::LowerPair => "lower_pair",
            Self::Numeric { .. } => "numeric",
        }
    }
}

/// One rung of a class ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierSpec {
    pub scheme: TierScheme,
    /// Optional cap below the scheme's natural capacity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<usize>,
}

impl TierSpec {
    pub fn new(scheme: TierScheme) -> Self {
        Self { scheme, capacity: None }
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// How word and phrase casing is handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaseMode {
    /// Count and match exact surface forms. Round-trips byte for byte.
    #[default]
    Preserve,
    /// Lowercase before counting, match case-insensitively. Encoded words
    /// come back lowercased.
    Fold,
}

/// A substitution strategy. The set is closed on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    Template,
    Phrase,
    Word,
    TokenJoin,
}

impl Strategy {
    pub fn class(&self) -> Option<PatternClass> {
        match self {
            Self::Template => Some(PatternClass::Template),
            Self::Phrase => Some(PatternClass::Phrase),
            Self::Word => Some(PatternClass::Word),
            Self::TokenJoin => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Template => "template",
            Self::Phrase => "phrase",
            Self::Word => "word",
            Self::TokenJoin => "token_join",
        }
    }
}

impl From<PatternClass> for Strategy {
    fn from(class: PatternClass) -> Self {
        match class {
            PatternClass::Template => Self::Template,
            PatternClass::Phrase => Self::Phrase,
            PatternClass::Word => Self::Word,
        }
    }
}

/// Strings that never receive a code and never serve as a code suffix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservedSet {
    words: BTreeSet<String>,
    code_suffixes: BTreeSet<String>,
}

impl ReservedSet {
    pub fn new<W, S>(words: W, code_suffixes: S) -> Self
    where
        W: IntoIterator,
        W::Item: AsRef<str>,
        S: IntoIterator,
        S::Item: AsRef<str>,
    {
        Self {
            words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect(),
            code_suffixes: code_suffixes
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Pattern is a reserved function word (case-insensitive).
    pub fn is_reserved_pattern(&self, pattern: &str) -> bool {
        self.words.contains(&pattern.to_lowercase())
    }

    pub fn is_reserved_suffix(&self, suffix: &str) -> bool {
        self.code_suffixes.contains(&suffix.to_lowercase())
    }

    /// Code (sigil + suffix) collides with a reserved token.
    pub fn is_reserved_code(&self, code: &str) -> bool {
        let mut chars = code.chars();
        chars.next();
        let suffix = chars.as_str();
        self.is_reserved_suffix(suffix) || self.words.contains(&code.to_lowercase())
    }

    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn code_suffixes(&self) -> impl Iterator<Item = &str> {
        self.code_suffixes.iter().map(String::as_str)
    }
}
