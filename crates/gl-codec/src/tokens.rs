//! Lexical scanning of code tokens by shape.
//!
//! Codes are self-delimiting: the sigil picks the class and the first suffix
//! char picks the tier, which fixes the length. Scanning never relies on
//! whitespace.

use crate::dictionary::DictionarySet;
use gl_core::{PatternClass, Result};
use regex::Regex;

/// A code-shaped token found in text (byte offsets).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeToken<'t> {
    pub class: PatternClass,
    pub start: usize,
    pub end: usize,
    pub text: &'t str,
}

#[derive(Debug, Clone)]
pub struct CodeScanner {
    re: Regex,
    sigils: Vec<(char, PatternClass)>,
}

impl CodeScanner {
    /// Scanner over every class of `set`.
    pub fn new(set: &DictionarySet) -> Result<Self> {
        Self::for_classes(set, &PatternClass::ALL)
    }

    /// Scanner over the classes that take part in token joins.
    pub fn joinable(set: &DictionarySet) -> Result<Self> {
        let classes: Vec<PatternClass> = PatternClass::ALL
            .into_iter()
            .filter(PatternClass::is_joinable)
            .collect();
        Self::for_classes(set, &classes)
    }

    pub fn for_classes(set: &DictionarySet, classes: &[PatternClass]) -> Result<Self> {
        let alternatives: Vec<String> = classes
            .iter()
            .map(|c| set.get(*c).shape_pattern())
            .collect();
        let pattern = if alternatives.is_empty() {
            // never matches
            r"\b\B".to_string()
        } else {
            alternatives.join("|")
        };
        Ok(Self {
            re: Regex::new(&pattern)?,
            sigils: classes.iter().map(|c| (set.get(*c).sigil(), *c)).collect(),
        })
    }

    pub fn class_of(&self, token: &str) -> Option<PatternClass> {
        let first = token.chars().next()?;
        self.sigils
            .iter()
            .find(|(sigil, _)| *sigil == first)
            .map(|(_, class)| *class)
    }

    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = CodeToken<'a>> + 'a {
        self.re.find_iter(text).filter_map(move |m| {
            self.class_of(m.as_str()).map(|class| CodeToken {
                class,
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
            })
        })
    }

    pub fn count(&self, text: &str) -> usize {
        self.re.find_iter(text).count()
    }

    /// Token texts in order.
    pub fn token_texts<'t>(&self, text: &'t str) -> Vec<&'t str> {
        self.re.find_iter(text).map(|m| m.as_str()).collect()
    }
}

/// Split `text` into alternating literal and code spans and run `f` on each
/// literal span only. Codes are copied through untouched.
pub fn map_literals<F>(text: &str, scanner: &CodeScanner, mut f: F) -> String
where
    F: FnMut(&str, &mut String),
{
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for token in scanner.tokens(text) {
        if token.start > last {
            f(&text[last..token.start], &mut out);
        }
        out.push_str(token.text);
        last = token.end;
    }
    if last < text.len() {
        f(&text[last..], &mut out);
    }
    out
}
