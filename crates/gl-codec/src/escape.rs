//! Sigil escaping.
//!
//! Every sigil already present in the input is rewritten to a two-char
//! private-use sequence before substitution, so that after compression the
//! only sigils left in the text are codes.

use gl_core::{GlossaError, Result, ESCAPE};
use std::borrow::Cow;

/// First marker char; sigil `i` is encoded as `ESCAPE` + `MARKER_BASE + i`.
const MARKER_BASE: u32 = 0xE001;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Escaper {
    sigils: Vec<char>,
}

impl Escaper {
    pub fn new(sigils: impl IntoIterator<Item = char>) -> Self {
        Self { sigils: sigils.into_iter().collect() }
    }

    pub fn sigils(&self) -> &[char] {
        &self.sigils
    }

    fn marker(index: usize) -> char {
        char::from_u32(MARKER_BASE + index as u32).unwrap_or(ESCAPE)
    }

    fn needs_escape(&self, c: char) -> bool {
        c == ESCAPE || self.sigils.contains(&c)
    }

    /// Escape sigils and the escape char itself.
    pub fn escape<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if !text.chars().any(|c| self.needs_escape(c)) {
            return Cow::Borrowed(text);
        }
        let mut out = String::with_capacity(text.len() + 8);
        for c in text.chars() {
            if c == ESCAPE {
                out.push(ESCAPE);
                out.push(ESCAPE);
            } else if let Some(i) = self.sigils.iter().position(|s| *s == c) {
                out.push(ESCAPE);
                out.push(Self::marker(i));
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    }

    /// Reverse [`Escaper::escape`]. A dangling or unknown escape is corrupt input.
    pub fn unescape(&self, text: &str) -> Result<String> {
        if !text.contains(ESCAPE) {
            return Ok(text.to_string());
        }
        let mut out = String::with_capacity(text.len());
        let mut chars = text.chars().enumerate();
        while let Some((offset, c)) = chars.next() {
            if c != ESCAPE {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some((_, ESCAPE)) => out.push(ESCAPE),
                Some((_, m)) => {
                    let index = (m as u32).checked_sub(MARKER_BASE).map(|i| i as usize);
                    match index.and_then(|i| self.sigils.get(i)) {
                        Some(sigil) => out.push(*sigil),
                        None => {
                            return Err(GlossaError::CorruptInput {
                                offset,
                                reason: format!("unknown escape marker {m:?}"),
                            })
                        }
                    }
                }
                None => {
                    return Err(GlossaError::CorruptInput {
                        offset,
                        reason: "dangling escape at end of text".into(),
                    })
                }
            }
        }
        Ok(out)
    }

    /// Char offset of the first raw sigil, if any.
    pub fn find_raw_sigil(&self, text: &str) -> Option<(usize, char)> {
        text.chars()
            .enumerate()
            .find(|(_, c)| self.sigils.contains(c))
    }
}
