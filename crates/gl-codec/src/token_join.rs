//! Token join: drop the single space between consecutive word/phrase codes.
//!
//! Template codes are never joined. Because word-bounded matches cannot sit
//! directly against each other in compressed text, any two adjacent joinable
//! codes must come from a join, which makes [`split_tokens`] exact.

use crate::tokens::CodeScanner;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinStats {
    pub pairs_joined: usize,
    pub chars_saved: usize,
    pub original_size: usize,
    pub new_size: usize,
}

/// `scanner` must only recognise joinable classes.
pub fn join_tokens(text: &str, scanner: &CodeScanner) -> (String, JoinStats) {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    let mut prev_end: Option<usize> = None;
    let mut pairs = 0;

    for token in scanner.tokens(text) {
        if let Some(end) = prev_end {
            if token.start == end + 1 && &text[end..token.start] == " " {
                out.push_str(&text[last..end]);
                last = token.start;
                pairs += 1;
            }
        }
        prev_end = Some(token.end);
    }
    out.push_str(&text[last..]);

    let original_size = text.chars().count();
    let new_size = original_size - pairs;
    debug!(pairs, saved = pairs, "token join");
    (
        out,
        JoinStats {
            pairs_joined: pairs,
            chars_saved: pairs,
            original_size,
            new_size,
        },
    )
}

/// Reverse [`join_tokens`]: put one space back between adjacent joinable codes.
pub fn split_tokens(text: &str, scanner: &CodeScanner) -> (String, usize) {
    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    let mut prev_end: Option<usize> = None;
    let mut splits = 0;

    for token in scanner.tokens(text) {
        if prev_end == Some(token.start) {
            out.push_str(&text[last..token.start]);
            out.push(' ');
            last = token.start;
            splits += 1;
        }
        prev_end = Some(token.end);
    }
    out.push_str(&text[last..]);
    (out, splits)
}
