//! Substitution decompressor: code to pattern, words first, templates last.

use crate::dictionary::{Dictionary, DictionarySet};
use crate::escape::Escaper;
use crate::token_join::split_tokens;
use crate::tokens::CodeScanner;
use gl_core::{GlossaError, PatternClass, Result};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecompressionStats {
    pub input_size: usize,
    pub output_size: usize,
    /// Joined code pairs that got their space back.
    pub joins_split: usize,
    pub replacements: BTreeMap<PatternClass, usize>,
    /// `output_size - input_size`: what the compressed form saved.
    pub chars_saved: i64,
    /// `output_size / input_size`
    pub expansion_ratio: f64,
}

/// Every sigil in `text` must open a code known to its dictionary.
pub fn check_codes(text: &str, set: &DictionarySet, scanner: &CodeScanner) -> Result<()> {
    let escaper = Escaper::new(set.sigils());
    let corrupt = |byte: usize, reason: String| GlossaError::CorruptInput {
        offset: text[..byte].chars().count(),
        reason,
    };

    let mut last = 0;
    for token in scanner.tokens(text) {
        if let Some((at, sigil)) = escaper.find_raw_sigil(&text[last..token.start]) {
            let byte = last + text[last..].char_indices().nth(at).map_or(0, |(b, _)| b);
            return Err(corrupt(byte, format!("sigil {sigil:?} does not start a code")));
        }
        if !set.get(token.class).contains_code(token.text) {
            return Err(corrupt(token.start, format!("unknown {} code {}", token.class, token.text)));
        }
        last = token.end;
    }
    if let Some((at, sigil)) = escaper.find_raw_sigil(&text[last..]) {
        let byte = last + text[last..].char_indices().nth(at).map_or(0, |(b, _)| b);
        return Err(corrupt(byte, format!("sigil {sigil:?} does not start a code")));
    }
    Ok(())
}

/// Single-pass restore of one class. Expanded text is not rescanned.
pub fn restore_pass(text: &str, dictionary: &Dictionary, escaper: &Escaper) -> Result<(String, usize)> {
    if dictionary.is_empty() || !text.contains(dictionary.sigil()) {
        return Ok((text.to_string(), 0));
    }
    let alternatives: Vec<String> = dictionary
        .by_code_len_desc()
        .into_iter()
        .map(|e| regex::escape(&e.code))
        .collect();
    let re = Regex::new(&alternatives.join("|"))?;

    let mut count = 0;
    let restored = re.replace_all(text, |caps: &Captures| {
        count += 1;
        let code = &caps[0];
        dictionary
            .pattern(code)
            .map(|p| escaper.escape(p).into_owned())
            .unwrap_or_else(|| code.to_string())
    });
    Ok((restored.into_owned(), count))
}

/// Class restore order: the reverse of compression.
pub const RESTORE_ORDER: [PatternClass; 3] = [PatternClass::Word, PatternClass::Phrase, PatternClass::Template];

/// Reverse token join and every substitution pass, then unescape.
pub fn decompress(text: &str, set: &DictionarySet) -> Result<(String, DecompressionStats)> {
    decompress_ordered(text, set, &RESTORE_ORDER)
}

/// Like [`decompress`] with an explicit class order.
pub fn decompress_ordered(
    text: &str,
    set: &DictionarySet,
    order: &[PatternClass],
) -> Result<(String, DecompressionStats)> {
    let escaper = Escaper::new(set.sigils());
    let all = CodeScanner::new(set)?;
    check_codes(text, set, &all)?;

    let input_size = text.chars().count();
    let (mut current, joins_split) = split_tokens(text, &CodeScanner::joinable(set)?);

    let mut replacements = BTreeMap::new();
    for &class in order {
        let (next, count) = restore_pass(&current, set.get(class), &escaper)?;
        replacements.insert(class, count);
        current = next;
    }

    let output = escaper.unescape(&current)?;
    let output_size = output.chars().count();
    let expansion_ratio = if input_size == 0 {
        1.0
    } else {
        output_size as f64 / input_size as f64
    };
    debug!(
        input = input_size,
        output = output_size,
        joins = joins_split,
        saved = output_size as i64 - input_size as i64,
        ratio = expansion_ratio,
        "decompression"
    );
    Ok((
        output,
        DecompressionStats {
            input_size,
            output_size,
            joins_split,
            replacements,
            chars_saved: output_size as i64 - input_size as i64,
            expansion_ratio,
        },
    ))
}
