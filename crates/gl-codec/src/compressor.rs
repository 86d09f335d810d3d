//! Substitution compressor: pattern to code, longest pattern first.

use crate::dictionary::{DictEntry, Dictionary};
use crate::escape::Escaper;
use crate::tokens::{map_literals, CodeScanner};
use gl_core::{CaseMode, PatternClass, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Statistics of one substitution pass (sizes in chars).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    pub class: Option<PatternClass>,
    pub replacements: usize,
    pub chars_saved: i64,
    pub size_before: usize,
    pub size_after: usize,
    /// Entries that never matched during this pass.
    pub unused_entries: usize,
}

/// `[Tt][Hh][Ee]` style ASCII-only case folding, so that Unicode case rules
/// never widen a match beyond the pattern's own letters.
fn ascii_case_insensitive(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 4);
    for c in pattern.chars() {
        if c.is_ascii_alphabetic() {
            out.push('[');
            out.push(c.to_ascii_lowercase());
            out.push(c.to_ascii_uppercase());
            out.push(']');
        } else {
            out.push_str(&regex::escape(&c.to_string()));
        }
    }
    out
}

/// Matcher for one dictionary entry, already escaped against sigils.
pub fn entry_regex(
    entry: &DictEntry,
    class: PatternClass,
    case_mode: CaseMode,
    escaper: &Escaper,
) -> Result<Regex> {
    let escaped = escaper.escape(&entry.pattern);
    let body = match (class.is_word_bounded(), case_mode) {
        (false, _) => regex::escape(&escaped),
        (true, CaseMode::Preserve) => format!(r"\b{}\b", regex::escape(&escaped)),
        (true, CaseMode::Fold) => format!(r"\b{}\b", ascii_case_insensitive(&escaped)),
    };
    Ok(Regex::new(&body)?)
}

/// Replace every match of `re` with `code`, skipping spans that are already
/// codes. Returns the rewritten text and the number of replacements.
pub fn replace_outside_codes(text: &str, re: &Regex, code: &str, codes: &CodeScanner) -> (String, usize) {
    let mut count = 0;
    let out = map_literals(text, codes, |literal, out| {
        let mut last = 0;
        for m in re.find_iter(literal) {
            out.push_str(&literal[last..m.start()]);
            out.push_str(code);
            last = m.end();
            count += 1;
        }
        out.push_str(&literal[last..]);
    });
    (out, count)
}

/// Run one class pass over `text` (which must already be escaped).
pub fn compress_pass(
    text: &str,
    dictionary: &Dictionary,
    case_mode: CaseMode,
    escaper: &Escaper,
    codes: &CodeScanner,
) -> Result<(String, PassStats)> {
    let class = dictionary.class();
    let size_before = text.chars().count();
    let mut stats = PassStats {
        class: Some(class),
        size_before,
        size_after: size_before,
        ..Default::default()
    };
    if text.is_empty() || dictionary.is_empty() {
        return Ok((text.to_string(), stats));
    }

    let mut result = text.to_string();
    for entry in dictionary.by_pattern_len_desc() {
        let re = entry_regex(entry, class, case_mode, escaper)?;
        if !re.is_match(&result) {
            stats.unused_entries += 1;
            continue;
        }
        let (next, count) = replace_outside_codes(&result, &re, &entry.code, codes);
        if count == 0 {
            stats.unused_entries += 1;
            continue;
        }
        result = next;
        stats.replacements += count;
    }

    stats.size_after = result.chars().count();
    stats.chars_saved = size_before as i64 - stats.size_after as i64;
    debug!(
        class = %class,
        replacements = stats.replacements,
        saved = stats.chars_saved,
        unused = stats.unused_entries,
        "compression pass"
    );
    Ok((result, stats))
}
