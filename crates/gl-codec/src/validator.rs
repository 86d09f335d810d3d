//! Round-trip and token-join validation. Failures are reported as data.

use crate::tokens::CodeScanner;
use gl_core::CaseMode;
use serde::{Deserialize, Serialize};
use std::fmt;

const EXCERPT_CHARS: usize = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ValidationStatus {
    Pass,
    Fail,
}

impl ValidationStatus {
    pub fn is_pass(&self) -> bool {
        *self == Self::Pass
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        })
    }
}

/// First point where two texts diverge. `offset` counts chars; `line` and
/// `column` are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
    pub expected: String,
    pub actual: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundTripReport {
    pub status: ValidationStatus,
    pub original_chars: usize,
    pub restored_chars: usize,
    pub mismatch: Option<Mismatch>,
}

impl RoundTripReport {
    pub fn is_pass(&self) -> bool {
        self.status.is_pass()
    }
}

impl fmt::Display for RoundTripReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (original {} chars, restored {} chars)",
            self.status, self.original_chars, self.restored_chars
        )?;
        if let Some(m) = &self.mismatch {
            write!(
                f,
                ": first difference at char {} (line {}, column {}): expected {:?}, got {:?}",
                m.offset, m.line, m.column, m.expected, m.actual
            )?;
        }
        Ok(())
    }
}

fn find_mismatch(expected: &str, actual: &str) -> Option<Mismatch> {
    let mut line = 1;
    let mut column = 1;
    let mut a = expected.char_indices();
    let mut b = actual.char_indices();
    let mut offset = 0;
    loop {
        match (a.next(), b.next()) {
            (None, None) => return None,
            (x, y) if x.map(|(_, c)| c) == y.map(|(_, c)| c) => {
                if let Some((_, '\n')) = x {
                    line += 1;
                    column = 1;
                } else {
                    column += 1;
                }
                offset += 1;
            }
            (x, y) => {
                let excerpt = |text: &str, at: Option<(usize, char)>| -> String {
                    at.map(|(i, _)| text[i..].chars().take(EXCERPT_CHARS).collect())
                        .unwrap_or_default()
                };
                return Some(Mismatch {
                    offset,
                    line,
                    column,
                    expected: excerpt(expected, x),
                    actual: excerpt(actual, y),
                });
            }
        }
    }
}

/// Compare restored text against the original. Under [`CaseMode::Fold`] both
/// sides are lowercased first.
pub fn validate_roundtrip(original: &str, restored: &str, case_mode: CaseMode) -> RoundTripReport {
    let mismatch = match case_mode {
        CaseMode::Preserve => find_mismatch(original, restored),
        CaseMode::Fold => find_mismatch(&original.to_lowercase(), &restored.to_lowercase()),
    };
    RoundTripReport {
        status: if mismatch.is_none() { ValidationStatus::Pass } else { ValidationStatus::Fail },
        original_chars: original.chars().count(),
        restored_chars: restored.chars().count(),
        mismatch,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenJoinReport {
    pub status: ValidationStatus,
    pub chars_before: usize,
    pub chars_after: usize,
    pub tokens_before: usize,
    pub tokens_after: usize,
}

/// The join pass must keep the code sequence intact and only ever remove
/// chars.
pub fn validate_token_join(before: &str, after: &str, scanner: &CodeScanner) -> TokenJoinReport {
    let tokens_before = scanner.token_texts(before);
    let tokens_after = scanner.token_texts(after);
    let chars_before = before.chars().count();
    let chars_after = after.chars().count();
    let ok = tokens_before == tokens_after && chars_after <= chars_before;
    TokenJoinReport {
        status: if ok { ValidationStatus::Pass } else { ValidationStatus::Fail },
        chars_before,
        chars_after,
        tokens_before: tokens_before.len(),
        tokens_after: tokens_after.len(),
    }
}
