//! Tiered code allocation.
//!
//! Each class draws codes from its own ladder of tiers, cheapest first.
//! Candidates are served in descending savings order; once the ladder or the
//! class cap is exhausted the remaining (lowest-savings) candidates are
//! dropped without error.

use crate::analyzer::Candidate;
use crate::dictionary::{DictEntry, Dictionary};
use gl_core::{ClassConfig, PatternClass, ReservedSet, Result, TierScheme};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Codes available to one tier after reserved filtering and capacity caps.
#[derive(Debug, Clone)]
pub struct TierSlots {
    pub scheme: TierScheme,
    pub codes: Vec<String>,
}

/// The full, ordered code space of one class.
#[derive(Debug, Clone)]
pub struct CodeSpace {
    sigil: char,
    tiers: Vec<TierSlots>,
}

impl CodeSpace {
    pub fn new(config: &ClassConfig, reserved: &ReservedSet) -> Self {
        let tiers = config
            .tiers
            .iter()
            .map(|spec| {
                let limit = spec.capacity.unwrap_or(usize::MAX);
                let codes = spec
                    .scheme
                    .suffixes()
                    .filter(|suffix| !reserved.is_reserved_suffix(suffix))
                    .map(|suffix| format!("{}{}", config.sigil, suffix))
                    .filter(|code| !reserved.is_reserved_code(code))
                    .take(limit)
                    .collect();
                TierSlots { scheme: spec.scheme, codes }
            })
            .collect();
        Self { sigil: config.sigil, tiers }
    }

    pub fn sigil(&self) -> char {
        self.sigil
    }

    pub fn tiers(&self) -> &[TierSlots] {
        &self.tiers
    }

    pub fn capacity(&self) -> usize {
        self.tiers.iter().map(|t| t.codes.len()).sum()
    }

    /// Codes in allocation order, tagged with their tier index.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.tiers
            .iter()
            .enumerate()
            .flat_map(|(tier, slots)| slots.codes.iter().map(move |c| (tier, c.as_str())))
    }
}

/// What happened to the candidates of one class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub class: Option<PatternClass>,
    pub candidates: usize,
    pub allocated: usize,
    pub skipped_reserved: usize,
    pub skipped_low_savings: usize,
    /// Dropped because the ladder or the class cap ran out.
    pub dropped_capacity: usize,
    /// Estimated savings of the allocated entries.
    pub total_savings: i64,
}

pub struct Allocation {
    pub dictionary: Dictionary,
    pub report: AllocationReport,
}

/// Rank candidates by savings at the cheapest code length of the ladder.
pub fn rank_by_savings<'c>(candidates: &'c [Candidate], config: &ClassConfig) -> Vec<&'c Candidate> {
    let code_len = config.cheapest_code_len();
    let mut ranked: Vec<&Candidate> = candidates.iter().collect();
    ranked.sort_by(|a, b| {
        b.savings(code_len)
            .cmp(&a.savings(code_len))
            .then_with(|| b.count.cmp(&a.count))
            .then_with(|| b.char_len().cmp(&a.char_len()))
            .then_with(|| a.pattern.cmp(&b.pattern))
    });
    ranked
}

/// Assign codes to `candidates` for one class.
pub fn allocate(
    class: PatternClass,
    candidates: &[Candidate],
    config: &ClassConfig,
    reserved: &ReservedSet,
) -> Result<Allocation> {
    let space = CodeSpace::new(config, reserved);
    let mut dictionary = Dictionary::new(
        class,
        config.sigil,
        config.tiers.iter().map(|t| t.scheme).collect(),
    );
    let mut report = AllocationReport {
        class: Some(class),
        candidates: candidates.len(),
        ..Default::default()
    };

    let mut codes = space.iter().peekable();
    for candidate in rank_by_savings(candidates, config) {
        if reserved.is_reserved_pattern(&candidate.pattern) {
            report.skipped_reserved += 1;
            continue;
        }
        if dictionary.len() >= config.max_entries {
            report.dropped_capacity += 1;
            continue;
        }
        let Some(&(tier, code)) = codes.peek() else {
            report.dropped_capacity += 1;
            continue;
        };
        let savings = candidate.savings(code.chars().count());
        if savings < config.min_savings {
            report.skipped_low_savings += 1;
            continue;
        }
        dictionary.insert(DictEntry {
            code: code.to_string(),
            pattern: candidate.pattern.clone(),
            tier,
            count: candidate.count,
        })?;
        codes.next();
        report.allocated += 1;
        report.total_savings += savings;
    }

    debug!(
        class = %class,
        capacity = space.capacity(),
        allocated = report.allocated,
        dropped = report.dropped_capacity,
        low_savings = report.skipped_low_savings,
        reserved = report.skipped_reserved,
        "code allocation"
    );
    Ok(Allocation { dictionary, report })
}
