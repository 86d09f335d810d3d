//! Ordered substitution passes.

use gl_core::{CodecConfig, GlossaError, Result, Strategy};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pass {
    pub strategy: Strategy,
    pub priority: u8,
}

/// The passes of one run, in compression order. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategyRegistry {
    passes: Vec<Pass>,
}

impl StrategyRegistry {
    /// Templates, phrases, words, then token join when enabled.
    pub fn new(config: &CodecConfig) -> Self {
        let mut passes = vec![
            Pass { strategy: Strategy::Template, priority: 0 },
            Pass { strategy: Strategy::Phrase, priority: 1 },
            Pass { strategy: Strategy::Word, priority: 2 },
        ];
        if config.token_join {
            passes.push(Pass { strategy: Strategy::TokenJoin, priority: 3 });
        }
        Self { passes }
    }

    /// Custom pass list. Passes are sorted by priority; the class passes must
    /// keep template < phrase < word and token join, if present, comes last.
    pub fn with_passes(mut passes: Vec<Pass>) -> Result<Self> {
        passes.sort_by_key(|p| p.priority);
        for (i, pass) in passes.iter().enumerate() {
            if passes[..i].iter().any(|p| p.strategy == pass.strategy) {
                return Err(GlossaError::config(format!(
                    "strategy {} registered twice",
                    pass.strategy.as_str()
                )));
            }
        }
        let classes: Vec<_> = passes.iter().filter_map(|p| p.strategy.class()).collect();
        if classes.windows(2).any(|w| w[0] >= w[1]) {
            return Err(GlossaError::config(
                "substitution passes must run template, phrase, word in that order",
            ));
        }
        if let Some(pos) = passes.iter().position(|p| p.strategy == Strategy::TokenJoin) {
            if pos + 1 != passes.len() {
                return Err(GlossaError::config("token join must be the last pass"));
            }
        }
        Ok(Self { passes })
    }

    pub fn passes(&self) -> &[Pass] {
        &self.passes
    }

    pub fn compression_order(&self) -> Vec<Strategy> {
        self.passes.iter().map(|p| p.strategy).collect()
    }

    /// Exact reverse of the compression order.
    pub fn decompression_order(&self) -> Vec<Strategy> {
        self.passes.iter().rev().map(|p| p.strategy).collect()
    }

    pub fn is_enabled(&self, strategy: Strategy) -> bool {
        self.passes.iter().any(|p| p.strategy == strategy)
    }
}
