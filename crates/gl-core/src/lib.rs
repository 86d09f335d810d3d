//! Shared types, configuration and errors for the Glossa dictionary codec.

pub mod config;
pub mod error;
pub mod types;

pub use config::{AnalyzerConfig, ClassConfig, CodecConfig, ReservedConfig};
pub use error::{GlossaError, Result};
pub use types::{CaseMode, PatternClass, ReservedSet, Strategy, TierScheme, TierSpec, ESCAPE};

#[cfg(test)]
mod tests;
