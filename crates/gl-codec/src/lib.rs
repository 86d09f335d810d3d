//! Glossa dictionary codec.
//!
//! Passes, in compression order:
//! 1. Templates: recurring markdown blocks (`§` codes)
//! 2. Phrases: recurring 2 to 5 word runs (`€` codes)
//! 3. Words: recurring long words (`$` codes)
//! 4. Token join: glue adjacent phrase/word codes
//!
//! Decompression runs the same chain backwards and is lossless.

pub mod allocator;
pub mod analyzer;
pub mod compressor;
pub mod decompressor;
pub mod dictionary;
pub mod escape;
pub mod pipeline;
pub mod registry;
pub mod token_join;
pub mod tokens;
pub mod validator;

pub use allocator::{allocate, AllocationReport};
pub use analyzer::{Candidate, FrequencyAnalyzer};
pub use decompressor::{decompress, DecompressionStats};
pub use dictionary::{DictEntry, Dictionary, DictionarySet};
pub use pipeline::{CompressionResult, CompressionStats, DictionaryCodec};
pub use registry::{Pass, StrategyRegistry};
pub use validator::{validate_roundtrip, RoundTripReport, ValidationStatus};
