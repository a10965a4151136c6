//! Fuzzy matching of free text against stop names.
//!
//! Users type (or dictate) stop names with typos, missing accents and odd
//! capitalisation. This module turns such text into at most one catalog
//! stop using case-insensitive edit distance and a caller-chosen acceptance
//! threshold.

mod distance;
mod resolver;
mod threshold;

pub use distance::{distance, fold};
pub use resolver::{MatchMethod, ResolvedMatch, StopResolver, resolve};
pub use threshold::ThresholdPolicy;

pub(crate) use resolver::Query;
