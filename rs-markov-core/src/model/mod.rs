//! Word-level Markov chain: learning and generation.
//!
//! - Sliding word window used as lookup key (`Prefix`)
//! - The learned prefix -> suffixes table (`Chain`)
//! - Incremental learning from a token stream (`ChainBuilder`)
//! - Random walk over a learned chain (`Generator`)
//! - Pluggable source of randomness (`SuffixPicker`)

/// Fixed-length sliding window of words.
pub mod prefix;

/// Prefix -> observed suffixes table.
///
/// Built once, then only read.
pub mod chain;

/// Fills a chain from words or readers.
pub mod builder;

/// Random walk producing text from a chain.
///
/// Stops on the word limit or on the first prefix with no continuation.
pub mod generator;

/// Randomness used to pick among recorded suffixes.
pub mod picker;

pub use builder::ChainBuilder;
pub use chain::Chain;
pub use generator::{Generation, Generator, Stop, Walk, Written};
pub use picker::{RandomPicker, SuffixPicker, time_seed};
pub use prefix::Prefix;
