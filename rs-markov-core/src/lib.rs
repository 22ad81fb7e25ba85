//! Word-level Markov chain text generation library.
//!
//! This crate learns which words follow each run of `n` words in a text,
//! then walks that table at random to produce new text:
//! - Streaming, whitespace-based tokenization of any reader
//! - Order-`n` chain keyed by the preceding words
//! - Frequency-weighted random generation with a replaceable random source
//! - Run configuration with JSON file support
//!
//! Nothing is persisted: a chain lives as long as the process that built it.

/// Core chain model, builder and generator.
pub mod model;

/// Run parameters (word limit, prefix length, seed).
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

/// Input helpers: opening a source and splitting it into tokens.
pub mod io;

pub use config::Config;
pub use error::{ChainError, Result};
