use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ChainError, Result};

pub const DEFAULT_WORDS: usize = 100;
pub const DEFAULT_PREFIX: usize = 2;

/// Run parameters shared by the learning and generation passes.
///
/// Can be loaded from a JSON file; missing fields keep their defaults:
///
/// ```json
/// { "words": 250, "prefix": 3, "seed": 42 }
/// ```
///
/// # Invariants (after `validate`)
/// - `words >= 1`
/// - `prefix >= 1`
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	/// Maximum number of words to generate.
	pub words: usize,

	/// Prefix length (Markov order). The same value keys learning and generation.
	pub prefix: usize,

	/// Fixed seed for the random source. `None` seeds from the clock.
	pub seed: Option<u64>,
}

impl Default for Config {
	fn default() -> Self {
		Self { words: DEFAULT_WORDS, prefix: DEFAULT_PREFIX, seed: None }
	}
}

impl Config {
	/// Reads and validates a JSON config file.
	///
	/// # Errors
	/// - [`ChainError::ConfigRead`] if the file cannot be read
	/// - [`ChainError::ConfigParse`] if it is not a valid config object
	/// - any error from [`Config::validate`]
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path)
			.map_err(|source| ChainError::ConfigRead { path: path.to_owned(), source })?;
		let config: Self = serde_json::from_str(&text)
			.map_err(|source| ChainError::ConfigParse { path: path.to_owned(), source })?;
		config.validate()?;
		Ok(config)
	}

	/// Checks that both counts are positive.
	pub fn validate(&self) -> Result<()> {
		if self.words < 1 {
			return Err(ChainError::InvalidWordCount(self.words));
		}
		if self.prefix < 1 {
			return Err(ChainError::InvalidOrder(self.prefix));
		}
		Ok(())
	}
}
