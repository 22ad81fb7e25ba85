use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while building a chain or generating text from it.
///
/// Reaching the end of the input or a prefix with no continuation is not
/// an error: both simply end the current pass.
#[derive(Error, Debug)]
pub enum ChainError {
	#[error("prefix length must be >= 1, got {0}")]
	InvalidOrder(usize),

	#[error("word count must be >= 1, got {0}")]
	InvalidWordCount(usize),

	#[error("failed to read input: {0}")]
	Read(#[source] io::Error),

	#[error("failed to write output: {0}")]
	Write(#[source] io::Error),

	#[error("failed to read config {}: {source}", path.display())]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("invalid config {}: {source}", path.display())]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},
}

pub type Result<T> = std::result::Result<T, ChainError>;
