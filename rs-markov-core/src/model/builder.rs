use std::io::BufRead;

use log::{debug, trace};

use super::chain::Chain;
use super::prefix::Prefix;
use crate::error::{ChainError, Result};
use crate::io::tokens;

/// Fills a [`Chain`] from a stream of words.
///
/// The builder only holds the sliding prefix and a borrow of the chain.
/// For every word:
/// 1. the word is appended to the suffixes of the current prefix
/// 2. the prefix shifts to include the word
///
/// The prefix starts as `order` empty words, so the opening words of the
/// text are learned as continuations of partially empty prefixes. Feeding
/// several readers through the same builder continues the same window.
pub struct ChainBuilder<'a> {
	chain: &'a mut Chain,
	prefix: Prefix,
}

impl<'a> ChainBuilder<'a> {
	pub fn new(chain: &'a mut Chain) -> Self {
		let prefix = Prefix::new(chain.order());
		Self { chain, prefix }
	}

	/// Learns a single word.
	pub fn push(&mut self, word: &str) {
		trace!("learn [{}] -> {}", self.prefix, word);
		self.chain.add(&self.prefix, word);
		self.prefix.shift(word);
	}

	/// Learns every word of an in-memory sequence.
	///
	/// Words are taken as-is: callers are expected to pass tokens that are
	/// non-empty and free of whitespace.
	pub fn extend<I, S>(&mut self, words: I)
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		for word in words {
			self.push(word.as_ref());
		}
	}

	/// Learns every whitespace-delimited token of `reader` until end of input.
	///
	/// Returns the number of tokens read.
	///
	/// # Errors
	/// The first read error aborts the pass and is returned as
	/// [`ChainError::Read`].
	pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<usize> {
		let mut count = 0;
		for token in tokens(reader) {
			let token = token.map_err(ChainError::Read)?;
			self.push(&token);
			count += 1;
		}

		debug!(
			"learned {} tokens, chain has {} prefixes / {} suffixes",
			count,
			self.chain.len(),
			self.chain.token_count()
		);
		Ok(count)
	}

	/// Current sliding window.
	pub fn prefix(&self) -> &Prefix {
		&self.prefix
	}
}
