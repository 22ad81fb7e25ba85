use std::collections::HashMap;
use std::io::BufRead;

use super::builder::ChainBuilder;
use super::prefix::Prefix;
use crate::error::{ChainError, Result};

/// Word-level Markov chain.
///
/// Maps every prefix of `order` words seen in the learning text to the
/// words that followed it, in the order they were seen. Duplicates are
/// kept: a suffix observed three times occupies three slots, which is what
/// makes frequent continuations proportionally more likely at generation.
///
/// # Responsibilities
/// - Own every learned word
/// - Answer suffix lookups for a prefix, read-only, once learning is done
///
/// # Invariants
/// - `order >= 1`
/// - Every stored suffix list is non-empty
/// - Every stored prefix has exactly `order` words
/// - `token_count` equals the total number of stored suffixes
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
	order: usize,
	suffixes: HashMap<Prefix, Vec<String>>,
	token_count: usize,
}

impl Chain {
	/// Creates an empty chain keyed by prefixes of `order` words.
	///
	/// # Errors
	/// Returns an error if `order < 1`.
	pub fn new(order: usize) -> Result<Self> {
		if order < 1 {
			return Err(ChainError::InvalidOrder(order));
		}
		Ok(Self { order, suffixes: HashMap::new(), token_count: 0 })
	}

	/// Learns every token of `reader`, starting from an empty prefix.
	///
	/// Returns the number of tokens read.
	///
	/// # Errors
	/// Any read error aborts the build. Words read before the failure stay
	/// in the chain.
	pub fn build<R: BufRead>(&mut self, reader: R) -> Result<usize> {
		ChainBuilder::new(self).read_from(reader)
	}

	/// Starts an incremental build (see [`ChainBuilder`]).
	pub fn builder(&mut self) -> ChainBuilder<'_> {
		ChainBuilder::new(self)
	}

	/// Number of words per prefix.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Number of distinct prefixes.
	pub fn len(&self) -> usize {
		self.suffixes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.suffixes.is_empty()
	}

	/// Total number of learned words.
	pub fn token_count(&self) -> usize {
		self.token_count
	}

	/// Words observed after `prefix`, first seen first.
	pub fn suffixes(&self, prefix: &Prefix) -> Option<&[String]> {
		self.suffixes.get(prefix).map(Vec::as_slice)
	}

	/// Same as [`Chain::suffixes`], addressed by the space-joined key.
	///
	/// Returns `None` when the key does not split into exactly `order` words.
	pub fn suffixes_for_key(&self, key: &str) -> Option<&[String]> {
		let prefix = Prefix::from_words(key.split(' '));
		if prefix.order() != self.order {
			return None;
		}
		self.suffixes(&prefix)
	}

	/// Iterates over the known prefixes, in no particular order.
	pub fn prefixes(&self) -> impl Iterator<Item = &Prefix> {
		self.suffixes.keys()
	}

	/// Records `word` as a continuation of `prefix`.
	pub(crate) fn add(&mut self, prefix: &Prefix, word: &str) {
		match self.suffixes.get_mut(prefix) {
			Some(words) => words.push(word.to_owned()),
			None => {
				self.suffixes.insert(prefix.clone(), vec![word.to_owned()]);
			}
		}
		self.token_count += 1;
	}
}
