use std::collections::VecDeque;
use std::fmt;

/// Sliding window over the most recent words of a text.
///
/// A `Prefix` of order `n` always holds exactly `n` words. A fresh prefix
/// is filled with empty strings, which is how the first words of a text
/// get keyed during learning and how generation finds its starting point.
///
/// The prefix itself is used as the chain key: two prefixes are equal
/// (and hash the same) exactly when their word sequences are equal.
///
/// ## Invariants
/// - `words.len()` never changes after construction
/// - `words.len() >= 1` when built through `Chain`
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prefix {
	words: VecDeque<String>,
}

impl Prefix {
	/// Creates a prefix of `order` empty words.
	pub fn new(order: usize) -> Self {
		Self { words: std::iter::repeat_n(String::new(), order).collect() }
	}

	/// Creates a prefix holding the given words, oldest first.
	pub fn from_words<I, S>(words: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { words: words.into_iter().map(Into::into).collect() }
	}

	/// Number of words in the window.
	pub fn order(&self) -> usize {
		self.words.len()
	}

	/// Words in the window, oldest first.
	pub fn words(&self) -> impl Iterator<Item = &str> {
		self.words.iter().map(String::as_str)
	}

	/// Drops the oldest word and appends `word`, keeping the order unchanged.
	pub fn shift(&mut self, word: impl Into<String>) {
		if self.words.pop_front().is_some() {
			self.words.push_back(word.into());
		}
	}

	/// Canonical textual key: the words joined by a single space.
	pub fn key(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for Prefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for (i, word) in self.words.iter().enumerate() {
			if i > 0 {
				f.write_str(" ")?;
			}
			f.write_str(word)?;
		}
		Ok(())
	}
}
