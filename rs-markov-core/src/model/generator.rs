use std::io::{BufWriter, Write};

use log::{debug, trace, warn};

use super::chain::Chain;
use super::picker::SuffixPicker;
use super::prefix::Prefix;
use crate::error::{ChainError, Result};

/// Why a generation pass ended without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stop {
	/// The current prefix has no recorded continuation.
	Exhausted,
	/// The requested number of words was produced.
	LimitReached,
}

/// Words produced by [`Generator::generate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
	pub words: Vec<String>,
	pub stop: Stop,
}

impl Generation {
	/// Words joined by single spaces.
	pub fn text(&self) -> String {
		self.words.join(" ")
	}
}

/// Result of a streamed pass through [`Generator::write_to`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Written {
	pub words: usize,
	pub stop: Stop,
}

/// Produces text from a learned [`Chain`].
///
/// # Responsibilities
/// - Walk the chain from the empty prefix, one word at a time
/// - Delegate every choice to a [`SuffixPicker`]
/// - Stop on the word limit or on the first unknown prefix
///
/// The chain is only ever read, so any number of generators may share it.
/// Each pass owns its own sliding prefix.
pub struct Generator<'c, P> {
	chain: &'c Chain,
	picker: P,
}

impl<'c, P: SuffixPicker> Generator<'c, P> {
	pub fn new(chain: &'c Chain, picker: P) -> Self {
		Self { chain, picker }
	}

	/// Starts a lazy pass producing at most `max_words` words.
	pub fn walk(&mut self, max_words: usize) -> Walk<'c, '_, P> {
		Walk {
			chain: self.chain,
			picker: &mut self.picker,
			prefix: Prefix::new(self.chain.order()),
			remaining: max_words,
			stop: None,
		}
	}

	/// Collects a full pass of at most `max_words` words.
	pub fn generate(&mut self, max_words: usize) -> Generation {
		let mut walk = self.walk(max_words);
		let words: Vec<String> = walk.by_ref().map(str::to_owned).collect();
		let stop = walk.stop().unwrap_or(Stop::Exhausted);

		debug!("generated {} words ({:?})", words.len(), stop);
		Generation { words, stop }
	}

	/// Streams a pass of at most `max_words` words to `writer`,
	/// separated by single spaces.
	///
	/// The output is flushed before returning. No trailing separator or
	/// newline is written.
	///
	/// # Errors
	/// The first write (or flush) failure aborts the pass and is returned
	/// as [`ChainError::Write`].
	pub fn write_to<W: Write>(&mut self, writer: W, max_words: usize) -> Result<Written> {
		let mut out = BufWriter::new(writer);
		let mut walk = self.walk(max_words);
		let mut words = 0;

		for word in walk.by_ref() {
			if words > 0 {
				out.write_all(b" ").map_err(ChainError::Write)?;
			}
			out.write_all(word.as_bytes()).map_err(ChainError::Write)?;
			words += 1;
		}
		out.flush().map_err(ChainError::Write)?;

		let stop = walk.stop().unwrap_or(Stop::Exhausted);
		debug!("wrote {} words ({:?})", words, stop);
		Ok(Written { words, stop })
	}
}

/// One generation pass, as an iterator over the chosen words.
///
/// Yields words until the limit is reached or the current prefix has no
/// continuation. Once it returns `None` it stays finished, and
/// [`Walk::stop`] tells which condition ended it.
pub struct Walk<'c, 'g, P> {
	chain: &'c Chain,
	picker: &'g mut P,
	prefix: Prefix,
	remaining: usize,
	stop: Option<Stop>,
}

impl<P> Walk<'_, '_, P> {
	/// `None` while the pass is still running.
	pub fn stop(&self) -> Option<Stop> {
		self.stop
	}

	/// Current sliding window.
	pub fn prefix(&self) -> &Prefix {
		&self.prefix
	}
}

impl<'c, P: SuffixPicker> Iterator for Walk<'c, '_, P> {
	type Item = &'c str;

	fn next(&mut self) -> Option<Self::Item> {
		if self.stop.is_some() {
			return None;
		}
		if self.remaining == 0 {
			self.stop = Some(Stop::LimitReached);
			return None;
		}

		let suffixes = match self.chain.suffixes(&self.prefix) {
			Some(words) if !words.is_empty() => words,
			_ => {
				self.stop = Some(Stop::Exhausted);
				return None;
			}
		};

		let index = self.picker.pick(suffixes.len());
		debug_assert!(
			index < suffixes.len(),
			"picker returned {} for {} candidates",
			index,
			suffixes.len()
		);
		let Some(word) = suffixes.get(index).map(String::as_str) else {
			warn!("picker returned {} for {} candidates, ending walk", index, suffixes.len());
			self.stop = Some(Stop::Exhausted);
			return None;
		};

		trace!("[{}] -> {}", self.prefix, word);
		self.prefix.shift(word);
		self.remaining -= 1;
		Some(word)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::picker::RandomPicker;
	use std::io::{self, Cursor};

	/// Always takes the first recorded suffix.
	struct FirstPicker;

	impl SuffixPicker for FirstPicker {
		fn pick(&mut self, _candidates: usize) -> usize {
			0
		}
	}

	/// Replays a fixed list of indices, then falls back to the first suffix.
	struct ScriptedPicker(std::vec::IntoIter<usize>);

	impl ScriptedPicker {
		fn new(choices: &[usize]) -> Self {
			Self(choices.to_vec().into_iter())
		}
	}

	impl SuffixPicker for ScriptedPicker {
		fn pick(&mut self, _candidates: usize) -> usize {
			self.0.next().unwrap_or(0)
		}
	}

	fn chain_from(order: usize, text: &str) -> Chain {
		let mut chain = Chain::new(order).unwrap();
		chain.build(Cursor::new(text.as_bytes())).unwrap();
		chain
	}

	#[test]
	fn test_first_choice_replays_text() {
		let chain = chain_from(2, "the cat sat the cat ran");
		let generation = Generator::new(&chain, FirstPicker).generate(6);
		assert_eq!(generation.text(), "the cat sat the cat sat");
		assert_eq!(generation.stop, Stop::LimitReached);
	}

	#[test]
	fn test_scripted_choice_reaches_end_of_text() {
		let chain = chain_from(2, "the cat sat the cat ran");
		let mut generator = Generator::new(&chain, ScriptedPicker::new(&[0, 0, 0, 0, 0, 1]));
		let generation = generator.generate(100);
		assert_eq!(generation.text(), "the cat sat the cat ran");
		assert_eq!(generation.stop, Stop::Exhausted);
	}

	#[test]
	fn test_empty_chain_produces_nothing() {
		let chain = Chain::new(2).unwrap();
		let generation = Generator::new(&chain, FirstPicker).generate(100);
		assert!(generation.words.is_empty());
		assert_eq!(generation.stop, Stop::Exhausted);
	}

	#[test]
	fn test_zero_limit() {
		let chain = chain_from(1, "a b c");
		let generation = Generator::new(&chain, FirstPicker).generate(0);
		assert!(generation.words.is_empty());
		assert_eq!(generation.stop, Stop::LimitReached);
	}

	#[test]
	fn test_cap_bounds_a_cycle() {
		let chain = chain_from(1, "x x x x");
		let generation = Generator::new(&chain, RandomPicker::seeded(3)).generate(10_000);
		assert_eq!(generation.words.len(), 10_000);
		assert!(generation.words.iter().all(|w| w == "x"));
		assert_eq!(generation.stop, Stop::LimitReached);
	}

	#[test]
	fn test_never_exceeds_limit() {
		let chain = chain_from(2, "a b a b c a b a c b a b c c a");
		let mut generator = Generator::new(&chain, RandomPicker::seeded(11));
		for limit in 0..40 {
			assert!(generator.generate(limit).words.len() <= limit);
		}
	}

	#[test]
	fn test_words_are_recorded_suffixes() {
		let chain = chain_from(2, "I am what I am and I do what I do when I am");
		let mut generator = Generator::new(&chain, RandomPicker::seeded(5));
		for _ in 0..50 {
			let mut prefix = Prefix::new(2);
			for word in generator.generate(30).words {
				assert!(chain.suffixes(&prefix).unwrap().contains(&word));
				prefix.shift(word);
			}
		}
	}

	#[test]
	fn test_frequency_weighting() {
		// [a] -> [b, b, c]
		let chain = chain_from(1, "a b a b a c");
		let mut generator = Generator::new(&chain, RandomPicker::seeded(99));
		let runs = 3000;
		let mut b = 0;
		for _ in 0..runs {
			let words = generator.generate(2).words;
			if words[1] == "b" {
				b += 1;
			}
		}
		let ratio = b as f64 / runs as f64;
		assert!((0.60..0.73).contains(&ratio), "ratio = {ratio}");
	}

	#[test]
	fn test_walk_is_fused() {
		let chain = chain_from(1, "a b");
		let mut generator = Generator::new(&chain, FirstPicker);
		let mut walk = generator.walk(10);
		assert_eq!(walk.stop(), None);
		assert_eq!(walk.next(), Some("a"));
		assert_eq!(walk.next(), Some("b"));
		assert_eq!(walk.prefix(), &Prefix::from_words(["b"]));
		assert_eq!(walk.next(), None);
		assert_eq!(walk.stop(), Some(Stop::Exhausted));
		assert_eq!(walk.next(), None);
	}

	/// Breaks the picker contract by answering past the last candidate.
	struct OutOfRange;

	impl SuffixPicker for OutOfRange {
		fn pick(&mut self, candidates: usize) -> usize {
			candidates + 5
		}
	}

	#[test]
	#[cfg(debug_assertions)]
	#[should_panic(expected = "picker returned 6 for 1 candidates")]
	fn test_out_of_range_pick_panics_in_debug() {
		let chain = chain_from(1, "a b a c");
		Generator::new(&chain, OutOfRange).generate(2);
	}

	#[test]
	#[cfg(not(debug_assertions))]
	fn test_out_of_range_pick_ends_walk() {
		let chain = chain_from(1, "a b a c");
		let generation = Generator::new(&chain, OutOfRange).generate(2);
		assert!(generation.words.is_empty());
		assert_eq!(generation.stop, Stop::Exhausted);
	}

	#[test]
	fn test_write_to_joins_with_spaces() {
		let chain = chain_from(2, "the cat sat the cat ran");
		let mut out = Vec::new();
		let written = Generator::new(&chain, FirstPicker).write_to(&mut out, 4).unwrap();
		assert_eq!(String::from_utf8(out).unwrap(), "the cat sat the");
		assert_eq!(written, Written { words: 4, stop: Stop::LimitReached });
	}

	#[test]
	fn test_write_to_empty_chain() {
		let chain = Chain::new(3).unwrap();
		let mut out = Vec::new();
		let written = Generator::new(&chain, FirstPicker).write_to(&mut out, 10).unwrap();
		assert!(out.is_empty());
		assert_eq!(written.words, 0);
		assert_eq!(written.stop, Stop::Exhausted);
	}

	struct ClosedPipe;

	impl Write for ClosedPipe {
		fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
			Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
		}

		fn flush(&mut self) -> io::Result<()> {
			Ok(())
		}
	}

	#[test]
	fn test_write_failure_is_fatal() {
		let chain = chain_from(1, "a a a");
		let err = Generator::new(&chain, FirstPicker).write_to(ClosedPipe, 5).unwrap_err();
		match err {
			ChainError::Write(e) => assert_eq!(e.kind(), io::ErrorKind::BrokenPipe),
			other => panic!("unexpected error: {other}"),
		}
	}
}
