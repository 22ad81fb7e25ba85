use std::collections::VecDeque;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Opens the text source a chain is built from.
///
/// - `Some(path)`: buffered reader over the file
/// - `None`: locked standard input
pub fn open_input(path: Option<&Path>) -> io::Result<Box<dyn BufRead>> {
	match path {
		Some(path) => Ok(Box::new(BufReader::new(File::open(path)?))),
		None => Ok(Box::new(io::stdin().lock())),
	}
}

/// Wraps a reader into a stream of whitespace-delimited tokens.
pub fn tokens<R: BufRead>(reader: R) -> Tokens<R> {
	Tokens::new(reader)
}

/// Streaming tokenizer over any buffered reader.
///
/// Input is scanned one buffer at a time and only the token currently
/// being read is kept between calls, so arbitrarily long (or endless)
/// streams never have to fit in memory, with or without newlines. Any run
/// of Unicode whitespace is a separator and empty tokens are never
/// produced.
///
/// Bytes that are not valid UTF-8 are replaced by U+FFFD. A read failure
/// is yielded once as `Err`, after which the stream is over.
pub struct Tokens<R> {
	reader: R,
	partial: Vec<u8>,
	pending: VecDeque<String>,
	done: bool,
}

impl<R: BufRead> Tokens<R> {
	pub fn new(reader: R) -> Self {
		Self {
			reader,
			partial: Vec::new(),
			pending: VecDeque::new(),
			done: false,
		}
	}

	/// Underlying reader.
	pub fn get_ref(&self) -> &R {
		&self.reader
	}

	/// Decodes the bytes of the token in progress.
	///
	/// The byte scan only splits on ASCII whitespace; other Unicode
	/// separators are split here, once the bytes are decoded.
	fn finish_partial(&mut self) {
		{
			let text = String::from_utf8_lossy(&self.partial);
			self.pending.extend(text.split_whitespace().map(str::to_owned));
		}
		self.partial.clear();
	}
}

impl<R: BufRead> Iterator for Tokens<R> {
	type Item = io::Result<String>;

	fn next(&mut self) -> Option<Self::Item> {
		loop {
			if let Some(token) = self.pending.pop_front() {
				return Some(Ok(token));
			}
			if self.done {
				return None;
			}

			let buf = match self.reader.fill_buf() {
				Ok(buf) => buf,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
				Err(e) => {
					self.done = true;
					return Some(Err(e));
				}
			};

			if buf.is_empty() {
				self.done = true;
				self.finish_partial();
				continue;
			}

			let mut consumed = 0;
			let mut complete = false;
			for &byte in buf {
				consumed += 1;
				if byte.is_ascii_whitespace() {
					if !self.partial.is_empty() {
						complete = true;
						break;
					}
				} else {
					self.partial.push(byte);
				}
			}

			self.reader.consume(consumed);
			if complete {
				self.finish_partial();
			}
		}
	}
}
