use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Chooses which recorded suffix comes next during generation.
///
/// Implementations must return an index in `0..candidates`; `candidates`
/// is always at least 1.
pub trait SuffixPicker {
	fn pick(&mut self, candidates: usize) -> usize;
}

impl<P: SuffixPicker + ?Sized> SuffixPicker for &mut P {
	fn pick(&mut self, candidates: usize) -> usize {
		(**self).pick(candidates)
	}
}

/// Uniform picker backed by any `rand` generator.
///
/// Every recorded occurrence is equally likely, so a suffix stored
/// `k` times is `k` times as likely as one stored once.
#[derive(Debug, Clone)]
pub struct RandomPicker<R> {
	rng: R,
}

impl<R: Rng> RandomPicker<R> {
	pub fn new(rng: R) -> Self {
		Self { rng }
	}
}

impl RandomPicker<StdRng> {
	/// Deterministic picker: the same seed replays the same choices.
	pub fn seeded(seed: u64) -> Self {
		Self::new(StdRng::seed_from_u64(seed))
	}

	/// Picker seeded from the wall clock (see [`time_seed`]).
	pub fn from_time() -> Self {
		Self::seeded(time_seed())
	}
}

impl<R: Rng> SuffixPicker for RandomPicker<R> {
	fn pick(&mut self, candidates: usize) -> usize {
		self.rng.random_range(0..candidates)
	}
}

/// Seed derived from the current time in nanoseconds.
///
/// Only the low 64 bits of the nanosecond count are kept. Falls back to 0
/// if the clock is set before the Unix epoch.
pub fn time_seed() -> u64 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		// low 64 bits of the nanosecond count are enough for a seed
		.map(|d| d.as_nanos() as u64)
		.unwrap_or_default()
}
