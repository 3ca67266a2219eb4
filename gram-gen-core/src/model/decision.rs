use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::model::options::validate_weights;

/// Picks one alternative from an adjusted weight sequence.
///
/// # Contract
/// - a zero-weight entry is never chosen
/// - when exactly one entry is positive, that entry is chosen
/// - an all-zero sequence is an error, never a pick
///
/// Only `choose` is required; repetition and character decisions default to
/// uniform choices routed through it.
pub trait DecisionModel {
	/// Returns the index of the chosen alternative.
	///
	/// # Errors
	/// - `NoViableAlternative` if no weight is positive
	/// - `InvalidWeight` if a weight is negative or not finite
	fn choose(&mut self, weights: &[f64]) -> Result<usize>;

	/// Decides whether a repetition with `count` items so far goes on.
	///
	/// Always continues below `min`, always stops at `max` (if any).
	fn quantify(&mut self, min: usize, max: Option<usize>, count: usize) -> Result<bool> {
		if count < min {
			return Ok(true);
		}
		if max.is_some_and(|max| count >= max) {
			return Ok(false);
		}
		Ok(self.choose(&[1.0, 1.0])? == 0)
	}

	/// Picks one character of a character set.
	fn charset(&mut self, chars: &[char]) -> Result<char> {
		if chars.is_empty() {
			return Err(Error::EmptyCharset);
		}
		let index = self.choose(&vec![1.0; chars.len()])?;
		Ok(chars[index])
	}
}

/// Default decision model: picks index `i` with probability
/// `weights[i] / sum(weights)`.
#[derive(Debug, Clone)]
pub struct WeightedRandomModel<R = ThreadRng> {
	rng: R,
}

impl WeightedRandomModel<ThreadRng> {
	/// Model backed by the thread-local RNG.
	pub fn new() -> Self {
		Self { rng: rand::rng() }
	}
}

impl Default for WeightedRandomModel<ThreadRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl WeightedRandomModel<StdRng> {
	/// Reproducible model: identical seeds yield identical decisions.
	pub fn seeded(seed: u64) -> Self {
		Self { rng: StdRng::seed_from_u64(seed) }
	}
}

impl<R: Rng> WeightedRandomModel<R> {
	/// Model drawing from a caller-supplied RNG.
	pub fn with_rng(rng: R) -> Self {
		Self { rng }
	}
}

impl<R: Rng> DecisionModel for WeightedRandomModel<R> {
	/// Weighted random sampling.
	///
	/// This method performs:
	/// - an O(n) scan to validate and sum the weights
	/// - a cumulative subtraction to select a bucket
	///
	/// Weights are scaled by the largest one, so the total stays finite
	/// whatever their magnitude.
	fn choose(&mut self, weights: &[f64]) -> Result<usize> {
		validate_weights(weights)?;

		let mut positive = weights.iter().enumerate().filter(|(_, weight)| **weight > 0.0);
		let first = positive
			.next()
			.map(|(index, _)| index)
			.ok_or(Error::NoViableAlternative { alternatives: weights.len() })?;
		if positive.next().is_none() {
			return Ok(first);
		}

		let largest = weights.iter().copied().fold(0.0, f64::max);
		let total: f64 = weights.iter().map(|weight| weight / largest).sum();
		let mut r = self.rng.random_range(0.0..total);

		let mut fallback = first;
		for (index, weight) in weights.iter().enumerate() {
			if *weight <= 0.0 {
				continue;
			}
			let scaled = weight / largest;
			if r < scaled {
				return Ok(index);
			}
			r -= scaled;
			fallback = index;
		}

		// Rounding can leave `r` just above the last bucket.
		Ok(fallback)
	}
}
