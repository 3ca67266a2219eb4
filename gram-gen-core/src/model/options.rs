use tracing::debug;

use crate::error::{Error, Result};
use crate::model::depth::DepthLimit;

/// Alternatives of one decision point after depth filtering.
///
/// # Invariants
/// - `weights` has the length and ordering of the original alternative set
/// - every entry is either the original weight or zero
/// - an all-zero `weights` only occurs when every original weight was zero,
///   in which case `max_depth` is `Unbounded`
#[derive(Clone, Debug, PartialEq)]
pub struct FilteredOptions {
	/// Adjusted weights, zero for alternatives that do not fit `max_depth`.
	pub weights: Vec<f64>,

	/// Depth bound the adjusted weights were computed against.
	pub max_depth: DepthLimit,

	/// Whether `max_depth` had to be raised above the remaining budget.
	pub relaxed: bool,
}

impl FilteredOptions {
	/// Whether at least one alternative can be chosen.
	pub fn is_viable(&self) -> bool {
		self.weights.iter().any(|weight| *weight > 0.0)
	}
}

/// Filters weighted alternatives against the remaining depth budget.
///
/// Alternatives whose minimum depth exceeds `max_depth` get a zero weight.
/// When this leaves nothing selectable, the bound is relaxed to the smallest
/// depth among the alternatives with a positive original weight, so that
/// derivation can always make progress. Zero-weight alternatives are never
/// considered for relaxation.
///
/// # Errors
/// - `LengthMismatch` if `depths` and `weights` differ in length
/// - `InvalidWeight` if a weight is negative, infinite or NaN
pub fn filter_options(max_depth: DepthLimit, depths: &[usize], weights: &[f64]) -> Result<FilteredOptions> {
	if depths.len() != weights.len() {
		return Err(Error::LengthMismatch { depths: depths.len(), weights: weights.len() });
	}
	validate_weights(weights)?;

	let available = restrict(max_depth, depths, weights);
	if available.iter().any(|weight| *weight > 0.0) {
		return Ok(FilteredOptions { weights: available, max_depth, relaxed: false });
	}

	let relaxed_depth = depths
		.iter()
		.zip(weights)
		.filter(|(_, weight)| **weight > 0.0)
		.map(|(depth, _)| *depth)
		.min();

	match relaxed_depth {
		Some(depth) => {
			let relaxed = DepthLimit::from(depth);
			debug!(from = %max_depth, to = %relaxed, "max depth temporarily relaxed");
			Ok(FilteredOptions { weights: restrict(relaxed, depths, weights), max_depth: relaxed, relaxed: true })
		}
		None => Ok(FilteredOptions {
			weights: vec![0.0; weights.len()],
			max_depth: DepthLimit::Unbounded,
			relaxed: false,
		}),
	}
}

/// Checks that every weight is finite and non-negative.
pub(crate) fn validate_weights(weights: &[f64]) -> Result<()> {
	match weights.iter().position(|weight| !weight.is_finite() || *weight < 0.0) {
		Some(index) => Err(Error::InvalidWeight { index, weight: weights[index] }),
		None => Ok(()),
	}
}

fn restrict(max_depth: DepthLimit, depths: &[usize], weights: &[f64]) -> Vec<f64> {
	depths
		.iter()
		.zip(weights)
		.map(|(depth, weight)| if max_depth.admits(*depth) { *weight } else { 0.0 })
		.collect()
}
