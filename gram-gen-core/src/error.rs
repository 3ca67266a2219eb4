//! Error types for derivation.

use thiserror::Error;

/// Boxed error raised by listener implementations.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while deriving a grammar rule.
#[derive(Debug, Error)]
pub enum Error {
	/// Every alternative of a decision point has zero weight.
	///
	/// No depth relaxation can make such a set selectable; the caller must
	/// abort the derivation or backtrack to an ancestor decision.
	#[error("No viable alternative among {alternatives} options: every weight is zero")]
	NoViableAlternative { alternatives: usize },

	#[error("Alternative length mismatch: {depths} depths, {weights} weights")]
	LengthMismatch { depths: usize, weights: usize },

	#[error("Invalid weight {weight} at index {index}: weights must be finite and non-negative")]
	InvalidWeight { index: usize, weight: f64 },

	#[error("Cannot choose from an empty character set")]
	EmptyCharset,

	/// A listener failed during rule entry or exit.
	#[error("Listener failed: {0}")]
	Listener(#[source] BoxError),
}

impl Error {
	/// Wraps a listener-side failure.
	pub fn listener<E: Into<BoxError>>(err: E) -> Self {
		Error::Listener(err.into())
	}
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
