use std::fmt;

/// Remaining permitted nesting depth of a derivation.
///
/// The budget shrinks by one for every nested rule invocation. It may become
/// negative while an alternative chosen under a relaxed bound is derived, so
/// the finite variant is signed.
///
/// Ordering puts every finite budget below `Unbounded`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum DepthLimit {
	Finite(i64),
	#[default]
	Unbounded,
}

impl DepthLimit {
	/// Whether a subtree needing `depth` more levels fits in this budget.
	pub fn admits(self, depth: usize) -> bool {
		match self {
			DepthLimit::Finite(limit) => i64::try_from(depth).is_ok_and(|depth| depth <= limit),
			DepthLimit::Unbounded => true,
		}
	}

	/// Budget left to the body of one more nested rule.
	pub(crate) fn decremented(self) -> Self {
		match self {
			DepthLimit::Finite(limit) => DepthLimit::Finite(limit.saturating_sub(1)),
			DepthLimit::Unbounded => DepthLimit::Unbounded,
		}
	}
}

impl From<usize> for DepthLimit {
	fn from(depth: usize) -> Self {
		i64::try_from(depth).map_or(DepthLimit::Unbounded, DepthLimit::Finite)
	}
}

impl From<Option<usize>> for DepthLimit {
	fn from(depth: Option<usize>) -> Self {
		depth.map_or(DepthLimit::Unbounded, DepthLimit::from)
	}
}

impl fmt::Display for DepthLimit {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DepthLimit::Finite(limit) => write!(f, "{limit}"),
			DepthLimit::Unbounded => f.write_str("inf"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn finite_budget_admits_up_to_its_value() {
		let limit = DepthLimit::Finite(3);
		assert!(limit.admits(0));
		assert!(limit.admits(3));
		assert!(!limit.admits(4));
	}

	#[test]
	fn negative_budget_admits_nothing() {
		assert!(!DepthLimit::Finite(-1).admits(0));
	}

	#[test]
	fn unbounded_admits_everything_and_never_shrinks() {
		assert!(DepthLimit::Unbounded.admits(usize::MAX));
		assert_eq!(DepthLimit::Unbounded.decremented(), DepthLimit::Unbounded);
	}

	#[test]
	fn decrement_goes_below_zero() {
		assert_eq!(DepthLimit::Finite(0).decremented(), DepthLimit::Finite(-1));
	}

	#[test]
	fn finite_orders_below_unbounded() {
		assert!(DepthLimit::Finite(i64::MAX) < DepthLimit::Unbounded);
		assert!(DepthLimit::Finite(2) < DepthLimit::Finite(5));
	}

	#[test]
	fn display() {
		assert_eq!(DepthLimit::Finite(4).to_string(), "4");
		assert_eq!(DepthLimit::Unbounded.to_string(), "inf");
	}
}
