use serde::{Deserialize, Serialize};

use crate::model::depth::DepthLimit;

/// Construction-time settings of a [`Generator`](crate::Generator).
///
/// Deserializable so that drivers can read it from a configuration file.
/// A missing `max_depth` leaves the derivation depth unbounded.
///
/// ```toml
/// max_depth = 12
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct GeneratorConfig {
	/// Maximum nesting depth of rule invocations; `None` means unbounded.
	pub max_depth: Option<usize>,
}

impl GeneratorConfig {
	/// Configuration with a finite depth bound.
	pub fn with_max_depth(max_depth: usize) -> Self {
		Self { max_depth: Some(max_depth) }
	}

	/// Initial remaining-depth budget described by this configuration.
	pub fn depth_limit(&self) -> DepthLimit {
		DepthLimit::from(self.max_depth)
	}
}
