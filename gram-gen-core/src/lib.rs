//! Runtime core of a grammar-based random test generator.
//!
//! This crate drives the derivation of grammar rules compiled elsewhere into
//! rule-derivation code. It provides:
//! - Depth-bounded selection among weighted alternatives, relaxing the bound
//!   only when no alternative would otherwise be selectable
//! - A scoped remaining-depth budget shared by recursive rule invocations
//! - Ordered rule entry/exit notification of registered listeners
//! - A pluggable decision model, weighted-random by default
//!
//! Rule-derivation code talks to a [`Generator`] at every decision point and
//! wraps each rule body with [`Generator::rule`].

/// Derivation engine: generator, depth budget, decision models, listeners.
pub mod model;

/// Construction-time configuration.
pub mod config;

/// Error type shared by the whole crate.
pub mod error;

pub use config::GeneratorConfig;
pub use error::{Error, Result};
pub use model::decision::{DecisionModel, WeightedRandomModel};
pub use model::depth::DepthLimit;
pub use model::generator::{DepthGuard, Generator};
pub use model::listener::{Listener, TracingListener};
pub use model::options::FilteredOptions;
