//! Derivation engine.
//!
//! - Remaining-depth budget (`DepthLimit`)
//! - Depth-aware filtering of weighted alternatives (`FilteredOptions`)
//! - Pluggable selection among alternatives (`DecisionModel`)
//! - Rule entry/exit observers (`Listener`)
//! - The orchestrating `Generator` used by rule-derivation code

/// Integer-or-unbounded remaining depth.
pub mod depth;

/// Weighted-alternative filtering with depth relaxation.
///
/// Pure functions over the alternative set of one decision point.
pub mod options;

/// Selection of one alternative from an adjusted weight sequence.
pub mod decision;

/// Rule entry/exit observers.
pub mod listener;

/// High-level interface used by rule-derivation code.
pub mod generator;
