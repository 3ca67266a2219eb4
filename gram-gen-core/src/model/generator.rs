use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::model::decision::{DecisionModel, WeightedRandomModel};
use crate::model::depth::DepthLimit;
use crate::model::listener::Listener;
use crate::model::options::{self, FilteredOptions};

/// Drives the derivation of one test case.
///
/// Rule-derivation code calls into a `Generator` at every decision point and
/// wraps every rule body with [`rule`](Self::rule) (or with the finer grained
/// [`enter_rule`](Self::enter_rule), [`depth_controlled`](Self::depth_controlled)
/// and [`exit_rule`](Self::exit_rule)).
///
/// # Responsibilities
/// - Own the remaining-depth budget of the derivation
/// - Turn weighted alternatives into a selectable, depth-adjusted distribution
/// - Delegate the pick to the `DecisionModel`
/// - Notify listeners of rule entry and exit
///
/// # Concurrency
/// A generator is mutable per-run state and is not shared between threads.
/// Parallel derivations use one generator each.
///
/// `N` is the rule node type of the external tree-builder; the generator only
/// forwards node references to its listeners.
pub struct Generator<N: ?Sized> {
	model: Box<dyn DecisionModel>,
	max_depth: DepthLimit,
	listeners: Vec<Box<dyn Listener<N>>>,
}

impl<N: ?Sized> Generator<N> {
	/// Creates a generator using the weighted-random decision model.
	pub fn new(config: &GeneratorConfig) -> Self {
		Self::with_model(Box::new(WeightedRandomModel::new()), config)
	}

	pub fn with_model(model: Box<dyn DecisionModel>, config: &GeneratorConfig) -> Self {
		Self {
			model,
			max_depth: config.depth_limit(),
			listeners: Vec::new(),
		}
	}

	/// Remaining depth budget at the current point of the derivation.
	pub fn max_depth(&self) -> DepthLimit {
		self.max_depth
	}

	/// Registers a listener after the already registered ones.
	pub fn add_listener(&mut self, listener: Box<dyn Listener<N>>) {
		self.listeners.push(listener);
	}

	pub fn listener_count(&self) -> usize {
		self.listeners.len()
	}

	/// Decision model, for repetition and character-set decisions.
	pub fn model_mut(&mut self) -> &mut dyn DecisionModel {
		self.model.as_mut()
	}

	/// Notifies every listener, in registration order, that `node` is entered.
	///
	/// Stops at the first failing listener.
	pub fn enter_rule(&mut self, node: &N) -> Result<()> {
		for listener in self.listeners.iter_mut() {
			listener.enter_rule(node)?;
		}
		Ok(())
	}

	/// Notifies every listener, in reverse registration order, that `node` is exited.
	///
	/// Stops at the first failing listener.
	pub fn exit_rule(&mut self, node: &N) -> Result<()> {
		for listener in self.listeners.iter_mut().rev() {
			listener.exit_rule(node)?;
		}
		Ok(())
	}

	/// Filters the alternatives of a decision point against the remaining budget.
	///
	/// See [`options::filter_options`] for the relaxation rule. The result may
	/// be non-viable when every weight is zero; [`choose`](Self::choose)
	/// turns that case into an error.
	pub fn filter_options(&self, depths: &[usize], weights: &[f64]) -> Result<FilteredOptions> {
		options::filter_options(self.max_depth, depths, weights)
	}

	/// Chooses one alternative of a decision point.
	///
	/// # Errors
	/// - `NoViableAlternative` if every weight is zero
	/// - errors of [`filter_options`](Self::filter_options)
	pub fn choose(&mut self, depths: &[usize], weights: &[f64]) -> Result<usize> {
		let options = self.filter_options(depths, weights)?;
		if !options.is_viable() {
			return Err(Error::NoViableAlternative { alternatives: weights.len() });
		}
		self.model.choose(&options.weights)
	}

	/// Opens a nested depth scope.
	///
	/// The budget is one less while the guard lives and is restored to its
	/// current value when the guard is dropped, including during unwinding.
	pub fn descend(&mut self) -> DepthGuard<'_, N> {
		DepthGuard::new(self)
	}

	/// Runs `body` one level deeper, restoring the budget on every exit path.
	pub fn depth_controlled<T, E>(&mut self, body: impl FnOnce(&mut Self) -> Result<T, E>) -> Result<T, E> {
		let mut guard = self.descend();
		body(&mut *guard)
	}

	/// Derives one rule: enter notification, depth-controlled body, exit notification.
	///
	/// When `body` fails the exit notification is skipped and the error is
	/// propagated; the depth budget is restored either way.
	pub fn rule<T>(&mut self, node: &N, body: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		self.enter_rule(node)?;
		let value = self.depth_controlled(body)?;
		self.exit_rule(node)?;
		Ok(value)
	}
}

impl<N: ?Sized> fmt::Debug for Generator<N> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Generator")
			.field("max_depth", &self.max_depth)
			.field("listeners", &self.listeners.len())
			.finish_non_exhaustive()
	}
}

/// Scope of one nested rule invocation.
///
/// Dereferences to the generator, so the rule body keeps using it while the
/// budget is lowered.
pub struct DepthGuard<'a, N: ?Sized> {
	generator: &'a mut Generator<N>,
	saved: DepthLimit,
}

impl<'a, N: ?Sized> DepthGuard<'a, N> {
	fn new(generator: &'a mut Generator<N>) -> Self {
		let saved = generator.max_depth;
		generator.max_depth = saved.decremented();
		Self { generator, saved }
	}
}

impl<N: ?Sized> Deref for DepthGuard<'_, N> {
	type Target = Generator<N>;

	fn deref(&self) -> &Self::Target {
		&*self.generator
	}
}

impl<N: ?Sized> DerefMut for DepthGuard<'_, N> {
	fn deref_mut(&mut self) -> &mut Self::Target {
		&mut *self.generator
	}
}

impl<N: ?Sized> Drop for DepthGuard<'_, N> {
	fn drop(&mut self) {
		self.generator.max_depth = self.saved;
	}
}
