use std::fmt;

use tracing::trace;

use crate::error::Result;

/// Observer of rule entry and exit.
///
/// Listeners typically build the concrete output tree or collect
/// diagnostics. Entries are dispatched in registration order and exits in
/// reverse order, so a listener keeping a stack of open nodes sees properly
/// nested pairs whatever the number of listeners.
///
/// Both methods default to no-ops. A failure is returned as
/// [`Error::Listener`](crate::Error::Listener) and aborts the dispatch.
pub trait Listener<N: ?Sized> {
	fn enter_rule(&mut self, node: &N) -> Result<()> {
		let _ = node;
		Ok(())
	}

	fn exit_rule(&mut self, node: &N) -> Result<()> {
		let _ = node;
		Ok(())
	}
}

/// Logs every rule entry and exit at trace level.
#[derive(Debug, Default)]
pub struct TracingListener {
	depth: usize,
}

impl TracingListener {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of rules currently open.
	pub fn depth(&self) -> usize {
		self.depth
	}
}

impl<N: fmt::Debug + ?Sized> Listener<N> for TracingListener {
	fn enter_rule(&mut self, node: &N) -> Result<()> {
		trace!(depth = self.depth, ?node, "enter rule");
		self.depth += 1;
		Ok(())
	}

	fn exit_rule(&mut self, node: &N) -> Result<()> {
		self.depth = self.depth.saturating_sub(1);
		trace!(depth = self.depth, ?node, "exit rule");
		Ok(())
	}
}
