use std::cell::RefCell;
use std::rc::Rc;

use gram_gen_core::{Error, Listener, Result};

use crate::grammar::Rule;

/// Shape of the last derivation.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RuleStats {
	open: Vec<Rule>,
	/// Deepest nesting of rules observed.
	pub deepest: usize,
	/// Number of rules entered.
	pub rules: usize,
}

impl RuleStats {
	pub fn reset(&mut self) {
		*self = Self::default();
	}
}

/// Listener filling a shared `RuleStats`.
///
/// Fails on an exit that does not match the innermost open rule.
pub struct StatsListener {
	stats: Rc<RefCell<RuleStats>>,
}

impl StatsListener {
	pub fn new(stats: Rc<RefCell<RuleStats>>) -> Self {
		Self { stats }
	}
}

impl Listener<Rule> for StatsListener {
	fn enter_rule(&mut self, node: &Rule) -> Result<()> {
		let mut stats = self.stats.borrow_mut();
		stats.open.push(*node);
		stats.rules += 1;
		stats.deepest = stats.deepest.max(stats.open.len());
		Ok(())
	}

	fn exit_rule(&mut self, node: &Rule) -> Result<()> {
		match self.stats.borrow_mut().open.pop() {
			Some(open) if open == *node => Ok(()),
			open => Err(Error::listener(format!("exit of {node:?} while {open:?} is open"))),
		}
	}
}
