//! Rule-derivation code for a small arithmetic-expression grammar.
//!
//! ```text
//! start  : expr ;
//! expr   : term (('+' | '-') term)* ;
//! term   : factor (('*' | '/') factor)* ;
//! factor : '-' factor | '(' expr ')' | number ;
//! number : DIGIT+ ('.' DIGIT+)? ;
//! ```
//!
//! Every rule body runs inside [`Generator::rule`], every alternative and
//! repetition is checked against the remaining depth budget.

use gram_gen_core::{Generator, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
	Start,
	Expr,
	Term,
	Factor,
	Number,
}

// Minimum depth needed to derive a rule, the rule itself included.
const NUMBER_DEPTH: usize = 1;
const FACTOR_DEPTH: usize = NUMBER_DEPTH + 1;
const TERM_DEPTH: usize = FACTOR_DEPTH + 1;
const EXPR_DEPTH: usize = TERM_DEPTH + 1;

// factor alternatives: negation, parenthesized expression, number
const FACTOR_DEPTHS: [usize; 3] = [FACTOR_DEPTH, EXPR_DEPTH, NUMBER_DEPTH];
const FACTOR_WEIGHTS: [f64; 3] = [1.0, 2.0, 4.0];

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const ADDITIVE: [char; 2] = ['+', '-'];
const MULTIPLICATIVE: [char; 2] = ['*', '/'];

const MAX_DIGITS: usize = 6;

/// Derives one test case from the `start` rule.
pub fn generate(generator: &mut Generator<Rule>) -> Result<String> {
	let mut out = String::new();
	generator.rule(&Rule::Start, |g| expr(g, &mut out))?;
	Ok(out)
}

fn expr(generator: &mut Generator<Rule>, out: &mut String) -> Result<()> {
	generator.rule(&Rule::Expr, |g| {
		term(g, out)?;
		let mut count = 0;
		while g.max_depth().admits(TERM_DEPTH) && g.model_mut().quantify(0, None, count)? {
			out.push(g.model_mut().charset(&ADDITIVE)?);
			term(g, out)?;
			count += 1;
		}
		Ok(())
	})
}

fn term(generator: &mut Generator<Rule>, out: &mut String) -> Result<()> {
	generator.rule(&Rule::Term, |g| {
		factor(g, out)?;
		let mut count = 0;
		while g.max_depth().admits(FACTOR_DEPTH) && g.model_mut().quantify(0, None, count)? {
			out.push(g.model_mut().charset(&MULTIPLICATIVE)?);
			factor(g, out)?;
			count += 1;
		}
		Ok(())
	})
}

fn factor(generator: &mut Generator<Rule>, out: &mut String) -> Result<()> {
	generator.rule(&Rule::Factor, |g| match g.choose(&FACTOR_DEPTHS, &FACTOR_WEIGHTS)? {
		0 => {
			out.push('-');
			factor(g, out)
		}
		1 => {
			out.push('(');
			expr(g, out)?;
			out.push(')');
			Ok(())
		}
		_ => number(g, out),
	})
}

fn number(generator: &mut Generator<Rule>, out: &mut String) -> Result<()> {
	generator.rule(&Rule::Number, |g| {
		digits(g, out)?;
		if g.model_mut().quantify(0, Some(1), 0)? {
			out.push('.');
			digits(g, out)?;
		}
		Ok(())
	})
}

fn digits(generator: &mut Generator<Rule>, out: &mut String) -> Result<()> {
	let mut count = 0;
	while generator.model_mut().quantify(1, Some(MAX_DIGITS), count)? {
		out.push(generator.model_mut().charset(&DIGITS)?);
		count += 1;
	}
	Ok(())
}
