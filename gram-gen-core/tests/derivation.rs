//! End-to-end derivations driven by hand-written rule code.

use std::cell::RefCell;
use std::rc::Rc;

use gram_gen_core::{
	DecisionModel, DepthLimit, Error, Generator, GeneratorConfig, Listener, Result, WeightedRandomModel,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
	Nest,
}

/// Always takes the deepest viable alternative.
struct LastPositive;

impl DecisionModel for LastPositive {
	fn choose(&mut self, weights: &[f64]) -> Result<usize> {
		weights
			.iter()
			.rposition(|weight| *weight > 0.0)
			.ok_or(Error::NoViableAlternative { alternatives: weights.len() })
	}
}

#[derive(Default)]
struct Shape {
	open: Vec<Rule>,
	deepest: usize,
	entered: usize,
}

struct ShapeListener {
	shape: Rc<RefCell<Shape>>,
	fail_at: Option<usize>,
}

impl Listener<Rule> for ShapeListener {
	fn enter_rule(&mut self, node: &Rule) -> Result<()> {
		let mut shape = self.shape.borrow_mut();
		if self.fail_at == Some(shape.open.len()) {
			return Err(Error::listener("too deep"));
		}
		shape.open.push(*node);
		shape.entered += 1;
		shape.deepest = shape.deepest.max(shape.open.len());
		Ok(())
	}

	fn exit_rule(&mut self, node: &Rule) -> Result<()> {
		match self.shape.borrow_mut().open.pop() {
			Some(open) if open == *node => Ok(()),
			_ => Err(Error::listener("unbalanced exit")),
		}
	}
}

// nest: 'x' | '(' nest ')'
const NEST_DEPTHS: [usize; 2] = [0, 1];
const NEST_WEIGHTS: [f64; 2] = [1.0, 1.0];

fn nest(generator: &mut Generator<Rule>, out: &mut String) -> Result<()> {
	generator.rule(&Rule::Nest, |g| {
		match g.choose(&NEST_DEPTHS, &NEST_WEIGHTS)? {
			0 => out.push('x'),
			_ => {
				out.push('(');
				nest(g, out)?;
				out.push(')');
			}
		}
		Ok(())
	})
}

fn derive(generator: &mut Generator<Rule>) -> Result<String> {
	let mut out = String::new();
	nest(generator, &mut out)?;
	Ok(out)
}

fn shaped(model: Box<dyn DecisionModel>, max_depth: usize, fail_at: Option<usize>) -> (Generator<Rule>, Rc<RefCell<Shape>>) {
	let shape = Rc::new(RefCell::new(Shape::default()));
	let mut generator: Generator<Rule> = Generator::with_model(model, &GeneratorConfig::with_max_depth(max_depth));
	generator.add_listener(Box::new(ShapeListener { shape: shape.clone(), fail_at }));
	(generator, shape)
}

#[test]
fn greedy_derivation_stops_at_max_depth() {
	let (mut generator, shape) = shaped(Box::new(LastPositive), 4, None);

	let out = derive(&mut generator).unwrap();

	assert_eq!(out, "(((x)))");
	assert_eq!(shape.borrow().deepest, 4);
	assert!(shape.borrow().open.is_empty());
	assert_eq!(generator.max_depth(), DepthLimit::Finite(4));
}

#[test]
fn exhausted_budget_still_makes_progress() {
	let (mut generator, shape) = shaped(Box::new(LastPositive), 0, None);

	let out = derive(&mut generator).unwrap();

	assert_eq!(out, "x");
	assert_eq!(shape.borrow().entered, 1);
	assert_eq!(generator.max_depth(), DepthLimit::Finite(0));
}

#[test]
fn random_derivations_respect_max_depth() {
	for seed in 0..50 {
		let (mut generator, shape) = shaped(Box::new(WeightedRandomModel::seeded(seed)), 6, None);
		let out = derive(&mut generator).unwrap();
		let parens = out.chars().filter(|c| *c == '(').count();
		assert!(shape.borrow().deepest <= 6, "seed {seed}: {out}");
		assert_eq!(parens + 1, shape.borrow().deepest);
	}
}

#[test]
fn seeded_derivations_are_reproducible() {
	let (mut a, _) = shaped(Box::new(WeightedRandomModel::seeded(11)), 10, None);
	let (mut b, _) = shaped(Box::new(WeightedRandomModel::seeded(11)), 10, None);
	for _ in 0..20 {
		assert_eq!(derive(&mut a).unwrap(), derive(&mut b).unwrap());
	}
}

#[test]
fn listener_failure_unwinds_the_derivation() {
	let (mut generator, shape) = shaped(Box::new(LastPositive), 8, Some(3));

	let err = derive(&mut generator).unwrap_err();

	assert!(matches!(err, Error::Listener(_)));
	assert_eq!(shape.borrow().entered, 3);
	assert_eq!(generator.max_depth(), DepthLimit::Finite(8));
}

#[test]
fn all_zero_decision_fails_the_derivation() {
	let mut generator: Generator<Rule> = Generator::new(&GeneratorConfig::default());

	let result = generator.rule(&Rule::Nest, |g| g.choose(&[0, 0], &[0.0, 0.0]));

	assert!(matches!(result, Err(Error::NoViableAlternative { alternatives: 2 })));
	assert_eq!(generator.max_depth(), DepthLimit::Unbounded);
}
