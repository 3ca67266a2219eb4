use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::sync::mpsc;
use std::thread;

use anyhow::{Context, Result, anyhow};
use gram_gen_core::{DecisionModel, Generator, GeneratorConfig, TracingListener, WeightedRandomModel};
use tracing::{debug, info};

use crate::grammar::{self, Rule};
use crate::stats::{RuleStats, StatsListener};

/// Settings of one corpus-generation run.
#[derive(Debug, Clone)]
pub struct DriverOptions {
	/// Number of worker threads.
	pub jobs: usize,
	/// Whether intermediate directories are removed at the end.
	pub cleanup: bool,
	pub count: usize,
	/// Base seed; worker `w` uses `seed + w`.
	pub seed: Option<u64>,
	pub out_dir: PathBuf,
	pub config: GeneratorConfig,
}

/// Generates `count` test cases into `out_dir`.
///
/// # Behavior
/// - Case `i` is derived by worker `i % jobs`, each worker owning its generator
/// - Workers write into `out_dir/.work-<worker>/`
/// - Finished cases are moved to `out_dir/case-<i>.txt`, only if every
///   worker succeeded
/// - Worker directories are removed unless cleanup is disabled
///
/// Returns the paths of the generated cases in index order.
pub fn run(options: &DriverOptions) -> Result<Vec<PathBuf>> {
	fs::create_dir_all(&options.out_dir)
		.with_context(|| format!("create output directory {}", options.out_dir.display()))?;

	let jobs = options.jobs.clamp(1, options.count.max(1));
	let (tx, rx) = mpsc::channel();
	for worker in 0..jobs {
		let tx = tx.clone();
		let work_dir = options.out_dir.join(format!(".work-{worker}"));
		let indices: Vec<usize> = (worker..options.count).step_by(jobs).collect();
		let config = options.config.clone();
		let seed = options.seed.map(|seed| seed.wrapping_add(worker as u64));

		thread::spawn(move || {
			let result = generate_cases(&work_dir, &indices, &config, seed);
			// The receiver only goes away once every worker has reported.
			let _ = tx.send((work_dir, result));
		});
	}
	drop(tx);

	let mut generated = Vec::with_capacity(options.count);
	let mut work_dirs = Vec::with_capacity(jobs);
	let mut failure = None;
	for (work_dir, result) in rx {
		match result {
			Ok(files) => generated.extend(files),
			Err(err) => {
				failure.get_or_insert(err);
			}
		}
		work_dirs.push(work_dir);
	}
	if failure.is_none() && work_dirs.len() != jobs {
		failure = Some(anyhow!("{} of {jobs} workers did not report", jobs - work_dirs.len()));
	}

	// Cases only reach `out_dir` when every worker succeeded.
	let mut cases = match failure {
		Some(err) => Err(err),
		None => move_cases(&generated, &options.out_dir),
	};

	if options.cleanup {
		for dir in work_dirs.iter().filter(|dir| dir.is_dir()) {
			if let Err(err) = fs::remove_dir_all(dir).with_context(|| format!("remove {}", dir.display())) {
				cases = cases.and(Err(err));
			}
		}
	}

	let mut cases = cases?;
	cases.sort();
	info!(cases = cases.len(), out_dir = %options.out_dir.display(), "generation finished");
	Ok(cases)
}

/// Derives the cases of one worker into `work_dir`.
fn generate_cases(work_dir: &Path, indices: &[usize], config: &GeneratorConfig, seed: Option<u64>) -> Result<Vec<PathBuf>> {
	fs::create_dir_all(work_dir).with_context(|| format!("create {}", work_dir.display()))?;

	let model: Box<dyn DecisionModel> = match seed {
		Some(seed) => Box::new(WeightedRandomModel::seeded(seed)),
		None => Box::new(WeightedRandomModel::new()),
	};
	let stats = Rc::new(RefCell::new(RuleStats::default()));
	let mut generator: Generator<Rule> = Generator::with_model(model, config);
	generator.add_listener(Box::new(StatsListener::new(stats.clone())));
	generator.add_listener(Box::new(TracingListener::new()));

	let mut files = Vec::with_capacity(indices.len());
	for &index in indices {
		let case = grammar::generate(&mut generator).with_context(|| format!("generate test case {index}"))?;
		let path = work_dir.join(case_file_name(index));
		fs::write(&path, &case).with_context(|| format!("write {}", path.display()))?;

		{
			let stats = stats.borrow();
			debug!(index, deepest = stats.deepest, rules = stats.rules, "test case generated");
		}
		stats.borrow_mut().reset();
		files.push(path);
	}
	Ok(files)
}

fn move_cases(files: &[PathBuf], out_dir: &Path) -> Result<Vec<PathBuf>> {
	files
		.iter()
		.map(|file| -> Result<PathBuf> {
			let name = file.file_name().with_context(|| format!("no file name in {}", file.display()))?;
			let target = out_dir.join(name);
			fs::rename(file, &target).with_context(|| format!("move {} to {}", file.display(), target.display()))?;
			Ok(target)
		})
		.collect()
}

fn case_file_name(index: usize) -> String {
	format!("case-{index:05}.txt")
}

#[cfg(test)]
mod tests {
	use super::*;

	fn options(out_dir: &Path, cleanup: bool) -> DriverOptions {
		DriverOptions {
			jobs: 3,
			cleanup,
			count: 7,
			seed: Some(5),
			out_dir: out_dir.to_path_buf(),
			config: GeneratorConfig::with_max_depth(8),
		}
	}

	#[test]
	fn generates_every_case_and_cleans_up() {
		let dir = tempfile::tempdir().unwrap();
		let cases = run(&options(dir.path(), true)).unwrap();

		assert_eq!(cases.len(), 7);
		for (index, case) in cases.iter().enumerate() {
			assert_eq!(case, &dir.path().join(case_file_name(index)));
			assert!(!fs::read_to_string(case).unwrap().is_empty());
		}
		assert!(!dir.path().join(".work-0").exists());
	}

	#[test]
	fn disabled_cleanup_keeps_work_dirs() {
		let dir = tempfile::tempdir().unwrap();
		run(&options(dir.path(), false)).unwrap();

		for worker in 0..3 {
			assert!(dir.path().join(format!(".work-{worker}")).is_dir());
		}
	}

	#[test]
	fn seeded_runs_are_reproducible() {
		let a = tempfile::tempdir().unwrap();
		let b = tempfile::tempdir().unwrap();
		let cases_a = run(&options(a.path(), true)).unwrap();
		let cases_b = run(&options(b.path(), true)).unwrap();

		for (case_a, case_b) in cases_a.iter().zip(&cases_b) {
			assert_eq!(fs::read_to_string(case_a).unwrap(), fs::read_to_string(case_b).unwrap());
		}
	}

	#[test]
	fn failed_worker_leaves_no_cases_behind() {
		let dir = tempfile::tempdir().unwrap();
		// A plain file where worker 1 wants its directory.
		fs::write(dir.path().join(".work-1"), "").unwrap();

		assert!(run(&options(dir.path(), true)).is_err());

		let leftovers: Vec<_> = fs::read_dir(dir.path())
			.unwrap()
			.map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
			.filter(|name| name.starts_with("case-"))
			.collect();
		assert!(leftovers.is_empty(), "{leftovers:?}");
		assert!(!dir.path().join(".work-0").exists());
	}

	#[test]
	fn more_jobs_than_cases() {
		let dir = tempfile::tempdir().unwrap();
		let mut options = options(dir.path(), true);
		options.jobs = 16;
		options.count = 2;

		assert_eq!(run(&options).unwrap().len(), 2);
	}
}
