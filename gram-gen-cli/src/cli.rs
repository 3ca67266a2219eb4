use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use gram_gen_core::GeneratorConfig;

use crate::driver::DriverOptions;

/// Generate random arithmetic-expression test cases.
#[derive(Debug, Parser)]
#[command(name = "gram-gen", version)]
pub struct Cli {
	/// Parallelization level (default: number of cpu cores).
	#[arg(short = 'j', long, value_name = "NUM", default_value_t = num_cpus::get())]
	pub jobs: usize,

	/// Disable the removal of intermediate files.
	#[arg(long = "disable-cleanup", action = ArgAction::SetFalse)]
	pub cleanup: bool,

	/// Maximum derivation depth (default: unbounded, or the config file value).
	#[arg(short = 'd', long, value_name = "NUM")]
	pub max_depth: Option<usize>,

	/// Number of test cases to generate.
	#[arg(short = 'n', long, value_name = "NUM", default_value_t = 10)]
	pub count: usize,

	/// Seed for reproducible generation.
	#[arg(long, value_name = "NUM")]
	pub seed: Option<u64>,

	/// Output directory.
	#[arg(short = 'o', long = "out", value_name = "DIR", default_value = "gram-gen-out")]
	pub out_dir: PathBuf,

	/// TOML file with generator settings.
	#[arg(long, value_name = "FILE")]
	pub config: Option<PathBuf>,
}

impl Cli {
	/// Generator settings: the config file if any, then command-line overrides.
	pub fn generator_config(&self) -> Result<GeneratorConfig> {
		let mut config = match &self.config {
			Some(path) => {
				let text = fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
				toml::from_str(&text).with_context(|| format!("parse config {}", path.display()))?
			}
			None => GeneratorConfig::default(),
		};
		if let Some(max_depth) = self.max_depth {
			config.max_depth = Some(max_depth);
		}
		Ok(config)
	}

	pub fn driver_options(&self) -> Result<DriverOptions> {
		Ok(DriverOptions {
			jobs: self.jobs,
			cleanup: self.cleanup,
			count: self.count,
			seed: self.seed,
			out_dir: self.out_dir.clone(),
			config: self.generator_config()?,
		})
	}
}
