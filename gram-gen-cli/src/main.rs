mod cli;
mod driver;
mod grammar;
mod logging;
mod stats;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::cli::Cli;

fn main() -> Result<()> {
	logging::init();

	let cli = Cli::parse();
	let options = cli.driver_options()?;
	info!(
		jobs = options.jobs,
		count = options.count,
		max_depth = %options.config.depth_limit(),
		"generating test cases"
	);

	let cases = driver::run(&options)?;
	println!("Generated {} test cases in {}", cases.len(), options.out_dir.display());

	Ok(())
}
