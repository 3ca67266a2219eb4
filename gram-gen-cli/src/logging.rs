//! Diagnostics for the driver.
//!
//! Reads `RUST_LOG`, defaults to `warn`, writes compact lines to stderr.
//! Depth relaxations show up at `gram_gen_core=debug`, rule entry and exit
//! at `gram_gen_core=trace`.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init() {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::registry()
		.with(filter)
		.with(fmt::layer().with_writer(std::io::stderr).compact())
		.init();
}
