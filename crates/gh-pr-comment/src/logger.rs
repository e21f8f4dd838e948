//! Logging to stderr using env_logger
//!
//! The level comes from `RUST_LOG` and defaults to `warn`. `--verbose`
//! raises it to `debug`. Nothing is logged to stdout, which only carries the
//! successful outputs.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initialize the global logger
pub fn init(verbose: bool) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr);

    if verbose {
        builder.filter_level(LevelFilter::Debug);
    }

    if let Err(e) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", e);
    }
}
