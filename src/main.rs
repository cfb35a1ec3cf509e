//! Benchmark entry point.
//!
//! Builds the async runtime explicitly, runs the driver to completion, tears
//! the runtime down, and prints the report to stdout. Diagnostics go through
//! `tracing` to stderr; `RUST_LOG` controls verbosity.

use anyhow::{Context, Result};
use qdrant_bench::{BenchConfig, runner};

fn main() -> Result<()> {
    init_logging();

    let config = BenchConfig::default();

    let runtime = tokio::runtime::Runtime::new().context("Failed to build async runtime")?;
    let report = runtime.block_on(runner::run(&config))?;
    drop(runtime);

    report.print();
    Ok(())
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("qdrant_bench=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
