use std::fs::{self, OpenOptions};
use std::io;
use std::sync::{Arc, Mutex};

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use customer_registry::audit::TracingAuditSink;
use customer_registry::metrics::RegistryMetrics;
use customer_registry::shell::Shell;
use customer_registry::{AppConfig, Args, CustomerRegistry};

fn main() -> anyhow::Result<()> {
    let config = AppConfig::from(Args::parse());

    // Logs go to a file so they do not interleave with the menu.
    // RUST_LOG overrides the verbosity flags, e.g. RUST_LOG=audit=info
    if let Some(dir) = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .with_context(|| format!("opening log file {}", config.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .init();

    tracing::info!(
        input = %config.input.display(),
        output = %config.output.display(),
        report = %config.report.display(),
        "Starting customer registry"
    );

    let metrics = Arc::new(RegistryMetrics::new()?);
    let registry = CustomerRegistry::new(Arc::new(TracingAuditSink)).with_metrics(metrics.clone());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), registry, config).with_metrics(metrics);
    shell.run()?;

    let (registry, _) = shell.into_parts();
    tracing::info!(customers = registry.len(), "Session ended");

    Ok(())
}
