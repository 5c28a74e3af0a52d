//! Command-line arguments and resolved runtime configuration

use std::path::PathBuf;

use clap::Parser;

/// Interactive customer registry with CSV import/export and text reports
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// CSV file read by the import option
    #[arg(short, long, default_value = AppConfig::DEFAULT_INPUT)]
    pub input: PathBuf,

    /// CSV file written by the export option
    #[arg(short, long, default_value = AppConfig::DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Text report written by the report option
    #[arg(short, long, default_value = AppConfig::DEFAULT_REPORT)]
    pub report: PathBuf,

    /// Log file for application and audit logs
    #[arg(long, default_value = AppConfig::DEFAULT_LOG_FILE)]
    pub log_file: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub report: PathBuf,
    pub log_file: PathBuf,
    pub verbose: u8,
}

impl AppConfig {
    pub const DEFAULT_INPUT: &'static str = "datos/clientes_entradas.csv";
    pub const DEFAULT_OUTPUT: &'static str = "datos/clientes.csv";
    pub const DEFAULT_REPORT: &'static str = "reportes/resumen.txt";
    pub const DEFAULT_LOG_FILE: &'static str = "logs/app.log";

    /// Default tracing filter directive for the given verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info,customer_registry=debug",
            1 => "debug",
            _ => "trace",
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(Self::DEFAULT_INPUT),
            output: PathBuf::from(Self::DEFAULT_OUTPUT),
            report: PathBuf::from(Self::DEFAULT_REPORT),
            log_file: PathBuf::from(Self::DEFAULT_LOG_FILE),
            verbose: 0,
        }
    }
}

impl From<Args> for AppConfig {
    fn from(args: Args) -> Self {
        Self {
            input: args.input,
            output: args.output,
            report: args.report,
            log_file: args.log_file,
            verbose: args.verbose,
        }
    }
}
