//! Customer registry: regular, premium and corporate customers held in an
//! in-memory registry that enforces unique IDs and emails, with CSV
//! import/export, a text summary report and an interactive menu.

pub mod audit;
pub mod config;
pub mod domain;
pub mod files;
pub mod metrics;
pub mod registry;
pub mod shell;

pub use config::{AppConfig, Args};
pub use registry::CustomerRegistry;
