// ============================================================================
// File Collaborators
// ============================================================================
//
// CSV import/export and the text report. These read the registry and build
// customers through the record factory; they never mutate customers
// directly.
//
// ============================================================================

pub mod csv_store;
pub mod errors;
pub mod report;

pub use csv_store::{export_csv, import_csv, register_batch, ImportBatch, ImportReport, RejectedRow};
pub use errors::FileError;
pub use report::{render_report, write_report};
