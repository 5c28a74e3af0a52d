// ============================================================================
// Customer Domain - Variants, Validation and Records
// ============================================================================
//
// This module contains ALL Customer-specific code:
// - Validation (field checks run by every setter)
// - Value objects (CustomerKind, benefit payloads, TypeSummary)
// - Errors (ValidationError, CustomerError)
// - Aggregate (Profile + the closed Customer enum)
// - Commands (RegisterCustomer factory input, CustomerUpdate)
// - Record (flat import/export shape)
// - Events (audit facts emitted by the registry)
//
// ============================================================================

pub mod validation;
pub mod value_objects;
pub mod errors;
pub mod aggregate;
pub mod commands;
pub mod record;
pub mod events;

// Re-export for convenience
pub use value_objects::*;
pub use errors::*;
pub use aggregate::*;
pub use commands::*;
pub use record::*;
pub use events::*;
