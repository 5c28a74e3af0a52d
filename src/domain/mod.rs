// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Customer variants, field validation and the record shape used at the file
// boundary. Nothing here performs I/O or logging; the registry reports what
// happened through its audit sink.
//
// ============================================================================

pub mod customer;
