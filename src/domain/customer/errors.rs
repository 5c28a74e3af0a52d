// ============================================================================
// Customer Business Rule Errors
// ============================================================================

/// Field-level validation failures raised by constructors and setters.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Customer ID must be a positive integer, got {0}")]
    InvalidId(u64),

    #[error("Field '{field}' cannot be empty")]
    Empty { field: &'static str },

    #[error("Invalid email: {0} (expected name@domain.com)")]
    InvalidEmail(String),

    #[error("Invalid phone: {0} (use 8-15 digits, optional leading +)")]
    InvalidPhone(String),

    #[error("Invalid address: {0} (must be at least 5 characters)")]
    InvalidAddress(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CustomerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("A customer with ID {0} already exists")]
    DuplicateId(u64),

    #[error("A customer with email {0} already exists")]
    DuplicateEmail(String),

    #[error("No customer with ID {0}")]
    NotFound(u64),
}
