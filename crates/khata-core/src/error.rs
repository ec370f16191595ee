//! # Error Types
//!
//! Domain-specific error types for khata-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Error Types                               │
//! │                                                                 │
//! │  khata-core errors (this file)                                  │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  khata-db errors (separate crate)                               │
//! │  └── DbError          - Database operation failures             │
//! │                                                                 │
//! │  khata-session errors                                           │
//! │  └── SessionError     - Either of the above, at the boundary    │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → SessionError → operator    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (code, menu id, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// All of these are recoverable at the session boundary: the operator is
/// shown the message and the in-memory order is left exactly as it was.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The submitted code matches no menu record.
    ///
    /// Recoverable; the operator retries input. The order is unmodified.
    #[error("no menu item matches code '{code}'")]
    ItemNotFound { code: String },

    /// A matched menu record carries a malformed rate.
    ///
    /// Blocks that item only; other items remain orderable.
    #[error("menu item {menu_id} has invalid data: {reason}")]
    InvalidMenuData { menu_id: i64, reason: String },

    /// Finalize was requested on an order with no line items.
    #[error("cannot finalize an empty order")]
    EmptyOrder,

    /// Finalize was requested without a table number.
    #[error("table number is required to finalize")]
    MissingTable,

    /// A quantity edit referenced a menu id not present in the order.
    #[error("menu item {menu_id} is not in the order")]
    ItemNotInOrder { menu_id: i64 },

    /// Order has exceeded the maximum number of distinct line items.
    #[error("order cannot have more than {max} line items")]
    OrderTooLarge { max: usize },

    /// Line item quantity exceeds the maximum allowed.
    #[error("quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when operator or admin input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. non-alphabetic alpha code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound {
            code: "999".to_string(),
        };
        assert_eq!(err.to_string(), "no menu item matches code '999'");

        let err = CoreError::QuantityTooLarge {
            requested: 1000,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity 1000 exceeds maximum allowed (999)");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "alpha code".to_string(),
        };
        assert_eq!(err.to_string(), "alpha code is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "description".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
