//! # Validation Module
//!
//! Input validation utilities for Khata.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Validation Layers                            │
//! │                                                                 │
//! │  Layer 1: Session boundary (this module)                        │
//! │  ├── Finalize preconditions (fail fast, no I/O attempted)       │
//! │  └── Menu input rules before any insert                         │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: Database (SQLite)                                     │
//! │  ├── NOT NULL and UNIQUE constraints                            │
//! │  ├── CHECK (quantity > 0) on bill_items                         │
//! │  └── Foreign key constraints                                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::order::Order;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Finalize Preconditions
// =============================================================================

/// Checks the preconditions for finalizing an order.
///
/// ## Rules
/// - The order must have at least one line item (`EmptyOrder`)
/// - The table number must be non-empty (`MissingTable`)
///
/// Violations fail fast; the caller must not have opened a transaction.
pub fn validate_finalize(order: &Order) -> CoreResult<()> {
    if order.is_empty() {
        return Err(CoreError::EmptyOrder);
    }

    if order.table_no.trim().is_empty() {
        return Err(CoreError::MissingTable);
    }

    Ok(())
}

// =============================================================================
// Menu Input Validators
// =============================================================================

/// Validates an alphabetic item code.
///
/// ## Rules
/// - Must not be empty
/// - At most 10 characters
/// - ASCII letters only
pub fn validate_alpha_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "alpha code".to_string(),
        });
    }

    if code.len() > 10 {
        return Err(ValidationError::TooLong {
            field: "alpha code".to_string(),
            max: 10,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::InvalidFormat {
            field: "alpha code".to_string(),
            reason: "must contain only letters".to_string(),
        });
    }

    Ok(())
}

/// Validates a numeric item code.
///
/// ## Rules
/// - Must not be empty
/// - At most 10 characters
/// - ASCII digits only (leading zeros allowed, hence a string)
pub fn validate_numeric_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "numeric code".to_string(),
        });
    }

    if code.len() > 10 {
        return Err(ValidationError::TooLong {
            field: "numeric code".to_string(),
            max: 10,
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "numeric code".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a menu item description.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    let description = description.trim();

    if description.is_empty() {
        return Err(ValidationError::Required {
            field: "description".to_string(),
        });
    }

    if description.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a rate in paise.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for complimentary items)
pub fn validate_rate_paise(paise: i64) -> ValidationResult<()> {
    if paise < 0 {
        return Err(ValidationError::OutOfRange {
            field: "rate".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a complete menu item input before insert.
pub fn validate_new_menu_item(item: &crate::types::NewMenuItem) -> ValidationResult<()> {
    validate_alpha_code(&item.alpha_code)?;
    validate_numeric_code(&item.numeric_code)?;
    validate_description(&item.description)?;
    validate_rate_paise(item.general_rate_paise)?;
    validate_rate_paise(item.ac_rate_paise)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
