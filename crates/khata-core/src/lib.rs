//! # khata-core: Pure Business Logic for Khata
//!
//! This crate is the heart of the billing engine. It contains all business
//! logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Khata Billing Flow                         │
//! │                                                                 │
//! │  Operator input (item codes, quantities)                        │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │              ★ khata-core (THIS CRATE) ★                  │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐  ┌─────────┐  ┌─────────┐  ┌────────────┐   │  │
//! │  │  │  money  │  │ catalog │  │  order  │  │ validation │   │  │
//! │  │  │  Money  │  │  code   │  │  merge  │  │  finalize  │   │  │
//! │  │  │ TaxCalc │  │ lookup  │  │ totals  │  │   rules    │   │  │
//! │  │  └─────────┘  └─────────┘  └─────────┘  └────────────┘   │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  khata-db (atomic bill commit, per-day sequencer)               │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (MenuRecord, Area, bill records)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Item-code resolution against the loaded menu
//! - [`order`] - The in-memory Order aggregate and its totals
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **Integer Money**: All monetary values are in paise (i64)
//! 3. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use khata_core::money::Money;
//! use khata_core::types::TaxRate;
//! use khata_core::TAX_RATE_BPS;
//!
//! // Create money from paise (never from floats!)
//! let subtotal = Money::from_paise(6000); // ₹60.00
//!
//! // Fixed 5% tax policy
//! let tax = subtotal.calculate_tax(TaxRate::from_bps(TAX_RATE_BPS));
//! assert_eq!(tax.paise(), 300); // ₹3.00
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod order;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::MenuCatalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{BillDraft, DraftItem, LineItem, Order, OrderTotals};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Fixed tax policy: 5% on the order subtotal, expressed in basis points.
///
/// Tax is applied to the subtotal as a whole, not per line, so rounding
/// happens exactly once per order.
pub const TAX_RATE_BPS: u32 = 500;

/// Maximum distinct line items allowed in a single order.
///
/// Prevents runaway orders and keeps the bill printable on one page.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single line item.
///
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;
