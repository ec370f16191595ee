//! # Order Session State
//!
//! Manages the active order for one billing session.
//!
//! ## Thread Safety
//! The order is wrapped in `Arc<Mutex<T>>` because the surrounding
//! plumbing (UI handlers, terminal commands) may run concurrently, and
//! only one of them should mutate the order at a time. No operation
//! suspends while holding the lock, so intermediate states are never
//! observable within one session.

use std::sync::{Arc, Mutex};

use khata_core::{Area, CoreError, MenuCatalog, Order, OrderTotals};
use khata_db::Database;

use crate::error::SessionResult;

/// The active billing session: the loaded menu plus the in-progress order.
///
/// Created empty at session start and after each successful finalize.
/// Abandoning it has no durable effect; nothing is persisted until
/// finalize succeeds.
#[derive(Debug)]
pub struct OrderSession {
    catalog: MenuCatalog,
    order: Arc<Mutex<Order>>,
}

impl OrderSession {
    /// Loads the menu catalog from the database and opens a session.
    pub async fn load(
        db: &Database,
        table_no: impl Into<String>,
        party_no: impl Into<String>,
        waiter_no: impl Into<String>,
        area: Area,
    ) -> SessionResult<Self> {
        let records = db.menu().list().await?;
        Ok(Self::with_catalog(
            MenuCatalog::new(records),
            table_no,
            party_no,
            waiter_no,
            area,
        ))
    }

    /// Opens a session over an already-loaded catalog.
    pub fn with_catalog(
        catalog: MenuCatalog,
        table_no: impl Into<String>,
        party_no: impl Into<String>,
        waiter_no: impl Into<String>,
        area: Area,
    ) -> Self {
        OrderSession {
            catalog,
            order: Arc::new(Mutex::new(Order::new(table_no, party_no, waiter_no, area))),
        }
    }

    /// Submits a raw item code typed at the counter.
    ///
    /// Resolves the code against the catalog and merges it into the
    /// order: a repeated code increments the existing line's quantity, a
    /// new code appends a line priced for the current area. On
    /// `ItemNotFound` the order is left unmodified.
    ///
    /// Returns the recomputed totals for display.
    pub fn submit_code(&self, raw: &str) -> SessionResult<OrderTotals> {
        let record = self
            .catalog
            .find_by_code(raw)
            .ok_or_else(|| CoreError::ItemNotFound {
                code: raw.trim().to_string(),
            })?;

        self.with_order_mut(|order| order.add_record(record))?;
        Ok(self.totals())
    }

    /// Overwrites a line's quantity; a value <= 0 removes the line.
    pub fn set_quantity(&self, menu_id: i64, quantity: i64) -> SessionResult<OrderTotals> {
        self.with_order_mut(|order| order.set_quantity(menu_id, quantity))?;
        Ok(self.totals())
    }

    /// Switches the seating area for lines added from now on.
    ///
    /// Existing lines keep the price they were first added at.
    pub fn set_area(&self, area: Area) {
        self.with_order_mut(|order| order.set_area(area));
    }

    /// Current totals, derived from the live line set.
    pub fn totals(&self) -> OrderTotals {
        self.with_order(|order| OrderTotals::from(order))
    }

    /// A point-in-time copy of the order, for display or finalize.
    pub fn snapshot(&self) -> Order {
        self.with_order(|order| order.clone())
    }

    /// Clears the order after a successful commit.
    pub(crate) fn clear(&self) {
        self.with_order_mut(|order| order.clear());
    }

    /// The loaded catalog.
    pub fn catalog(&self) -> &MenuCatalog {
        &self.catalog
    }

    /// Executes a function with read access to the order.
    pub fn with_order<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Order) -> R,
    {
        let order = self.order.lock().expect("Order mutex poisoned");
        f(&order)
    }

    /// Executes a function with write access to the order.
    pub fn with_order_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Order) -> R,
    {
        let mut order = self.order.lock().expect("Order mutex poisoned");
        f(&mut order)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
