//! # Order Aggregate
//!
//! The in-progress order for one active billing session.
//!
//! ## Order Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Order State Operations                        │
//! │                                                                 │
//! │  Operator Action        Aggregator Call        State Change     │
//! │  ───────────────        ───────────────        ────────────     │
//! │                                                                 │
//! │  Type item code ──────► add_record() ───────► merge or append   │
//! │                                                                 │
//! │  Edit quantity ───────► set_quantity() ─────► overwrite/remove  │
//! │                                                                 │
//! │  Toggle seating ──────► set_area() ─────────► future adds only  │
//! │                                                                 │
//! │  Finalize OK ─────────► clear() ────────────► fresh session     │
//! │                                                                 │
//! │  Totals are derived on demand from the line set, never cached.  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Area, MenuRecord, TaxRate};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS, TAX_RATE_BPS};

// =============================================================================
// Line Item
// =============================================================================

/// One aggregated menu entry within an in-progress order.
///
/// ## Price Freezing
/// `unit_price` is snapshotted from the resolved rate at first add. It is
/// NOT re-resolved on later quantity increments, even if the seating area
/// is toggled mid-order. This is observable behavior the counter relies
/// on: one order, one price per item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// The menu record this line was created from.
    pub menu_id: i64,

    /// Description at time of adding (frozen).
    pub description: String,

    /// Unit price at time of adding (frozen).
    pub unit_price: Money,

    /// Quantity, always >= 1. Zero means the line is removed, never stored.
    pub quantity: i64,
}

impl LineItem {
    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Order
// =============================================================================

/// The in-progress order for one billing session.
///
/// ## Invariants
/// - Lines are unique by `menu_id` (re-adding increments quantity)
/// - Quantity is always > 0 (an edit to <= 0 removes the line)
/// - Insertion order is display order
/// - Maximum distinct lines: 100; maximum quantity per line: 999
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub table_no: String,
    pub party_no: String,
    pub waiter_no: String,

    /// Current seating area; governs the rate of lines added from now on.
    pub area: Area,

    /// Line items, insertion order = display order.
    pub items: Vec<LineItem>,
}

impl Order {
    /// Creates a new empty order for a table.
    pub fn new(
        table_no: impl Into<String>,
        party_no: impl Into<String>,
        waiter_no: impl Into<String>,
        area: Area,
    ) -> Self {
        Order {
            table_no: table_no.into(),
            party_no: party_no.into(),
            waiter_no: waiter_no.into(),
            area,
            items: Vec::new(),
        }
    }

    /// Adds a resolved menu record to the order.
    ///
    /// ## Behavior
    /// - Record already in the order: increments its quantity by 1. The
    ///   frozen unit price stands; the current area is NOT consulted.
    /// - New record: resolves the unit price for the order's current area
    ///   and appends a line with quantity 1.
    ///
    /// On any failure the order is left unmodified.
    pub fn add_record(&mut self, record: &MenuRecord) -> CoreResult<()> {
        if let Some(item) = self.items.iter_mut().find(|i| i.menu_id == record.id) {
            let new_qty = item.quantity + 1;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            item.quantity = new_qty;
            return Ok(());
        }

        if self.items.len() >= MAX_ORDER_ITEMS {
            return Err(CoreError::OrderTooLarge {
                max: MAX_ORDER_ITEMS,
            });
        }

        // Resolve the price before touching the line set so a malformed
        // rate leaves the order unmodified.
        let unit_price = record.rate_for(self.area)?;

        self.items.push(LineItem {
            menu_id: record.id,
            description: record.description.clone(),
            unit_price,
            quantity: 1,
        });
        Ok(())
    }

    /// Overwrites the quantity of a line, or removes it.
    ///
    /// A quantity <= 0 removes the line entirely; this is the only path
    /// that deletes a line item.
    pub fn set_quantity(&mut self, menu_id: i64, quantity: i64) -> CoreResult<()> {
        if quantity <= 0 {
            return self.remove_item(menu_id);
        }

        if quantity > MAX_ITEM_QUANTITY {
            return Err(CoreError::QuantityTooLarge {
                requested: quantity,
                max: MAX_ITEM_QUANTITY,
            });
        }

        match self.items.iter_mut().find(|i| i.menu_id == menu_id) {
            Some(item) => {
                item.quantity = quantity;
                Ok(())
            }
            None => Err(CoreError::ItemNotInOrder { menu_id }),
        }
    }

    /// Removes a line by menu id.
    fn remove_item(&mut self, menu_id: i64) -> CoreResult<()> {
        let initial_len = self.items.len();
        self.items.retain(|i| i.menu_id != menu_id);

        if self.items.len() == initial_len {
            Err(CoreError::ItemNotInOrder { menu_id })
        } else {
            Ok(())
        }
    }

    /// Switches the seating area for lines added from now on.
    ///
    /// Existing lines keep their frozen prices.
    pub fn set_area(&mut self, area: Area) {
        self.area = area;
    }

    /// Clears all lines after a successful commit.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Checks if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Calculates the subtotal: Σ(unit price × quantity).
    pub fn subtotal(&self) -> Money {
        self.items
            .iter()
            .fold(Money::zero(), |acc, i| acc + i.line_total())
    }

    /// Calculates the tax: 5% of the subtotal.
    pub fn tax(&self) -> Money {
        self.subtotal().calculate_tax(TaxRate::from_bps(TAX_RATE_BPS))
    }

    /// Calculates the grand total (subtotal + tax).
    pub fn total(&self) -> Money {
        self.subtotal() + self.tax()
    }

    /// Snapshots the order into the shape the commit transaction needs.
    pub fn to_draft(&self) -> BillDraft {
        BillDraft {
            table_no: self.table_no.clone(),
            party_no: self.party_no.clone(),
            waiter_no: self.waiter_no.clone(),
            area: self.area,
            items: self
                .items
                .iter()
                .map(|i| DraftItem {
                    item_id: i.menu_id,
                    quantity: i.quantity,
                    rate: i.unit_price,
                })
                .collect(),
            total: self.total(),
        }
    }
}

// =============================================================================
// Order Totals
// =============================================================================

/// Totals summary derived from an order, for display after every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderTotals {
    pub item_count: usize,
    pub total_quantity: i64,
    pub subtotal_paise: i64,
    pub tax_paise: i64,
    pub total_paise: i64,
}

impl From<&Order> for OrderTotals {
    fn from(order: &Order) -> Self {
        OrderTotals {
            item_count: order.item_count(),
            total_quantity: order.total_quantity(),
            subtotal_paise: order.subtotal().paise(),
            tax_paise: order.tax().paise(),
            total_paise: order.total().paise(),
        }
    }
}

// =============================================================================
// Bill Draft
// =============================================================================

/// Immutable snapshot of an order handed to the commit transaction.
///
/// Rates are the frozen line prices; the commit copies them into
/// `bill_items` so history is decoupled from later menu edits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub table_no: String,
    pub party_no: String,
    pub waiter_no: String,
    pub area: Area,
    pub items: Vec<DraftItem>,
    /// Grand total as computed by the totals calculator.
    pub total: Money,
}

/// One line of a bill draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftItem {
    pub item_id: i64,
    pub quantity: i64,
    pub rate: Money,
}

impl DraftItem {
    /// quantity × rate, copied into the bill_items row at commit time.
    pub fn amount(&self) -> Money {
        self.rate.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
