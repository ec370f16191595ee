//! # Wire DTOs
//!
//! The JSON boundary shapes. Field names are camelCase on the wire:
//!
//! ```json
//! {
//!   "billDetails": { "tableNo": "T1", "partyNo": "P1",
//!                    "waiterNo": "W1", "area": "GENERAL" },
//!   "billItems": [ { "id": 7, "quantity": 2, "price": 3000 } ],
//!   "total": 6300
//! }
//! ```
//!
//! Prices are integer paise end to end; only display layers format
//! decimals.

use serde::{Deserialize, Serialize};

use khata_core::{Area, BillDraft, CoreError, CoreResult, DraftItem, Money, Order, ValidationError};
use khata_db::CommittedBill;

// =============================================================================
// Finalize Request
// =============================================================================

/// Bill header fields of a finalize request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDetails {
    pub table_no: String,
    pub party_no: String,
    pub waiter_no: String,
    pub area: Area,
}

/// One line of a finalize request. `price` is the frozen unit rate in
/// paise.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestItem {
    pub id: i64,
    pub quantity: i64,
    pub price: i64,
}

/// The finalize payload accepted at the JSON boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalizeBillRequest {
    pub bill_details: BillDetails,
    pub bill_items: Vec<RequestItem>,
    /// Grand total in paise as computed by the totals calculator.
    pub total: i64,
}

impl FinalizeBillRequest {
    /// Builds the payload from a live order.
    pub fn from_order(order: &Order) -> Self {
        FinalizeBillRequest {
            bill_details: BillDetails {
                table_no: order.table_no.clone(),
                party_no: order.party_no.clone(),
                waiter_no: order.waiter_no.clone(),
                area: order.area,
            },
            bill_items: order
                .items
                .iter()
                .map(|i| RequestItem {
                    id: i.menu_id,
                    quantity: i.quantity,
                    price: i.unit_price.paise(),
                })
                .collect(),
            total: order.total().paise(),
        }
    }

    /// Validates the payload and converts it into a commit-ready draft.
    ///
    /// Rejections happen here, before any transaction is opened: an
    /// empty item list, a missing table number, a non-positive total, a
    /// non-positive line quantity or a negative line price.
    pub fn into_draft(self) -> CoreResult<BillDraft> {
        if self.bill_items.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        if self.bill_details.table_no.trim().is_empty() {
            return Err(CoreError::MissingTable);
        }

        if self.total <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "total".to_string(),
            }
            .into());
        }

        if self.bill_items.iter().any(|i| i.quantity <= 0) {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            }
            .into());
        }

        // Zero is allowed for complimentary items; negative never is.
        if self.bill_items.iter().any(|i| i.price < 0) {
            return Err(ValidationError::OutOfRange {
                field: "price".to_string(),
                min: 0,
                max: i64::MAX,
            }
            .into());
        }

        Ok(BillDraft {
            table_no: self.bill_details.table_no,
            party_no: self.bill_details.party_no,
            waiter_no: self.bill_details.waiter_no,
            area: self.bill_details.area,
            items: self
                .bill_items
                .into_iter()
                .map(|i| DraftItem {
                    item_id: i.id,
                    quantity: i.quantity,
                    rate: Money::from_paise(i.price),
                })
                .collect(),
            total: Money::from_paise(self.total),
        })
    }
}

// =============================================================================
// Finalize Response
// =============================================================================

/// The response to a successful finalize.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillReceipt {
    /// Database-assigned header id.
    pub bill_id: i64,
    /// Per-day sequential bill number.
    pub bill_no: i64,
    /// Grand total in paise.
    pub total_paise: i64,
}

impl BillReceipt {
    pub(crate) fn new(committed: CommittedBill, total_paise: i64) -> Self {
        BillReceipt {
            bill_id: committed.bill_id,
            bill_no: committed.bill_no,
            total_paise,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use khata_core::MenuRecord;

    fn request() -> FinalizeBillRequest {
        FinalizeBillRequest {
            bill_details: BillDetails {
                table_no: "T1".to_string(),
                party_no: "P1".to_string(),
                waiter_no: "W1".to_string(),
                area: Area::General,
            },
            bill_items: vec![RequestItem {
                id: 7,
                quantity: 2,
                price: 3000,
            }],
            total: 6300,
        }
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(request()).unwrap();
        assert!(json.get("billDetails").is_some());
        assert!(json.get("billItems").is_some());
        assert_eq!(json["billDetails"]["tableNo"], "T1");
        assert_eq!(json["billDetails"]["area"], "GENERAL");
        assert_eq!(json["billItems"][0]["price"], 3000);
    }

    #[test]
    fn test_into_draft() {
        let draft = request().into_draft().unwrap();
        assert_eq!(draft.table_no, "T1");
        assert_eq!(draft.items.len(), 1);
        assert_eq!(draft.items[0].rate.paise(), 3000);
        assert_eq!(draft.items[0].amount().paise(), 6000);
        assert_eq!(draft.total.paise(), 6300);
    }

    #[test]
    fn test_empty_items_rejected() {
        let mut req = request();
        req.bill_items.clear();
        assert!(matches!(req.into_draft(), Err(CoreError::EmptyOrder)));
    }

    #[test]
    fn test_missing_table_rejected() {
        let mut req = request();
        req.bill_details.table_no = "  ".to_string();
        assert!(matches!(req.into_draft(), Err(CoreError::MissingTable)));
    }

    #[test]
    fn test_zero_total_rejected() {
        let mut req = request();
        req.total = 0;
        assert!(matches!(req.into_draft(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_non_positive_quantity_rejected() {
        let mut req = request();
        req.bill_items[0].quantity = 0;
        assert!(matches!(req.into_draft(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut req = request();
        req.bill_items[0].price = -3000;
        assert!(matches!(req.into_draft(), Err(CoreError::Validation(_))));

        // Zero stays valid (complimentary items).
        let mut req = request();
        req.bill_items[0].price = 0;
        assert!(req.into_draft().is_ok());
    }

    #[test]
    fn test_from_order_matches_the_live_totals() {
        let mut order = Order::new("T1", "P1", "W1", Area::General);
        let idli = MenuRecord {
            id: 7,
            alpha_code: "IDL".to_string(),
            numeric_code: "101".to_string(),
            description: "Idli (2 pcs)".to_string(),
            general_rate_paise: 3000,
            ac_rate_paise: 3500,
        };
        order.add_record(&idli).unwrap();
        order.add_record(&idli).unwrap();

        let req = FinalizeBillRequest::from_order(&order);
        assert_eq!(req.bill_details.table_no, "T1");
        assert_eq!(req.bill_items.len(), 1);
        assert_eq!(req.bill_items[0].quantity, 2);
        assert_eq!(req.bill_items[0].price, 3000);
        assert_eq!(req.total, 6300); // 6000 + 5% tax

        let draft = req.into_draft().unwrap();
        assert_eq!(draft.total.paise(), order.total().paise());
    }
}
