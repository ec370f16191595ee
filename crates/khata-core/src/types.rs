//! # Domain Types
//!
//! Core domain types used throughout Khata.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Domain Types                              │
//! │                                                                 │
//! │  ┌────────────────┐  ┌────────────────┐  ┌──────────────────┐   │
//! │  │   MenuRecord   │  │   BillRecord   │  │  BillItemRecord  │   │
//! │  │  ────────────  │  │  ────────────  │  │  ──────────────  │   │
//! │  │  id            │  │  id            │  │  bill_id (FK)    │   │
//! │  │  alpha_code    │  │  bill_no       │  │  item_id         │   │
//! │  │  numeric_code  │  │  table_no      │  │  quantity        │   │
//! │  │  general_rate  │  │  total_paise   │  │  rate, amount    │   │
//! │  │  ac_rate       │  └────────────────┘  └──────────────────┘   │
//! │  └────────────────┘                                             │
//! │                                                                 │
//! │  ┌────────────────┐  ┌────────────────┐                         │
//! │  │      Area      │  │    TaxRate     │                         │
//! │  │  ────────────  │  │  ────────────  │                         │
//! │  │  General       │  │  bps (u32)     │                         │
//! │  │  Ac            │  │  500 = 5%      │                         │
//! │  └────────────────┘  └────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! A menu record has one database id and two business codes (alphabetic
//! and numeric); either code resolves to the same record at the counter.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 500 bps = 5% (the fixed policy, [`crate::TAX_RATE_BPS`])
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Seating Area
// =============================================================================

/// Seating classification determining which of two rate columns applies.
///
/// Serialized as `"GENERAL"` / `"AC"` on the wire and stored the same way
/// in the `bills.area` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Area {
    /// Open seating; general rate applies.
    General,
    /// Air-conditioned seating; AC rate applies.
    Ac,
}

impl Default for Area {
    fn default() -> Self {
        Area::General
    }
}

// =============================================================================
// Menu Record
// =============================================================================

/// One entry of the menu catalog.
///
/// Read-only from the engine's perspective; owned by the menu tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    /// Unique identifier (database-assigned).
    pub id: i64,

    /// Short alphabetic code, unique (e.g. "IDL").
    pub alpha_code: String,

    /// Short numeric code, unique (e.g. "101"). Kept as a string: it is
    /// an identifier, not a number, and may carry leading zeros.
    pub numeric_code: String,

    /// Description shown on the order and the bill.
    pub description: String,

    /// Unit rate in paise for the general seating area.
    pub general_rate_paise: i64,

    /// Unit rate in paise for the AC seating area.
    pub ac_rate_paise: i64,
}

impl MenuRecord {
    /// Resolves the applicable unit price for a seating area.
    ///
    /// Pure function, no side effects. The typed schema makes an absent or
    /// non-numeric rate unrepresentable; a negative rate is the remaining
    /// malformed case and is rejected as `InvalidMenuData`.
    pub fn rate_for(&self, area: Area) -> CoreResult<Money> {
        let paise = match area {
            Area::General => self.general_rate_paise,
            Area::Ac => self.ac_rate_paise,
        };

        if paise < 0 {
            return Err(CoreError::InvalidMenuData {
                menu_id: self.id,
                reason: format!("negative rate {} for {:?} area", paise, area),
            });
        }

        Ok(Money::from_paise(paise))
    }
}

/// Input for creating a menu record. The id is assigned by the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenuItem {
    pub alpha_code: String,
    pub numeric_code: String,
    pub description: String,
    pub general_rate_paise: i64,
    pub ac_rate_paise: i64,
}

// =============================================================================
// Durable Bill Records
// =============================================================================

/// A committed bill header.
///
/// Exists in durable storage if and only if all of its [`BillItemRecord`]
/// rows exist; the commit is a single transaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct BillRecord {
    /// Database-assigned id, immutable once created.
    pub id: i64,
    /// Per-day sequential bill number (resets to 1 at day rollover).
    pub bill_no: i64,
    pub table_no: String,
    pub party_no: String,
    pub waiter_no: String,
    pub area: Area,
    /// Grand total in paise as computed at finalize time.
    pub total_paise: i64,
    pub created_at: DateTime<Utc>,
}

/// One line of a committed bill.
///
/// Rate and amount are copied at commit time, decoupled from the live
/// menu record so historical bills are immune to later rate changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct BillItemRecord {
    pub id: i64,
    pub bill_id: i64,
    /// The menu record this line was priced from.
    pub item_id: i64,
    pub quantity: i64,
    /// Unit rate in paise at commit time (frozen).
    pub rate_paise: i64,
    /// quantity × rate, in paise.
    pub amount_paise: i64,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn idli() -> MenuRecord {
        MenuRecord {
            id: 7,
            alpha_code: "IDL".to_string(),
            numeric_code: "101".to_string(),
            description: "Idli (2 pcs)".to_string(),
            general_rate_paise: 3000,
            ac_rate_paise: 3500,
        }
    }

    #[test]
    fn test_rate_for_general() {
        assert_eq!(idli().rate_for(Area::General).unwrap().paise(), 3000);
    }

    #[test]
    fn test_rate_for_ac() {
        assert_eq!(idli().rate_for(Area::Ac).unwrap().paise(), 3500);
    }

    #[test]
    fn test_negative_rate_is_invalid() {
        let mut record = idli();
        record.ac_rate_paise = -1;

        assert!(record.rate_for(Area::General).is_ok());
        assert!(matches!(
            record.rate_for(Area::Ac),
            Err(CoreError::InvalidMenuData { menu_id: 7, .. })
        ));
    }

    #[test]
    fn test_tax_rate_percentage_for_display() {
        assert_eq!(TaxRate::from_bps(500).percentage(), 5.0);
        assert_eq!(TaxRate::zero().percentage(), 0.0);
    }

    #[test]
    fn test_area_wire_format() {
        assert_eq!(serde_json::to_string(&Area::General).unwrap(), "\"GENERAL\"");
        assert_eq!(serde_json::to_string(&Area::Ac).unwrap(), "\"AC\"");
    }

    #[test]
    fn test_menu_record_wire_format_is_camel_case() {
        let json = serde_json::to_value(idli()).unwrap();
        assert!(json.get("alphaCode").is_some());
        assert!(json.get("numericCode").is_some());
        assert!(json.get("generalRatePaise").is_some());
    }
}
