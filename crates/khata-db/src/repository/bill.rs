//! # Bill Repository
//!
//! The atomic bill commit and durable bill lookups.
//!
//! ## Commit Protocol
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                  commit_bill(draft, date)                       │
//! │                                                                 │
//! │  BEGIN TRANSACTION                                              │
//! │     │                                                           │
//! │     ├── 1. read + advance bill_sequence  → bill_no              │
//! │     │                                                           │
//! │     ├── 2. INSERT bills header           → bill_id              │
//! │     │      (items reference this generated id, so the header    │
//! │     │       must go first)                                      │
//! │     │                                                           │
//! │     ├── 3. INSERT one bill_items row per draft line             │
//! │     │                                                           │
//! │  COMMIT ── success → CommittedBill { bill_id, bill_no }         │
//! │     │                                                           │
//! │     └───── any failure → ROLLBACK: no header, no items, the     │
//! │            sequence untouched. The caller's in-memory order     │
//! │            survives for a deliberate operator retry.            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::sequence;
use khata_core::{BillDraft, BillItemRecord, BillRecord};

/// The outcome of a successful commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommittedBill {
    /// Database-assigned header id.
    pub bill_id: i64,
    /// The per-day sequential number assigned inside the transaction.
    pub bill_no: i64,
}

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Persists a finalized order as one durable transaction.
    ///
    /// Performs no validation and no retries: preconditions are the
    /// caller's job (checked before any I/O), and a failed commit is
    /// surfaced as-is so the operator can retry deliberately.
    pub async fn commit_bill(
        &self,
        draft: &BillDraft,
        bill_date: NaiveDate,
    ) -> DbResult<CommittedBill> {
        debug!(
            table_no = %draft.table_no,
            items = draft.items.len(),
            total = %draft.total,
            "Opening bill commit transaction"
        );

        let mut tx = self.pool.begin().await?;

        let bill_no = sequence::next_bill_number(&mut tx, bill_date).await?;
        let created_at = Utc::now();

        let header = sqlx::query(
            r#"
            INSERT INTO bills (
                bill_no, table_no, party_no, waiter_no, area, total_paise, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(bill_no)
        .bind(&draft.table_no)
        .bind(&draft.party_no)
        .bind(&draft.waiter_no)
        .bind(draft.area)
        .bind(draft.total.paise())
        .bind(created_at)
        .execute(&mut *tx)
        .await?;

        let bill_id = header.last_insert_rowid();

        for item in &draft.items {
            sqlx::query(
                r#"
                INSERT INTO bill_items (
                    bill_id, item_id, quantity, rate_paise, amount_paise
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(bill_id)
            .bind(item.item_id)
            .bind(item.quantity)
            .bind(item.rate.paise())
            .bind(item.amount().paise())
            .execute(&mut *tx)
            .await?;
        }

        tx.commit()
            .await
            .map_err(|e| DbError::CommitFailed(e.to_string()))?;

        info!(bill_id, bill_no, total = %draft.total, "Bill committed");

        Ok(CommittedBill { bill_id, bill_no })
    }

    /// Returns the number the next successful commit on `bill_date` will
    /// be assigned. For display at session start; advances nothing.
    pub async fn peek_bill_number(&self, bill_date: NaiveDate) -> DbResult<i64> {
        sequence::peek_bill_number(&self.pool, bill_date).await
    }

    /// Gets a committed bill header by id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<BillRecord>> {
        let bill: Option<BillRecord> = sqlx::query_as(
            r#"
            SELECT id, bill_no, table_no, party_no, waiter_no, area,
                   total_paise, created_at
            FROM bills
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Gets all lines of a committed bill, in insertion order.
    pub async fn get_items(&self, bill_id: i64) -> DbResult<Vec<BillItemRecord>> {
        let items: Vec<BillItemRecord> = sqlx::query_as(
            r#"
            SELECT id, bill_id, item_id, quantity, rate_paise, amount_paise
            FROM bill_items
            WHERE bill_id = ?1
            ORDER BY id
            "#,
        )
        .bind(bill_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts committed bill headers. Diagnostics and tests.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use khata_core::{Area, DraftItem, Money};

    fn draft() -> BillDraft {
        BillDraft {
            table_no: "T1".to_string(),
            party_no: "P1".to_string(),
            waiter_no: "W1".to_string(),
            area: Area::General,
            items: vec![
                DraftItem {
                    item_id: 7,
                    quantity: 2,
                    rate: Money::from_paise(3000),
                },
                DraftItem {
                    item_id: 8,
                    quantity: 1,
                    rate: Money::from_paise(4500),
                },
            ],
            total: Money::from_paise(11025), // 10500 + 5% tax
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[tokio::test]
    async fn test_commit_persists_header_and_items() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bills = db.bills();

        let committed = bills.commit_bill(&draft(), day(1)).await.unwrap();
        assert_eq!(committed.bill_no, 1);

        let header = bills.get_by_id(committed.bill_id).await.unwrap().unwrap();
        assert_eq!(header.bill_no, 1);
        assert_eq!(header.table_no, "T1");
        assert_eq!(header.area, Area::General);
        assert_eq!(header.total_paise, 11025);

        let items = bills.get_items(committed.bill_id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_id, 7);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].rate_paise, 3000);
        assert_eq!(items[0].amount_paise, 6000); // quantity × rate
        assert_eq!(items[1].amount_paise, 4500);
    }

    #[tokio::test]
    async fn test_same_day_numbers_are_consecutive() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bills = db.bills();

        let first = bills.commit_bill(&draft(), day(1)).await.unwrap();
        let second = bills.commit_bill(&draft(), day(1)).await.unwrap();

        assert_eq!(first.bill_no, 1);
        assert_eq!(second.bill_no, 2);
        assert_eq!(bills.peek_bill_number(day(1)).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_new_day_resets_to_one() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bills = db.bills();

        for _ in 0..3 {
            bills.commit_bill(&draft(), day(1)).await.unwrap();
        }
        assert_eq!(bills.peek_bill_number(day(1)).await.unwrap(), 4);

        // Regardless of the previous day's terminal value.
        assert_eq!(bills.peek_bill_number(day(2)).await.unwrap(), 1);
        let next_day = bills.commit_bill(&draft(), day(2)).await.unwrap();
        assert_eq!(next_day.bill_no, 1);
    }

    #[tokio::test]
    async fn test_failed_commit_leaves_no_partial_state() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let bills = db.bills();

        bills.commit_bill(&draft(), day(1)).await.unwrap();

        // A zero quantity violates the bill_items CHECK constraint after
        // the header insert has already succeeded inside the transaction.
        let mut poisoned = draft();
        poisoned.items[1].quantity = 0;

        let err = bills.commit_bill(&poisoned, day(1)).await.unwrap_err();
        assert!(matches!(err, DbError::QueryFailed(_)));

        // No header, no orphaned items, and the sequence was rolled back.
        assert_eq!(bills.count().await.unwrap(), 1);
        let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bill_items")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(orphans, 2);
        assert_eq!(bills.peek_bill_number(day(1)).await.unwrap(), 2);

        // The operator retries with the order corrected; the number the
        // failed attempt would have taken is reused, never skipped.
        let retried = bills.commit_bill(&draft(), day(1)).await.unwrap();
        assert_eq!(retried.bill_no, 2);
    }
}
