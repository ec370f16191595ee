//! # Billing Service
//!
//! The finalize orchestration: precondition checks, the atomic commit,
//! and the post-commit session reset.
//!
//! ## Failure Semantics
//! Preconditions fail before any I/O, so a rejected finalize touches
//! neither the database nor the order. A commit failure rolls the
//! transaction back and leaves the order intact for a deliberate
//! operator retry. Only a fully successful commit clears the session.

use chrono::{Local, NaiveDate};
use tracing::info;

use khata_core::validation::validate_finalize;
use khata_db::Database;

use crate::dto::{BillReceipt, FinalizeBillRequest};
use crate::error::SessionResult;
use crate::session::OrderSession;

/// Finalizes orders against the database.
#[derive(Debug, Clone)]
pub struct BillingService {
    db: Database,
}

impl BillingService {
    /// Creates a billing service over an open database.
    pub fn new(db: Database) -> Self {
        BillingService { db }
    }

    /// The number the next successful finalize today will be assigned.
    /// For display at session start; advances nothing.
    pub async fn current_bill_number(&self) -> SessionResult<i64> {
        Ok(self
            .db
            .bills()
            .peek_bill_number(Local::now().date_naive())
            .await?)
    }

    /// Finalizes the session's order under today's business date.
    pub async fn finalize(&self, session: &OrderSession) -> SessionResult<BillReceipt> {
        self.finalize_on(session, Local::now().date_naive()).await
    }

    /// Finalizes the session's order under an explicit business date.
    ///
    /// The order is checked first (non-empty, table number present);
    /// rejections happen before any I/O. On success the durable bill id
    /// and per-day number are returned and the session starts fresh for
    /// the next customer.
    pub async fn finalize_on(
        &self,
        session: &OrderSession,
        bill_date: NaiveDate,
    ) -> SessionResult<BillReceipt> {
        let order = session.snapshot();
        validate_finalize(&order)?;

        let draft = order.to_draft();
        let total_paise = draft.total.paise();

        let committed = self.db.bills().commit_bill(&draft, bill_date).await?;

        session.clear();
        info!(
            bill_id = committed.bill_id,
            bill_no = committed.bill_no,
            total_paise,
            "Bill finalized, session reset"
        );

        Ok(BillReceipt::new(committed, total_paise))
    }

    /// Finalizes a payload received at the JSON boundary.
    ///
    /// The request is validated and converted to a draft before any
    /// transaction is opened; there is no session to reset on this path.
    pub async fn finalize_request(
        &self,
        request: FinalizeBillRequest,
        bill_date: NaiveDate,
    ) -> SessionResult<BillReceipt> {
        let draft = request.into_draft()?;
        let total_paise = draft.total.paise();

        let committed = self.db.bills().commit_bill(&draft, bill_date).await?;

        info!(
            bill_id = committed.bill_id,
            bill_no = committed.bill_no,
            total_paise,
            "Bill finalized from wire request"
        );

        Ok(BillReceipt::new(committed, total_paise))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{BillDetails, RequestItem};
    use crate::SessionError;
    use khata_core::{Area, CoreError, NewMenuItem};
    use khata_db::DbConfig;

    async fn seeded_db() -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let menu = db.menu();

        menu.insert(&NewMenuItem {
            alpha_code: "IDL".to_string(),
            numeric_code: "101".to_string(),
            description: "Idli (2 pcs)".to_string(),
            general_rate_paise: 3000,
            ac_rate_paise: 3500,
        })
        .await
        .unwrap();

        menu.insert(&NewMenuItem {
            alpha_code: "DOS".to_string(),
            numeric_code: "102".to_string(),
            description: "Plain Dosa".to_string(),
            general_rate_paise: 4500,
            ac_rate_paise: 5000,
        })
        .await
        .unwrap();

        db
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    #[tokio::test]
    async fn test_finalize_commits_and_resets_session() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        let session = OrderSession::load(&db, "T1", "P1", "W1", Area::General)
            .await
            .unwrap();
        session.submit_code("idl").unwrap();
        session.submit_code("IDL").unwrap();

        let receipt = service.finalize_on(&session, day(1)).await.unwrap();
        assert_eq!(receipt.bill_no, 1);
        assert_eq!(receipt.total_paise, 6300); // 6000 + 5% tax

        // Durable: header and lines survive the session.
        let header = db.bills().get_by_id(receipt.bill_id).await.unwrap().unwrap();
        assert_eq!(header.total_paise, 6300);
        let items = db.bills().get_items(receipt.bill_id).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].quantity, 2);
        assert_eq!(items[0].amount_paise, 6000);

        // The session starts fresh for the next customer.
        assert!(session.with_order(|o| o.is_empty()));
    }

    #[tokio::test]
    async fn test_empty_order_rejected_without_io() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        let session = OrderSession::load(&db, "T1", "P1", "W1", Area::General)
            .await
            .unwrap();

        let err = service.finalize_on(&session, day(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::Core(CoreError::EmptyOrder)));
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_table_rejected_without_io() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        let session = OrderSession::load(&db, "  ", "P1", "W1", Area::General)
            .await
            .unwrap();
        session.submit_code("IDL").unwrap();

        let err = service.finalize_on(&session, day(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::Core(CoreError::MissingTable)));
        assert_eq!(db.bills().count().await.unwrap(), 0);

        // The order survives the rejection.
        assert_eq!(session.totals().item_count, 1);
    }

    #[tokio::test]
    async fn test_failed_commit_preserves_the_order() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        let session = OrderSession::load(&db, "T1", "P1", "W1", Area::General)
            .await
            .unwrap();
        session.submit_code("IDL").unwrap();

        db.close().await;

        let err = service.finalize_on(&session, day(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::Db(_)));

        // Nothing was cleared; the operator can retry.
        assert_eq!(session.totals().item_count, 1);
    }

    #[tokio::test]
    async fn test_numbers_are_sequential_across_sessions() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        for expected_no in 1..=3 {
            let session = OrderSession::load(&db, "T1", "P1", "W1", Area::General)
                .await
                .unwrap();
            session.submit_code("DOS").unwrap();

            let receipt = service.finalize_on(&session, day(1)).await.unwrap();
            assert_eq!(receipt.bill_no, expected_no);
        }

        assert_eq!(db.bills().peek_bill_number(day(1)).await.unwrap(), 4);
        assert_eq!(db.bills().peek_bill_number(day(2)).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_finalize_request_from_the_wire() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        let request = FinalizeBillRequest {
            bill_details: BillDetails {
                table_no: "T5".to_string(),
                party_no: "P2".to_string(),
                waiter_no: "W3".to_string(),
                area: Area::Ac,
            },
            bill_items: vec![RequestItem {
                id: 1,
                quantity: 2,
                price: 3500,
            }],
            total: 7350, // 7000 + 5% tax
        };

        let receipt = service.finalize_request(request, day(1)).await.unwrap();
        assert_eq!(receipt.bill_no, 1);

        let header = db.bills().get_by_id(receipt.bill_id).await.unwrap().unwrap();
        assert_eq!(header.area, Area::Ac);
        assert_eq!(header.total_paise, 7350);
    }

    #[tokio::test]
    async fn test_invalid_request_rejected_without_io() {
        let db = seeded_db().await;
        let service = BillingService::new(db.clone());

        let request = FinalizeBillRequest {
            bill_details: BillDetails {
                table_no: "T5".to_string(),
                party_no: "P2".to_string(),
                waiter_no: "W3".to_string(),
                area: Area::General,
            },
            bill_items: vec![],
            total: 0,
        };

        let err = service.finalize_request(request, day(1)).await.unwrap_err();
        assert!(matches!(err, SessionError::Core(CoreError::EmptyOrder)));
        assert_eq!(db.bills().count().await.unwrap(), 0);
    }
}
