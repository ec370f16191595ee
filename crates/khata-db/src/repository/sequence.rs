//! # Bill Sequencer
//!
//! The per-day sequential bill number, backed by a single counter row.
//!
//! ## Why a Counter Row Inside the Commit Transaction?
//! A client-held counter lets two sessions finalize with the same number.
//! Reading and advancing `bill_sequence` inside the same transaction as
//! the header insert makes the number transactionally consistent: SQLite
//! serializes write transactions, a failed commit rolls the counter back,
//! and numbers are never skipped or duplicated.
//!
//! ## Day Rollover
//! ```text
//! stored (bill_date, next_no)      commit on date D        assigned
//! ─────────────────────────────    ─────────────────       ────────
//! (D,     n)                  ──►  same day           ──►  n, store (D, n+1)
//! (D-1,   n)                  ──►  new day            ──►  1, store (D, 2)
//! ```

use chrono::NaiveDate;
use sqlx::{Sqlite, SqlitePool, Transaction};

use crate::error::DbResult;

/// Reads and advances the bill number inside an open commit transaction.
///
/// Returns the number assigned to this commit. The write is rolled back
/// with the rest of the transaction on failure, so a failed finalize
/// never consumes a number.
pub(crate) async fn next_bill_number(
    tx: &mut Transaction<'_, Sqlite>,
    bill_date: NaiveDate,
) -> DbResult<i64> {
    let date_str = bill_date.to_string();

    let (stored_date, next_no): (String, i64) =
        sqlx::query_as("SELECT bill_date, next_no FROM bill_sequence WHERE id = 1")
            .fetch_one(&mut **tx)
            .await?;

    // First bill of a new day starts at 1 regardless of the previous
    // day's terminal value.
    let assigned = if stored_date == date_str { next_no } else { 1 };

    sqlx::query("UPDATE bill_sequence SET bill_date = ?1, next_no = ?2 WHERE id = 1")
        .bind(&date_str)
        .bind(assigned + 1)
        .execute(&mut **tx)
        .await?;

    Ok(assigned)
}

/// Returns the number the next successful commit on `bill_date` will be
/// assigned, without advancing anything. For display at session start.
pub async fn peek_bill_number(pool: &SqlitePool, bill_date: NaiveDate) -> DbResult<i64> {
    let (stored_date, next_no): (String, i64) =
        sqlx::query_as("SELECT bill_date, next_no FROM bill_sequence WHERE id = 1")
            .fetch_one(pool)
            .await?;

    if stored_date == bill_date.to_string() {
        Ok(next_no)
    } else {
        Ok(1)
    }
}
