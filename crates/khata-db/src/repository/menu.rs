//! # Menu Repository
//!
//! Database operations for the menu catalog.
//!
//! The engine treats the catalog as read-only; `list` feeds the session's
//! in-memory [`khata_core::MenuCatalog`] at load time. `insert` exists
//! for the admin boundary and returns the created record directly, so
//! callers update their view incrementally instead of re-fetching the
//! whole catalog after every write.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use khata_core::validation::validate_new_menu_item;
use khata_core::{MenuRecord, NewMenuItem};

/// Repository for menu catalog operations.
#[derive(Debug, Clone)]
pub struct MenuRepository {
    pool: SqlitePool,
}

impl MenuRepository {
    /// Creates a new MenuRepository.
    pub fn new(pool: SqlitePool) -> Self {
        MenuRepository { pool }
    }

    /// Lists all menu records, ascending by id.
    pub async fn list(&self) -> DbResult<Vec<MenuRecord>> {
        let records: Vec<MenuRecord> = sqlx::query_as(
            r#"
            SELECT id, alpha_code, numeric_code, description,
                   general_rate_paise, ac_rate_paise
            FROM menu_items
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = records.len(), "Loaded menu catalog");
        Ok(records)
    }

    /// Gets a menu record by its id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<MenuRecord>> {
        let record: Option<MenuRecord> = sqlx::query_as(
            r#"
            SELECT id, alpha_code, numeric_code, description,
                   general_rate_paise, ac_rate_paise
            FROM menu_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(record)
    }

    /// Inserts a menu item and returns the created record.
    ///
    /// Input is validated before any I/O. The alpha code is stored
    /// uppercased and both codes trimmed, so lookups stay cheap.
    /// `fixed_price_paise` defaults to the general rate.
    pub async fn insert(&self, item: &NewMenuItem) -> DbResult<MenuRecord> {
        validate_new_menu_item(item).map_err(|e| DbError::InvalidInput(e.to_string()))?;

        let alpha_code = item.alpha_code.trim().to_ascii_uppercase();
        let numeric_code = item.numeric_code.trim().to_string();
        let description = item.description.trim().to_string();

        debug!(alpha_code = %alpha_code, numeric_code = %numeric_code, "Inserting menu item");

        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (
                alpha_code, numeric_code, description,
                general_rate_paise, ac_rate_paise, fixed_price_paise
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&alpha_code)
        .bind(&numeric_code)
        .bind(&description)
        .bind(item.general_rate_paise)
        .bind(item.ac_rate_paise)
        .bind(item.general_rate_paise)
        .execute(&self.pool)
        .await?;

        Ok(MenuRecord {
            id: result.last_insert_rowid(),
            alpha_code,
            numeric_code,
            description,
            general_rate_paise: item.general_rate_paise,
            ac_rate_paise: item.ac_rate_paise,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    fn idli_input() -> NewMenuItem {
        NewMenuItem {
            alpha_code: "idl".to_string(),
            numeric_code: "101".to_string(),
            description: "Idli (2 pcs)".to_string(),
            general_rate_paise: 3000,
            ac_rate_paise: 3500,
        }
    }

    #[tokio::test]
    async fn test_insert_returns_created_record() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let record = db.menu().insert(&idli_input()).await.unwrap();
        assert!(record.id > 0);
        assert_eq!(record.alpha_code, "IDL"); // stored uppercased
        assert_eq!(record.general_rate_paise, 3000);

        // The returned record matches what a re-read would see.
        let fetched = db.menu().get_by_id(record.id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn test_list_is_ascending_by_id() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let menu = db.menu();

        menu.insert(&idli_input()).await.unwrap();
        menu.insert(&NewMenuItem {
            alpha_code: "DOS".to_string(),
            numeric_code: "102".to_string(),
            description: "Plain Dosa".to_string(),
            general_rate_paise: 4500,
            ac_rate_paise: 5000,
        })
        .await
        .unwrap();

        let records = menu.list().await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records[0].id < records[1].id);
        assert_eq!(records[0].alpha_code, "IDL");
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let menu = db.menu();

        menu.insert(&idli_input()).await.unwrap();
        let err = menu.insert(&idli_input()).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_invalid_input_fails_before_io() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut bad = idli_input();
        bad.description = "".to_string();
        let err = db.menu().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidInput(_)));

        assert!(db.menu().list().await.unwrap().is_empty());
    }
}
