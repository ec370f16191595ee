//! # khata-db: Database Layer for Khata
//!
//! This crate provides database access for the Khata billing engine.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Khata Data Flow                             │
//! │                                                                 │
//! │  khata-session (finalize, menu load)                            │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  khata-db (THIS CRATE)                    │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐   ┌──────────────┐   ┌────────────────┐   │  │
//! │  │  │  Database  │   │ Repositories │   │   Migrations   │   │  │
//! │  │  │ (pool.rs)  │◄──│  menu, bill  │   │   (embedded)   │   │  │
//! │  │  │ SqlitePool │   │  sequence    │   │  001_init.sql  │   │  │
//! │  │  └────────────┘   └──────────────┘   └────────────────┘   │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database file (WAL mode)                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (menu, bill, sequence)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use khata_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/khata.db")).await?;
//!
//! let menu = db.menu().list().await?;
//! let committed = db.bills().commit_bill(&draft, today).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::bill::{BillRepository, CommittedBill};
pub use repository::menu::MenuRepository;
