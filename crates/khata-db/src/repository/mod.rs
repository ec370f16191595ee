//! # Repository Module
//!
//! Database repository implementations for Khata.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Session layer                                                  │
//! │       │                                                         │
//! │       │  db.bills().commit_bill(&draft, today)                  │
//! │       ▼                                                         │
//! │  BillRepository                                                 │
//! │  ├── commit_bill(&self, draft, date)   ← one atomic transaction │
//! │  ├── peek_bill_number(&self, date)                              │
//! │  └── get_by_id / get_items                                      │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite Database                                                │
//! │                                                                 │
//! │  Benefits: SQL isolated in one place, easy to test against an   │
//! │  in-memory database, clean separation of concerns.              │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`menu::MenuRepository`] - Menu catalog list/insert
//! - [`bill::BillRepository`] - Atomic bill commit and lookups
//! - [`sequence`] - The per-day bill number counter

pub mod bill;
pub mod menu;
pub mod sequence;
