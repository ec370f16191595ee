//! # khata-session: Billing Session Orchestration
//!
//! One billing session per counter terminal: load the menu, aggregate
//! item codes into an order, finalize atomically, start fresh.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                          │
//! │                                                                 │
//! │  OrderSession::load(db, ...)  ← menu catalog read once          │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  submit_code / set_quantity / set_area                          │
//! │       │            (totals recomputed after every mutation)     │
//! │       ▼                                                         │
//! │  BillingService::finalize(&session)                             │
//! │       ├── preconditions (fail fast, no I/O)                     │
//! │       ├── atomic commit (header + items + sequence, one tx)     │
//! │       └── on success: order cleared for the next customer       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`session`] - The mutex-guarded active order
//! - [`service`] - The finalize orchestration
//! - [`dto`] - Wire DTOs for the JSON boundary
//! - [`error`] - Session-boundary error type

pub mod dto;
pub mod error;
pub mod service;
pub mod session;

pub use dto::{BillDetails, BillReceipt, FinalizeBillRequest, RequestItem};
pub use error::SessionError;
pub use service::BillingService;
pub use session::OrderSession;
