//! Append-only ticket ledger for TicketLedger.
//!
//! This crate is the heart of TicketLedger. It provides:
//! - [`LedgerEntry`], an immutable chain position with its content hash
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - [`InMemoryLedger`], a session-scoped chain anchored at a genesis entry
//! - First-violation integrity checks and a full diagnostic validator
//! - Audit projections (full chain listing, issued-ticket summary)

pub mod config;
pub mod entry;
pub mod error;
pub mod memory;
pub mod projection;
pub mod traits;
pub mod validation;

pub use config::LedgerConfig;
pub use entry::{LedgerEntry, GENESIS_PREVIOUS_HASH};
pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use projection::{AuditRow, ProjectionBuilder, TicketRow};
pub use tkl_crypto::ChainError;
pub use traits::{LedgerReader, LedgerWriter};
pub use validation::{StreamValidator, ValidationReport, Violation, ViolationKind};
