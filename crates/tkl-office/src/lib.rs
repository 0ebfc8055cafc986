//! Ticket issuing service for TicketLedger.
//!
//! A [`BoxOffice`] owns one session ledger and answers the three requests a
//! front end sends: issue tickets, verify a ticket id, and audit the chain.
//! It is the main entry point for applications embedding TicketLedger.

pub mod config;
pub mod error;
pub mod office;
pub mod request;

pub use config::OfficeConfig;
pub use error::{OfficeError, OfficeResult};
pub use office::BoxOffice;
pub use request::{AuditReport, IssueReceipt, IssueRequest, Verification, VerifyRequest};

// Re-export key types
pub use tkl_ledger::{AuditRow, LedgerConfig, LedgerEntry, TicketRow, ValidationReport};
pub use tkl_types::{EventType, TicketId, TicketPayload};
