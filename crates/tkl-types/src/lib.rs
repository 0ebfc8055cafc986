//! Foundation types for TicketLedger.
//!
//! This crate provides the value types shared by every other TicketLedger
//! crate: content digests, entry timestamps, and the payloads an entry can
//! carry.
//!
//! # Key Types
//!
//! - [`Digest`] — 256-bit BLAKE3 content hash, hex-rendered
//! - [`Timestamp`] — Monotonic wall-clock stamp for entries
//! - [`Payload`] — Genesis sentinel or an issued ticket
//! - [`TicketPayload`] — Event, buyer, ticket id, and issuance time
//! - [`TicketId`] — `T` plus six digits
//! - [`TicketField`] — Typed key for payload lookups

pub mod digest;
pub mod error;
pub mod payload;
pub mod temporal;
pub mod ticket;

pub use digest::Digest;
pub use error::TypeError;
pub use payload::Payload;
pub use temporal::Timestamp;
pub use ticket::{EventType, TicketField, TicketId, TicketPayload};
