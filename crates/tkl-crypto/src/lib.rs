//! Hashing primitives for TicketLedger.
//!
//! Provides a versioned canonical byte encoding, domain-separated BLAKE3
//! hashing over it, and hash chain verification.
//!
//! Hashing is BLAKE3 throughout; nothing here implements its own primitive.

pub mod chain;
pub mod encoding;
pub mod hasher;

pub use chain::{ChainError, ChainLinked, HashChainVerifier};
pub use encoding::CanonicalEncoder;
pub use hasher::ContentHasher;
