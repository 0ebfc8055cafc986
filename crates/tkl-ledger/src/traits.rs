use tkl_types::{Digest, TicketField, TicketId, TicketPayload};

use crate::entry::LedgerEntry;
use crate::error::LedgerError;

/// Write boundary for ledger appends.
///
/// Only ticket payloads can be appended; the genesis sentinel is written
/// exactly once, when the ledger is created.
pub trait LedgerWriter: Send + Sync {
    fn append(&self, payload: TicketPayload) -> Result<LedgerEntry, LedgerError>;
}

/// Read boundary for ledger queries and audits.
///
/// Every method returns owned copies; nothing hands out a handle into the
/// stored chain.
pub trait LedgerReader: Send + Sync {
    /// The full chain, genesis included, in index order.
    fn snapshot(&self) -> Result<Vec<LedgerEntry>, LedgerError>;

    /// Number of entries, genesis included.
    fn entry_count(&self) -> Result<u64, LedgerError>;

    /// The most recently appended entry (genesis on a fresh ledger).
    fn head(&self) -> Result<LedgerEntry, LedgerError>;

    fn get(&self, index: u64) -> Result<Option<LedgerEntry>, LedgerError>;

    fn get_by_hash(&self, hash: Digest) -> Result<Option<LedgerEntry>, LedgerError>;

    /// First non-genesis entry whose payload has `field == value`.
    fn find_by_field(
        &self,
        field: TicketField,
        value: &str,
    ) -> Result<Option<LedgerEntry>, LedgerError>;

    /// Payload of the first ticket issued under `id`.
    fn find_ticket(&self, id: &TicketId) -> Result<Option<TicketPayload>, LedgerError> {
        Ok(self
            .find_by_field(TicketField::TicketId, id.as_str())?
            .and_then(|entry| entry.payload().as_ticket().cloned()))
    }

    /// All ticket payloads in issue order.
    fn tickets(&self) -> Result<Vec<TicketPayload>, LedgerError> {
        Ok(self
            .snapshot()?
            .into_iter()
            .filter_map(|entry| entry.payload().as_ticket().cloned())
            .collect())
    }
}
