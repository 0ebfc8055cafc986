use serde::Serialize;
use tkl_types::EventType;

use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Row in the full-chain audit listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditRow {
    pub index: u64,
    pub timestamp: String,
    pub payload: String,
    pub previous_hash: String,
    pub hash: String,
}

/// Row in the issued-tickets summary. Genesis never appears here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketRow {
    pub event: EventType,
    pub buyer: String,
    pub ticket_id: String,
    pub time: String,
}

/// Read-only views over a ledger for audit display.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    /// One row per entry, genesis included, in index order.
    pub fn audit<R: LedgerReader>(reader: &R) -> Result<Vec<AuditRow>, LedgerError> {
        Ok(reader
            .snapshot()?
            .iter()
            .map(|entry| AuditRow {
                index: entry.index(),
                timestamp: entry.timestamp().to_audit_string(),
                payload: entry.payload().summary(),
                previous_hash: entry.previous_hash_hex(),
                hash: entry.hash().to_hex(),
            })
            .collect())
    }

    /// One row per issued ticket, in issue order.
    pub fn ticket_summary<R: LedgerReader>(reader: &R) -> Result<Vec<TicketRow>, LedgerError> {
        Ok(reader
            .tickets()?
            .into_iter()
            .map(|t| TicketRow {
                event: t.event,
                buyer: t.buyer,
                ticket_id: t.ticket_id.into(),
                time: t.time,
            })
            .collect())
    }
}
