use serde::{Deserialize, Serialize};

use crate::ticket::{TicketField, TicketPayload};

/// Data carried by a ledger entry.
///
/// The genesis entry carries a fixed sentinel with no ticket fields, so it can
/// never match a field lookup or be mistaken for an issued ticket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Payload {
    Genesis,
    Ticket(TicketPayload),
}

impl Payload {
    /// Label written into the canonical encoding of the genesis payload.
    pub const GENESIS_LABEL: &'static str = "genesis";

    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }

    pub fn as_ticket(&self) -> Option<&TicketPayload> {
        match self {
            Self::Ticket(t) => Some(t),
            Self::Genesis => None,
        }
    }

    /// Field value, or `None` when this payload has no such field.
    pub fn field(&self, field: TicketField) -> Option<&str> {
        self.as_ticket().map(|t| t.field(field))
    }

    /// One-line human summary for audit listings.
    pub fn summary(&self) -> String {
        match self {
            Self::Genesis => "Genesis Block".to_string(),
            Self::Ticket(t) => format!(
                "{} | {} | {} | {}",
                t.event, t.buyer, t.ticket_id, t.time
            ),
        }
    }
}

impl From<TicketPayload> for Payload {
    fn from(ticket: TicketPayload) -> Self {
        Self::Ticket(ticket)
    }
}
