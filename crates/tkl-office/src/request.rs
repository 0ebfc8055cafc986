use serde::{Deserialize, Serialize};
use tkl_ledger::{AuditRow, TicketRow};
use tkl_types::{EventType, TicketPayload};

/// Ask for `count` tickets to `event` on behalf of `buyer`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueRequest {
    pub event: EventType,
    pub buyer: String,
    pub count: u32,
}

impl IssueRequest {
    pub fn new(event: EventType, buyer: impl Into<String>, count: u32) -> Self {
        Self {
            event,
            buyer: buyer.into(),
            count,
        }
    }
}

/// Tickets created by one issue request, in issue order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct IssueReceipt {
    pub tickets: Vec<TicketPayload>,
}

impl IssueReceipt {
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Look up a ticket by its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub ticket_id: String,
}

impl VerifyRequest {
    pub fn new(ticket_id: impl Into<String>) -> Self {
        Self {
            ticket_id: ticket_id.into(),
        }
    }
}

/// Outcome of a verify request. Absence is an answer, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verification {
    Valid { ticket: TicketPayload },
    NotFound { ticket_id: String },
}

impl Verification {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    pub fn ticket(&self) -> Option<&TicketPayload> {
        match self {
            Self::Valid { ticket } => Some(ticket),
            Self::NotFound { .. } => None,
        }
    }
}

/// Everything an auditor sees: the raw chain, the ticket table, and whether
/// the chain currently verifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub entries: Vec<AuditRow>,
    pub tickets: Vec<TicketRow>,
    pub integrity_ok: bool,
}

#[cfg(test)]
mod tests {
    use tkl_types::TicketId;

    use super::*;

    #[test]
    fn issue_request_from_json() {
        let req: IssueRequest =
            serde_json::from_str(r#"{"event": "MUN", "buyer": "Dee", "count": 2}"#).unwrap();
        assert_eq!(req, IssueRequest::new(EventType::Mun, "Dee", 2));
    }

    #[test]
    fn verification_serializes_with_status() {
        let missing = Verification::NotFound {
            ticket_id: "T000000".into(),
        };
        let value = serde_json::to_value(&missing).unwrap();
        assert_eq!(value["status"], "not_found");
        assert!(!missing.is_valid());
        assert!(missing.ticket().is_none());

        let found = Verification::Valid {
            ticket: TicketPayload {
                event: EventType::Art,
                buyer: "Eli".into(),
                ticket_id: TicketId::parse("T314159").unwrap(),
                time: "t".into(),
            },
        };
        let value = serde_json::to_value(&found).unwrap();
        assert_eq!(value["status"], "valid");
        assert_eq!(value["ticket"]["buyer"], "Eli");
        assert!(found.is_valid());
    }
}
