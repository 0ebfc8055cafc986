use serde::{Deserialize, Serialize};
use tkl_ledger::LedgerConfig;

/// Configuration for a [`BoxOffice`](crate::BoxOffice) session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OfficeConfig {
    /// Largest ticket count a single issue request may ask for. `None` is
    /// unlimited.
    pub max_tickets_per_request: Option<u32>,
    /// When `true`, a minted id that is already issued gets regenerated.
    /// Off by default: ids are drawn at random with no collision check.
    pub unique_ticket_ids: bool,
    /// Regeneration budget per ticket when `unique_ticket_ids` is on.
    pub max_id_attempts: u32,
    /// Settings for the session ledger.
    pub ledger: LedgerConfig,
}

impl Default for OfficeConfig {
    fn default() -> Self {
        Self {
            max_tickets_per_request: None,
            unique_ticket_ids: false,
            max_id_attempts: 32,
            ledger: LedgerConfig::default(),
        }
    }
}

impl OfficeConfig {
    /// Defaults, but refusing to issue an id twice.
    pub fn unique_ids() -> Self {
        Self {
            unique_ticket_ids: true,
            ..Default::default()
        }
    }

    /// Defaults, but capping each issue request at `limit` tickets.
    pub fn capped(limit: u32) -> Self {
        Self {
            max_tickets_per_request: Some(limit),
            ..Default::default()
        }
    }
}
