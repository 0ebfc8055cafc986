use serde::{Deserialize, Serialize};

/// Configuration for an [`InMemoryLedger`](crate::InMemoryLedger).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    /// Upper bound on chain length, genesis included. `None` is unbounded.
    pub max_entries: Option<usize>,
}

impl LedgerConfig {
    /// A ledger that refuses to grow past `max_entries`.
    pub fn bounded(max_entries: usize) -> Self {
        Self {
            max_entries: Some(max_entries),
        }
    }
}
