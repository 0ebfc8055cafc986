use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use tkl_crypto::HashChainVerifier;
use tkl_types::{Digest, Payload, TicketField, TicketId, TicketPayload, Timestamp};
use tracing::{debug, warn};

use crate::config::LedgerConfig;
use crate::entry::LedgerEntry;
use crate::error::LedgerError;
use crate::traits::{LedgerReader, LedgerWriter};

/// In-memory, single-session ticket ledger.
///
/// Created with its genesis entry and only ever grows. Appends hold the
/// write lock across "read last hash, push", so concurrent writers cannot
/// fork the chain; readers take the read lock and receive copies.
pub struct InMemoryLedger {
    config: LedgerConfig,
    inner: RwLock<LedgerState>,
}

struct LedgerState {
    entries: Vec<LedgerEntry>,
    hash_index: HashMap<Digest, usize>,
    /// First entry issued under each ticket id.
    ticket_index: HashMap<TicketId, usize>,
}

impl LedgerState {
    fn with_genesis(genesis: LedgerEntry) -> Self {
        let mut hash_index = HashMap::new();
        hash_index.insert(genesis.hash(), 0);
        Self {
            entries: vec![genesis],
            hash_index,
            ticket_index: HashMap::new(),
        }
    }

    fn last(&self) -> &LedgerEntry {
        // The genesis entry is never removed.
        &self.entries[self.entries.len() - 1]
    }
}

impl InMemoryLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self::with_genesis_time(config, Timestamp::now())
    }

    /// Create a ledger whose genesis entry carries `timestamp`.
    pub fn with_genesis_time(config: LedgerConfig, timestamp: Timestamp) -> Self {
        let genesis = LedgerEntry::genesis(timestamp);
        debug!(hash = %genesis.hash().short_hex(), "ledger created");
        Self {
            config,
            inner: RwLock::new(LedgerState::with_genesis(genesis)),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Walk the chain once; `false` on the first violated invariant.
    pub fn verify_integrity(&self) -> bool {
        match self.check_integrity() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "ledger integrity check failed");
                false
            }
        }
    }

    /// Like [`verify_integrity`](Self::verify_integrity), but names the first
    /// offending index and the invariant it broke.
    pub fn check_integrity(&self) -> Result<(), LedgerError> {
        let state = self.read_state()?;
        HashChainVerifier::verify_chain(&state.entries)?;
        Ok(())
    }

    fn read_state(&self) -> Result<RwLockReadGuard<'_, LedgerState>, LedgerError> {
        self.inner.read().map_err(|_| LedgerError::LockPoisoned)
    }

    fn write_state(&self) -> Result<RwLockWriteGuard<'_, LedgerState>, LedgerError> {
        self.inner.write().map_err(|_| LedgerError::LockPoisoned)
    }
}

impl Default for InMemoryLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&self, payload: TicketPayload) -> Result<LedgerEntry, LedgerError> {
        let mut state = self.write_state()?;

        if let Some(limit) = self.config.max_entries {
            if state.entries.len() >= limit {
                return Err(LedgerError::CapacityExceeded { limit });
            }
        }

        let last = state.last();
        let index = state.entries.len() as u64;
        let timestamp = Timestamp::after(&last.timestamp(), Timestamp::now());
        let ticket_id = payload.ticket_id.clone();
        let entry = LedgerEntry::new(index, timestamp, Payload::Ticket(payload), Some(last.hash()));

        let position = state.entries.len();
        state.hash_index.insert(entry.hash(), position);
        state.ticket_index.entry(ticket_id).or_insert(position);
        state.entries.push(entry.clone());

        debug!(index, hash = %entry.hash().short_hex(), "entry appended");
        Ok(entry)
    }
}

impl LedgerReader for InMemoryLedger {
    fn snapshot(&self) -> Result<Vec<LedgerEntry>, LedgerError> {
        Ok(self.read_state()?.entries.clone())
    }

    fn entry_count(&self) -> Result<u64, LedgerError> {
        Ok(self.read_state()?.entries.len() as u64)
    }

    fn head(&self) -> Result<LedgerEntry, LedgerError> {
        Ok(self.read_state()?.last().clone())
    }

    fn get(&self, index: u64) -> Result<Option<LedgerEntry>, LedgerError> {
        let state = self.read_state()?;
        Ok(usize::try_from(index)
            .ok()
            .and_then(|i| state.entries.get(i))
            .cloned())
    }

    fn get_by_hash(&self, hash: Digest) -> Result<Option<LedgerEntry>, LedgerError> {
        let state = self.read_state()?;
        Ok(state
            .hash_index
            .get(&hash)
            .and_then(|&i| state.entries.get(i))
            .cloned())
    }

    fn find_by_field(
        &self,
        field: TicketField,
        value: &str,
    ) -> Result<Option<LedgerEntry>, LedgerError> {
        let state = self.read_state()?;
        Ok(state
            .entries
            .iter()
            .skip(1)
            .find(|entry| entry.payload().field(field) == Some(value))
            .cloned())
    }

    fn find_ticket(&self, id: &TicketId) -> Result<Option<TicketPayload>, LedgerError> {
        let state = self.read_state()?;
        Ok(state
            .ticket_index
            .get(id)
            .and_then(|&i| state.entries.get(i))
            .and_then(|entry| entry.payload().as_ticket())
            .cloned())
    }
}
