use tkl_crypto::ChainError;

/// Errors produced by ledger operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("integrity violation: {0}")]
    Integrity(#[from] ChainError),

    #[error("ledger capacity of {limit} entries exceeded")]
    CapacityExceeded { limit: usize },

    #[error("ledger lock poisoned")]
    LockPoisoned,
}
