use thiserror::Error;

#[derive(Debug, Error)]
pub enum OfficeError {
    #[error("invalid request: {0}")]
    Validation(String),

    #[error("no unused ticket id found after {attempts} attempts")]
    IdSpaceExhausted { attempts: u32 },

    #[error("ledger error: {0}")]
    Ledger(#[from] tkl_ledger::LedgerError),
}

pub type OfficeResult<T> = Result<T, OfficeError>;
