use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{SecondsFormat, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tkl_ledger::{
    InMemoryLedger, LedgerError, LedgerReader, LedgerWriter, ProjectionBuilder, StreamValidator,
    ValidationReport,
};
use tkl_types::{TicketField, TicketId, TicketPayload};
use tracing::{info, warn};

use crate::config::OfficeConfig;
use crate::error::{OfficeError, OfficeResult};
use crate::request::{AuditReport, IssueReceipt, IssueRequest, Verification, VerifyRequest};

/// Session-scoped ticket office.
///
/// Owns exactly one ledger for its lifetime. Create one per session and
/// drop it when the session ends; nothing here is global.
pub struct BoxOffice {
    config: OfficeConfig,
    ledger: InMemoryLedger,
    /// Also serializes issue requests, so one request's tickets sit
    /// contiguously in the chain.
    ids: Mutex<StdRng>,
}

impl BoxOffice {
    /// Open a session with an entropy-seeded id generator.
    pub fn new(config: OfficeConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Open a session whose ticket ids are reproducible.
    pub fn with_seed(config: OfficeConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: OfficeConfig, rng: StdRng) -> Self {
        let ledger = InMemoryLedger::new(config.ledger.clone());
        Self {
            config,
            ledger,
            ids: Mutex::new(rng),
        }
    }

    pub fn config(&self) -> &OfficeConfig {
        &self.config
    }

    /// The session ledger, for direct reads.
    pub fn ledger(&self) -> &InMemoryLedger {
        &self.ledger
    }

    // ---- Issue ----

    /// Mint and record `request.count` tickets sharing one issuance time.
    pub fn issue(&self, request: &IssueRequest) -> OfficeResult<IssueReceipt> {
        self.validate(request)?;

        let mut rng = self
            .ids
            .lock()
            .map_err(|_| OfficeError::Ledger(LedgerError::LockPoisoned))?;

        let time = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        let mut minted = HashSet::new();
        let mut tickets = Vec::with_capacity(request.count as usize);

        for _ in 0..request.count {
            let ticket_id = self.mint_id(&mut rng, &minted)?;
            minted.insert(ticket_id.clone());

            let payload = TicketPayload {
                event: request.event,
                buyer: request.buyer.clone(),
                ticket_id,
                time: time.clone(),
            };
            self.ledger.append(payload.clone())?;
            tickets.push(payload);
        }

        info!(
            buyer = %request.buyer,
            event = %request.event,
            count = request.count,
            "tickets issued"
        );
        Ok(IssueReceipt { tickets })
    }

    fn validate(&self, request: &IssueRequest) -> OfficeResult<()> {
        if request.buyer.trim().is_empty() {
            return Err(OfficeError::Validation("buyer name must not be blank".into()));
        }
        if request.count == 0 {
            return Err(OfficeError::Validation(
                "ticket count must be at least 1".into(),
            ));
        }
        if let Some(limit) = self.config.max_tickets_per_request {
            if request.count > limit {
                return Err(OfficeError::Validation(format!(
                    "ticket count {} exceeds the per-request limit of {limit}",
                    request.count
                )));
            }
        }
        Ok(())
    }

    fn mint_id(&self, rng: &mut StdRng, minted: &HashSet<TicketId>) -> OfficeResult<TicketId> {
        if !self.config.unique_ticket_ids {
            return Ok(TicketId::generate(rng));
        }

        for _ in 0..self.config.max_id_attempts {
            let candidate = TicketId::generate(rng);
            if !minted.contains(&candidate) && self.ledger.find_ticket(&candidate)?.is_none() {
                return Ok(candidate);
            }
            warn!(ticket_id = %candidate, "ticket id already issued; regenerating");
        }

        Err(OfficeError::IdSpaceExhausted {
            attempts: self.config.max_id_attempts,
        })
    }

    // ---- Verify ----

    pub fn verify(&self, request: &VerifyRequest) -> OfficeResult<Verification> {
        let ticket_id = request.ticket_id.trim();
        let found = self
            .ledger
            .find_by_field(TicketField::TicketId, ticket_id)?
            .and_then(|entry| entry.payload().as_ticket().cloned());

        Ok(match found {
            Some(ticket) => Verification::Valid { ticket },
            None => Verification::NotFound {
                ticket_id: ticket_id.to_string(),
            },
        })
    }

    // ---- Audit ----

    pub fn audit(&self) -> OfficeResult<AuditReport> {
        Ok(AuditReport {
            entries: ProjectionBuilder::audit(&self.ledger)?,
            tickets: ProjectionBuilder::ticket_summary(&self.ledger)?,
            integrity_ok: self.ledger.verify_integrity(),
        })
    }

    /// Full diagnostic validation of the session chain.
    pub fn check(&self) -> OfficeResult<ValidationReport> {
        Ok(StreamValidator::validate(&self.ledger)?)
    }
}

impl Default for BoxOffice {
    fn default() -> Self {
        Self::new(OfficeConfig::default())
    }
}
