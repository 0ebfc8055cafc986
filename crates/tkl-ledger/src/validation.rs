use serde::Serialize;

use crate::entry::LedgerEntry;
use crate::error::LedgerError;
use crate::traits::LedgerReader;

/// Result of a full diagnostic walk over a chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub entry_count: u64,
    pub genesis_valid: bool,
    pub indices_contiguous: bool,
    pub links_valid: bool,
    pub hashes_valid: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    /// The lowest-index violation, if any.
    pub fn first_violation(&self) -> Option<&Violation> {
        self.violations.first()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub index: u64,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    MissingGenesis,
    GenesisMismatch,
    IndexGap,
    BrokenLink,
    HashMismatch,
}

/// Chain validator that reports every violation instead of stopping at the
/// first one.
pub struct StreamValidator;

impl StreamValidator {
    /// Validate the chain currently held by `reader`.
    pub fn validate<R: LedgerReader>(reader: &R) -> Result<ValidationReport, LedgerError> {
        Ok(Self::validate_entries(&reader.snapshot()?))
    }

    /// Validate an exported chain, e.g. one read back from outside the process.
    pub fn validate_entries(entries: &[LedgerEntry]) -> ValidationReport {
        let mut violations = Vec::new();
        let mut genesis_valid = true;
        let mut indices_contiguous = true;
        let mut links_valid = true;
        let mut hashes_valid = true;

        if entries.is_empty() {
            genesis_valid = false;
            violations.push(Violation {
                index: 0,
                kind: ViolationKind::MissingGenesis,
                description: "chain has no genesis entry".into(),
            });
        }

        for (position, entry) in entries.iter().enumerate() {
            let expected_index = position as u64;
            if entry.index() != expected_index {
                indices_contiguous = false;
                violations.push(Violation {
                    index: expected_index,
                    kind: ViolationKind::IndexGap,
                    description: format!(
                        "expected index {expected_index}, found {}",
                        entry.index()
                    ),
                });
            }

            if position == 0 {
                if entry.previous_hash().is_some() || !entry.is_genesis() {
                    genesis_valid = false;
                    violations.push(Violation {
                        index: 0,
                        kind: ViolationKind::GenesisMismatch,
                        description: "first entry must be the genesis sentinel with previous hash \"0\""
                            .into(),
                    });
                }
            } else if entry.previous_hash() != Some(entries[position - 1].hash()) {
                links_valid = false;
                violations.push(Violation {
                    index: expected_index,
                    kind: ViolationKind::BrokenLink,
                    description: "previous hash does not match predecessor".into(),
                });
            }

            if !entry.is_sealed() {
                hashes_valid = false;
                violations.push(Violation {
                    index: expected_index,
                    kind: ViolationKind::HashMismatch,
                    description: "stored hash does not match recomputed hash".into(),
                });
            }
        }

        ValidationReport {
            entry_count: entries.len() as u64,
            genesis_valid,
            indices_contiguous,
            links_valid,
            hashes_valid,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use tkl_types::{EventType, Payload, TicketId, TicketPayload, Timestamp};

    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    fn ticket(buyer: &str) -> TicketPayload {
        TicketPayload {
            event: EventType::Cultural,
            buyer: buyer.into(),
            ticket_id: TicketId::parse("T555555").unwrap(),
            time: "t0".into(),
        }
    }

    fn chain(count: usize) -> Vec<LedgerEntry> {
        let ledger = InMemoryLedger::default();
        for _ in 0..count {
            ledger.append(ticket("Cy")).unwrap();
        }
        ledger.snapshot().unwrap()
    }

    #[test]
    fn valid_ledger_passes() {
        let ledger = InMemoryLedger::default();
        ledger.append(ticket("Cy")).unwrap();
        let report = StreamValidator::validate(&ledger).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.entry_count, 2);
    }

    #[test]
    fn empty_chain_reports_missing_genesis() {
        let report = StreamValidator::validate_entries(&[]);
        assert!(!report.genesis_valid);
        assert_eq!(report.violations[0].kind, ViolationKind::MissingGenesis);
    }

    #[test]
    fn collects_every_violation() {
        let mut entries = chain(4);
        if let Payload::Ticket(t) = &mut entries[1].payload {
            t.buyer = "Mallory".into();
        }
        entries[3].previous_hash = None;

        let report = StreamValidator::validate_entries(&entries);
        assert!(!report.is_valid());
        assert!(!report.hashes_valid);
        assert!(!report.links_valid);

        let kinds: Vec<_> = report.violations.iter().map(|v| (v.index, v.kind)).collect();
        assert_eq!(
            kinds,
            vec![
                (1, ViolationKind::HashMismatch),
                (3, ViolationKind::BrokenLink),
                (3, ViolationKind::HashMismatch),
            ]
        );
        assert_eq!(report.first_violation().unwrap().index, 1);
    }

    #[test]
    fn reordered_entries_show_index_gaps() {
        let mut entries = chain(3);
        entries.swap(1, 2);
        let report = StreamValidator::validate_entries(&entries);
        assert!(!report.indices_contiguous);
        assert!(!report.links_valid);
        assert!(report.hashes_valid);
    }

    #[test]
    fn forged_genesis_is_reported() {
        let mut entries = chain(1);
        entries[0] = LedgerEntry::new(0, Timestamp::zero(), Payload::Ticket(ticket("Eve")), None);
        let report = StreamValidator::validate_entries(&entries);
        assert!(!report.genesis_valid);
        assert_eq!(report.violations[0].kind, ViolationKind::GenesisMismatch);
    }

    #[test]
    fn report_serializes_for_json_output() {
        let report = StreamValidator::validate_entries(&chain(1));
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["entry_count"], 2);
        assert_eq!(value["violations"], serde_json::json!([]));
    }
}
