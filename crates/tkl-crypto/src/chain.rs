use tkl_types::Digest;

use crate::hasher::ContentHasher;

/// Trait for records that occupy a position in a hash chain.
pub trait ChainLinked {
    /// Zero-based position in the chain.
    fn position(&self) -> u64;
    /// The record's stored digest.
    fn digest(&self) -> Digest;
    /// The previous record's digest (`None` for genesis).
    fn previous_digest(&self) -> Option<Digest>;
    /// Whether the record carries the genesis sentinel payload.
    fn is_genesis(&self) -> bool;
    /// Canonical bytes the digest is computed over.
    fn canonical_bytes(&self) -> Vec<u8>;
}

/// Hash chain integrity verifier.
///
/// Verifies that a sequence of records forms a valid chain anchored at a
/// genesis record: positions are contiguous from zero, each record's
/// previous digest matches its predecessor's digest, and each stored digest
/// matches the one recomputed from the record's fields.
pub struct HashChainVerifier;

impl HashChainVerifier {
    /// Verify a chain, stopping at the first violation.
    pub fn verify_chain<T: ChainLinked>(records: &[T]) -> Result<(), ChainError> {
        if records.is_empty() {
            return Err(ChainError::MissingGenesis);
        }

        for (index, record) in records.iter().enumerate() {
            Self::verify_link(records, index, record)?;
        }

        Ok(())
    }

    /// Check a single record against its predecessor in `records`.
    pub fn verify_link<T: ChainLinked>(
        records: &[T],
        index: usize,
        record: &T,
    ) -> Result<(), ChainError> {
        if record.position() != index as u64 {
            return Err(ChainError::IndexGap {
                index,
                found: record.position(),
            });
        }

        if index == 0 {
            if record.previous_digest().is_some() || !record.is_genesis() {
                return Err(ChainError::GenesisMismatch);
            }
        } else {
            let expected_prev = records[index - 1].digest();
            match record.previous_digest() {
                Some(prev) if prev == expected_prev => {}
                Some(_) => return Err(ChainError::BrokenLink { index }),
                None => return Err(ChainError::MissingPrevHash { index }),
            }
        }

        if !ContentHasher::ENTRY.verify(&record.canonical_bytes(), &record.digest()) {
            return Err(ChainError::HashMismatch { index });
        }

        Ok(())
    }
}

/// Errors from chain verification.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum ChainError {
    #[error("chain is empty; a genesis entry is required")]
    MissingGenesis,

    #[error("genesis entry must carry the genesis payload and a \"0\" previous hash")]
    GenesisMismatch,

    #[error("index gap at position {index}: entry claims index {found}")]
    IndexGap { index: usize, found: u64 },

    #[error("broken link at index {index}: previous hash does not match")]
    BrokenLink { index: usize },

    #[error("missing previous hash at index {index}")]
    MissingPrevHash { index: usize },

    #[error("hash mismatch at index {index}: computed hash differs from stored")]
    HashMismatch { index: usize },
}

impl ChainError {
    /// Position of the offending record, if the error names one.
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::MissingGenesis => None,
            Self::GenesisMismatch => Some(0),
            Self::IndexGap { index, .. }
            | Self::BrokenLink { index }
            | Self::MissingPrevHash { index }
            | Self::HashMismatch { index } => Some(*index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::CanonicalEncoder;

    struct TestRecord {
        position: u64,
        digest: Digest,
        prev: Option<Digest>,
        genesis: bool,
        payload: Vec<u8>,
    }

    impl TestRecord {
        fn encode(&self) -> Vec<u8> {
            let prev = self.prev.map(|d| d.as_bytes().to_vec()).unwrap_or(b"0".to_vec());
            CanonicalEncoder::new()
                .u64(self.position)
                .tag(u8::from(!self.genesis))
                .bytes(&self.payload)
                .bytes(&prev)
                .finish()
        }
    }

    impl ChainLinked for TestRecord {
        fn position(&self) -> u64 {
            self.position
        }
        fn digest(&self) -> Digest {
            self.digest
        }
        fn previous_digest(&self) -> Option<Digest> {
            self.prev
        }
        fn is_genesis(&self) -> bool {
            self.genesis
        }
        fn canonical_bytes(&self) -> Vec<u8> {
            self.encode()
        }
    }

    fn build_chain(count: usize) -> Vec<TestRecord> {
        let mut chain: Vec<TestRecord> = Vec::new();
        for i in 0..count {
            let mut record = TestRecord {
                position: i as u64,
                digest: Digest::from_hash([0; 32]),
                prev: chain.last().map(|r| r.digest),
                genesis: i == 0,
                payload: format!("record-{i}").into_bytes(),
            };
            record.digest = ContentHasher::ENTRY.hash(&record.encode());
            chain.push(record);
        }
        chain
    }

    #[test]
    fn empty_chain_has_no_genesis() {
        let chain: Vec<TestRecord> = vec![];
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::MissingGenesis
        );
    }

    #[test]
    fn genesis_only_chain() {
        assert!(HashChainVerifier::verify_chain(&build_chain(1)).is_ok());
    }

    #[test]
    fn multi_record_chain() {
        assert!(HashChainVerifier::verify_chain(&build_chain(10)).is_ok());
    }

    #[test]
    fn genesis_with_prev_hash_fails() {
        let mut chain = build_chain(1);
        chain[0].prev = Some(Digest::from_hash([1; 32]));
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::GenesisMismatch
        );
    }

    #[test]
    fn non_genesis_payload_at_head_fails() {
        let mut chain = build_chain(2);
        chain[0].genesis = false;
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::GenesisMismatch
        );
    }

    #[test]
    fn index_gap_detected() {
        let mut chain = build_chain(3);
        chain[2].position = 5;
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::IndexGap { index: 2, found: 5 }
        );
    }

    #[test]
    fn broken_link_detected() {
        let mut chain = build_chain(3);
        chain[2].prev = Some(Digest::from_hash([99; 32]));
        let err = HashChainVerifier::verify_chain(&chain).unwrap_err();
        assert_eq!(err, ChainError::BrokenLink { index: 2 });
        assert_eq!(err.index(), Some(2));
    }

    #[test]
    fn missing_prev_hash_detected() {
        let mut chain = build_chain(3);
        chain[1].prev = None;
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::MissingPrevHash { index: 1 }
        );
    }

    #[test]
    fn tampered_payload_detected() {
        let mut chain = build_chain(3);
        chain[1].payload = b"tampered".to_vec();
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::HashMismatch { index: 1 }
        );
    }

    #[test]
    fn rehashing_one_record_breaks_the_next_link() {
        let mut chain = build_chain(4);
        chain[1].payload = b"tampered".to_vec();
        chain[1].digest = ContentHasher::ENTRY.hash(&chain[1].encode());
        assert_eq!(
            HashChainVerifier::verify_chain(&chain).unwrap_err(),
            ChainError::BrokenLink { index: 2 }
        );
    }
}
