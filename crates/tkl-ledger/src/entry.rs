use serde::{Deserialize, Serialize};
use tkl_crypto::{CanonicalEncoder, ChainLinked, ContentHasher};
use tkl_types::{Digest, Payload, Timestamp};

/// Rendering of the genesis entry's missing predecessor.
pub const GENESIS_PREVIOUS_HASH: &str = "0";

const GENESIS_TAG: u8 = 0x00;
const TICKET_TAG: u8 = 0x01;

/// One immutable position in the ledger chain.
///
/// The hash is computed once, at construction, from the other four fields.
/// There are no mutators: an entry read back from the ledger is a copy, and
/// changing it has no effect on the stored chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub(crate) index: u64,
    pub(crate) timestamp: Timestamp,
    pub(crate) payload: Payload,
    #[serde(with = "previous_hash")]
    pub(crate) previous_hash: Option<Digest>,
    pub(crate) hash: Digest,
}

impl LedgerEntry {
    /// Build an entry and compute its hash.
    pub fn new(
        index: u64,
        timestamp: Timestamp,
        payload: Payload,
        previous_hash: Option<Digest>,
    ) -> Self {
        let hash = ContentHasher::ENTRY.hash(&encode(
            index,
            &timestamp,
            &payload,
            previous_hash.as_ref(),
        ));
        Self {
            index,
            timestamp,
            payload,
            previous_hash,
            hash,
        }
    }

    /// The fixed chain anchor.
    pub fn genesis(timestamp: Timestamp) -> Self {
        Self::new(0, timestamp, Payload::Genesis, None)
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Predecessor's hash; `None` only for genesis.
    pub fn previous_hash(&self) -> Option<Digest> {
        self.previous_hash
    }

    /// Predecessor's hash as hex, or `"0"` for genesis.
    pub fn previous_hash_hex(&self) -> String {
        self.previous_hash
            .map(|d| d.to_hex())
            .unwrap_or_else(|| GENESIS_PREVIOUS_HASH.to_string())
    }

    pub fn hash(&self) -> Digest {
        self.hash
    }

    pub fn is_genesis(&self) -> bool {
        self.payload.is_genesis()
    }

    /// Canonical encoding of the hashed fields.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        encode(
            self.index,
            &self.timestamp,
            &self.payload,
            self.previous_hash.as_ref(),
        )
    }

    /// Recompute the hash from the stored fields.
    pub fn compute_hash(&self) -> Digest {
        ContentHasher::ENTRY.hash(&self.canonical_bytes())
    }

    /// Whether the stored hash matches the stored fields.
    pub fn is_sealed(&self) -> bool {
        self.compute_hash() == self.hash
    }
}

impl ChainLinked for LedgerEntry {
    fn position(&self) -> u64 {
        self.index
    }

    fn digest(&self) -> Digest {
        self.hash
    }

    fn previous_digest(&self) -> Option<Digest> {
        self.previous_hash
    }

    fn is_genesis(&self) -> bool {
        self.payload.is_genesis()
    }

    fn canonical_bytes(&self) -> Vec<u8> {
        LedgerEntry::canonical_bytes(self)
    }
}

/// Field order: index, timestamp, payload, previous hash.
fn encode(
    index: u64,
    timestamp: &Timestamp,
    payload: &Payload,
    previous_hash: Option<&Digest>,
) -> Vec<u8> {
    let enc = CanonicalEncoder::new()
        .u64(index)
        .u64(timestamp.unix_ms)
        .u32(timestamp.logical);

    let enc = match payload {
        Payload::Genesis => enc.tag(GENESIS_TAG).str(Payload::GENESIS_LABEL),
        Payload::Ticket(ticket) => enc
            .tag(TICKET_TAG)
            .str(ticket.event.as_str())
            .str(&ticket.buyer)
            .str(ticket.ticket_id.as_str())
            .str(&ticket.time),
    };

    match previous_hash {
        Some(digest) => enc.bytes(digest.as_bytes()),
        None => enc.str(GENESIS_PREVIOUS_HASH),
    }
    .finish()
}

mod previous_hash {
    use serde::{Deserialize, Deserializer, Serializer};
    use tkl_types::Digest;

    use super::GENESIS_PREVIOUS_HASH;

    pub fn serialize<S: Serializer>(value: &Option<Digest>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(digest) => s.serialize_str(&digest.to_hex()),
            None => s.serialize_str(GENESIS_PREVIOUS_HASH),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Digest>, D::Error> {
        let s = String::deserialize(d)?;
        if s == GENESIS_PREVIOUS_HASH {
            return Ok(None);
        }
        Digest::from_hex(&s)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
