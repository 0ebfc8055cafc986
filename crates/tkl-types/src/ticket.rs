use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Kind of event a ticket admits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    Sports,
    Art,
    Cultural,
    Literature,
    #[serde(rename = "MUN")]
    Mun,
}

impl EventType {
    pub const ALL: [EventType; 5] = [
        Self::Sports,
        Self::Art,
        Self::Cultural,
        Self::Literature,
        Self::Mun,
    ];

    /// Canonical name, as stored in ticket payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sports => "Sports",
            Self::Art => "Art",
            Self::Cultural => "Cultural",
            Self::Literature => "Literature",
            Self::Mun => "MUN",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventType {
    type Err = TypeError;

    /// Case-insensitive match on the canonical name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TypeError::UnknownEventType(s.to_string()))
    }
}

/// Ticket identifier: `T` followed by exactly six ASCII digits.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    pub const PREFIX: char = 'T';
    const DIGITS: usize = 6;

    /// Mint a random id in `T100000..=T999999`.
    ///
    /// No uniqueness check happens here; callers that need one must consult
    /// the ledger.
    pub fn generate<R: Rng>(rng: &mut R) -> Self {
        Self(format!("{}{}", Self::PREFIX, rng.gen_range(100_000..=999_999u32)))
    }

    /// Validate and wrap an identifier.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let s = s.trim();
        let valid = s
            .strip_prefix(Self::PREFIX)
            .is_some_and(|digits| {
                digits.len() == Self::DIGITS && digits.bytes().all(|b| b.is_ascii_digit())
            });
        if valid {
            Ok(Self(s.to_string()))
        } else {
            Err(TypeError::InvalidTicketId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TicketId({})", self.0)
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TicketId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for TicketId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

/// Named field of a ticket payload, usable as a lookup key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketField {
    Event,
    Buyer,
    TicketId,
    Time,
}

impl TicketField {
    pub fn key(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Buyer => "buyer",
            Self::TicketId => "ticket_id",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for TicketField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for TicketField {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "event" => Ok(Self::Event),
            "buyer" => Ok(Self::Buyer),
            "ticket_id" => Ok(Self::TicketId),
            "time" => Ok(Self::Time),
            other => Err(TypeError::UnknownField(other.to_string())),
        }
    }
}

/// Business data recorded for one issued ticket.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketPayload {
    pub event: EventType,
    pub buyer: String,
    pub ticket_id: TicketId,
    /// Issuance time of the request that produced this ticket.
    pub time: String,
}

impl TicketPayload {
    /// Value of a field, as it is encoded into the entry hash.
    pub fn field(&self, field: TicketField) -> &str {
        match field {
            TicketField::Event => self.event.as_str(),
            TicketField::Buyer => &self.buyer,
            TicketField::TicketId => self.ticket_id.as_str(),
            TicketField::Time => &self.time,
        }
    }
}
