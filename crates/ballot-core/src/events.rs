//! Ledger events and the append-only journal entry.

use ballot_types::Address;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Event emitted by a committed state transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[serde(tag = "event")]
pub enum LedgerEvent {
    /// A voter received the right to vote.
    NewVoter { voter: Address },
    /// A voter delegated. The trailing fields mirror the terminal's
    /// state after the update.
    Delegated {
        from: Address,
        to: Address,
        weight: u64,
        voted: bool,
        vote: u32,
        vote_count: u64,
    },
    /// A voter voted directly.
    Voted {
        voter: Address,
        proposal: u32,
        vote_count: u64,
    },
}

impl LedgerEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            LedgerEvent::NewVoter { .. } => EventKind::NewVoter,
            LedgerEvent::Delegated { .. } => EventKind::Delegated,
            LedgerEvent::Voted { .. } => EventKind::Voted,
        }
    }

    /// Canonical event signature.
    pub fn signature(&self) -> &'static str {
        self.kind().signature()
    }

    /// Topic identifying the event type.
    pub fn topic(&self) -> [u8; 32] {
        self.kind().topic()
    }

    /// Canonical borsh encoding.
    pub fn encode(&self) -> std::io::Result<Vec<u8>> {
        borsh::to_vec(self)
    }

    /// Account that submitted the transition.
    pub fn caller(&self) -> Address {
        match self {
            LedgerEvent::NewVoter { voter } => *voter,
            LedgerEvent::Delegated { from, .. } => *from,
            LedgerEvent::Voted { voter, .. } => *voter,
        }
    }
}

impl fmt::Display for LedgerEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerEvent::NewVoter { voter } => write!(f, "NewVoter({})", voter),
            LedgerEvent::Delegated {
                from,
                to,
                weight,
                voted,
                vote,
                vote_count,
            } => write!(
                f,
                "Delegated({}, {}, {}, {}, {}, {})",
                from, to, weight, voted, vote, vote_count
            ),
            LedgerEvent::Voted {
                voter,
                proposal,
                vote_count,
            } => write!(f, "Voted({}, {}, {})", voter, proposal, vote_count),
        }
    }
}

/// Event type, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NewVoter,
    Delegated,
    Voted,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::NewVoter, EventKind::Delegated, EventKind::Voted];

    pub fn signature(&self) -> &'static str {
        match self {
            EventKind::NewVoter => "NewVoter(address)",
            EventKind::Delegated => "Delegated(address,address,uint256,bool,uint256,uint256)",
            EventKind::Voted => "Voted(address,uint256,uint256)",
        }
    }

    pub fn topic(&self) -> [u8; 32] {
        *blake3::hash(self.signature().as_bytes()).as_bytes()
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "newvoter" => Ok(EventKind::NewVoter),
            "delegated" => Ok(EventKind::Delegated),
            "voted" => Ok(EventKind::Voted),
            other => Err(format!("unknown event kind: {}", other)),
        }
    }
}

/// Journal entry: one per committed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Position in the journal, starting at 1
    pub seq: u64,
    pub event: LedgerEvent,
}

impl LogEntry {
    /// `blake3(seq_le || borsh(event))`
    pub fn hash(&self) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.seq.to_le_bytes());
        // Writes into the hasher cannot fail.
        let _ = BorshSerialize::serialize(&self.event, &mut hasher);
        *hasher.finalize().as_bytes()
    }

    pub fn hash_hex(&self) -> String {
        format!("0x{}", blake3::Hash::from(self.hash()).to_hex())
    }
}
