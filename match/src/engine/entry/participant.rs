//! Participant Identifiers and Pairings
//!
//! A participant is an opaque string identifier. A pairing is the unordered
//! pair of two participants that shared a group, stored with the smaller
//! identifier first so lookups do not depend on member order.

use serde::{Deserialize, Serialize};

/// Opaque identifier of a person eligible to be matched in a run
pub type ParticipantId = String;

/// Members of one group formed in an earlier run
pub type RecentGroup = Vec<ParticipantId>;

/// Unordered pair of participants in canonical (ascending) order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pairing {
    low: ParticipantId,
    high: ParticipantId,
}

impl Pairing {
    /// Builds the canonical pairing for two participants, in either order
    pub fn new(a: &str, b: &str) -> Self {
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        Self {
            low: low.to_string(),
            high: high.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pairing_is_order_independent() {
        assert_eq!(Pairing::new("alice", "bob"), Pairing::new("bob", "alice"));
        assert_ne!(Pairing::new("alice", "bob"), Pairing::new("alice", "carol"));
    }

    #[test]
    fn test_pairing_serializes_low_first() {
        let json = serde_json::to_value(Pairing::new("u2", "u1")).unwrap();
        assert_eq!(json["low"], "u1");
        assert_eq!(json["high"], "u2");
    }
}
