//! Matching Request and Result Types
//!
//! Wire shapes of one matching computation. Field names are camelCase on the
//! wire so payloads from the portal decode unchanged.

use super::participant::{ParticipantId, RecentGroup};
use serde::{Deserialize, Serialize};

/// Tag identifying the grouping behaviour that produced a result
pub const ALGORITHM_VERSION: &str = "v1.seeded-greedy";

/// Smallest group the matcher will ever form
pub const MIN_GROUP_SIZE: usize = 2;

/// Input of a single matching computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingInput {
    /// Participants eligible for this run, assumed unique
    pub participant_ids: Vec<ParticipantId>,
    pub group_size_min: usize,
    pub group_size_max: usize,
    /// Groups from earlier runs whose pairings should not repeat
    #[serde(default)]
    pub recent_matches: Vec<RecentGroup>,
    pub seed: String,
}

/// Output of a single matching computation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingResult {
    pub matches: Vec<Vec<ParticipantId>>,
    pub unmatched: Vec<ParticipantId>,
    pub algorithm_version: String,
}

impl MatchingResult {
    pub fn new(matches: Vec<Vec<ParticipantId>>, unmatched: Vec<ParticipantId>) -> Self {
        Self {
            matches,
            unmatched,
            algorithm_version: ALGORITHM_VERSION.to_string(),
        }
    }
}

/// Group size bounds after normalization
///
/// Callers may swap min and max or pass a minimum below two; the bounds are
/// repaired instead of rejected so matching stays total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupBounds {
    min: usize,
    max: usize,
}

impl GroupBounds {
    pub fn normalized(group_size_min: usize, group_size_max: usize) -> Self {
        let min = MIN_GROUP_SIZE.max(group_size_min.min(group_size_max));
        let max = min.max(group_size_max);
        Self { min, max }
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn contains(&self, size: usize) -> bool {
        size >= self.min && size <= self.max
    }
}
