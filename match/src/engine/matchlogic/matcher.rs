use crate::engine::data::RecentPairSet;
use crate::engine::entry::{
    GroupBounds, MatchReport, MatchingInput, MatchingResult, ParticipantId, RecentGroup,
};
use crate::engine::matchlogic::chunk::{chunk_greedy, Chunked};
use crate::engine::matchlogic::seeded::shuffle_with_seed;

/// Conflict-checked shuffle passes before the unconditional fallback pass
pub const MATCH_ATTEMPTS: u32 = 6;

const FALLBACK_SUFFIX: &str = "fallback";

/// Result of one matching computation together with its attempt bookkeeping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPlan {
    pub result: MatchingResult,
    pub report: MatchReport,
}

/// Splits participants into groups while steering away from recent pairings
#[derive(Debug, Clone)]
pub struct Matcher {
    bounds: GroupBounds,
    recent_pairs: RecentPairSet,
}

impl Matcher {
    pub fn new(
        group_size_min: usize,
        group_size_max: usize,
        recent_matches: &[RecentGroup],
    ) -> Self {
        Self {
            bounds: GroupBounds::normalized(group_size_min, group_size_max),
            recent_pairs: RecentPairSet::from_groups(recent_matches),
        }
    }

    pub fn from_input(input: &MatchingInput) -> Self {
        Self::new(
            input.group_size_min,
            input.group_size_max,
            &input.recent_matches,
        )
    }

    pub fn bounds(&self) -> GroupBounds {
        self.bounds
    }

    pub fn recent_pairs(&self) -> &RecentPairSet {
        &self.recent_pairs
    }

    /// Shuffles and chunks up to [`MATCH_ATTEMPTS`] times, keeping the first
    /// grouping without a recent pairing. When every attempt conflicts, one
    /// more pass is returned as is.
    pub fn plan(&self, participant_ids: &[ParticipantId], seed: &str) -> MatchPlan {
        let base_seed = format!("{}:{}", seed, participant_ids.len());

        for attempt in 0..MATCH_ATTEMPTS {
            let chunked = self.chunk(participant_ids, &format!("{}:{}", base_seed, attempt));
            let conflicted = chunked
                .groups
                .iter()
                .any(|group| self.recent_pairs.conflicts_with(group));
            if !conflicted {
                log::debug!(
                    "seed {} matched {} groups on attempt {}",
                    seed,
                    chunked.groups.len(),
                    attempt + 1
                );
                return Self::finish(chunked, attempt + 1, false);
            }
        }

        log::debug!(
            "seed {} kept conflicts after {} attempts, using fallback pass",
            seed,
            MATCH_ATTEMPTS
        );
        let chunked = self.chunk(
            participant_ids,
            &format!("{}:{}", base_seed, FALLBACK_SUFFIX),
        );
        Self::finish(chunked, MATCH_ATTEMPTS + 1, true)
    }

    pub fn create_matches(&self, participant_ids: &[ParticipantId], seed: &str) -> MatchingResult {
        self.plan(participant_ids, seed).result
    }

    fn chunk(&self, participant_ids: &[ParticipantId], seed: &str) -> Chunked {
        chunk_greedy(shuffle_with_seed(participant_ids, seed), self.bounds)
    }

    fn finish(chunked: Chunked, attempts: u32, used_fallback: bool) -> MatchPlan {
        MatchPlan {
            result: MatchingResult::new(chunked.groups, chunked.remainder),
            report: MatchReport {
                attempts,
                used_fallback,
            },
        }
    }
}

/// Partitions `input.participant_ids` into groups; total over any input
pub fn create_matches(input: &MatchingInput) -> MatchingResult {
    plan_matches(input).result
}

pub fn plan_matches(input: &MatchingInput) -> MatchPlan {
    Matcher::from_input(input).plan(&input.participant_ids, &input.seed)
}
