//! Run Types and Structures
//!
//! A run is one scheduled occasion on which the confirmed participants of a
//! lottery are split into groups. These types carry the run state handed in by
//! the caller and the outcome handed back; nothing here is persisted.

use super::participant::{ParticipantId, RecentGroup};
use serde::{Deserialize, Serialize};

/// Answer a member gave for a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticipationStatus {
    #[default]
    Pending,
    Confirmed,
    Declined,
}

/// Lifecycle state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    #[default]
    Scheduled,
    Matching,
    Matched,
    Canceled,
}

/// Grouping rules configured on the lottery that owns a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LotteryRules {
    pub group_size_min: usize,
    pub group_size_max: usize,
    /// How many earlier runs count towards repeat avoidance
    pub repeat_window_runs: usize,
}

impl Default for LotteryRules {
    fn default() -> Self {
        Self {
            group_size_min: 2,
            group_size_max: 3,
            repeat_window_runs: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub user_id: ParticipantId,
    #[serde(default)]
    pub status: ParticipationStatus,
}

impl Participation {
    pub fn new(user_id: impl Into<ParticipantId>, status: ParticipationStatus) -> Self {
        Self {
            user_id: user_id.into(),
            status,
        }
    }
}

/// Groups formed by an earlier matched run of the same lottery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorRun {
    pub run_id: String,
    #[serde(default)]
    pub matches: Vec<RecentGroup>,
}

/// Everything needed to execute or cancel one run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSnapshot {
    pub run_id: String,
    #[serde(default)]
    pub status: RunStatus,
    #[serde(default)]
    pub rules: LotteryRules,
    #[serde(default)]
    pub participations: Vec<Participation>,
    /// Earlier matched runs, newest first
    #[serde(default)]
    pub history: Vec<PriorRun>,
}

/// Why a run ended up in the state reported by its outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunDisposition {
    Matched,
    SkippedInsufficientParticipants,
    AlreadyMatched,
}

/// One group to be stored for a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub member_ids: Vec<ParticipantId>,
    pub algorithm_version: String,
}

/// Attempt bookkeeping of one matching computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchReport {
    /// Shuffle passes performed, fallback included
    pub attempts: u32,
    pub used_fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOutcome {
    pub run_id: String,
    pub status: RunStatus,
    pub disposition: RunDisposition,
    pub matches: Vec<MatchRecord>,
    pub unmatched: Vec<ParticipantId>,
    pub algorithm_version: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub report: Option<MatchReport>,
}
