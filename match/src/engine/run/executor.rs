//! Run Execution Module
//!
//! Turns a run snapshot into a grouping decision: picks the confirmed
//! participants, gathers the recent pairing history, and hands both to the
//! matcher seeded with the run id.

use crate::engine::entry::{
    LotteryRules, MatchRecord, ParticipantId, ParticipationStatus, RecentGroup, RunDisposition,
    RunOutcome, RunSnapshot, RunStatus, ALGORITHM_VERSION,
};
use crate::engine::matchlogic::Matcher;
use crate::error::RunError;

/// History groups kept per run of the repeat window
pub const RECENT_MATCHES_PER_RUN: usize = 20;
/// History groups kept regardless of a short repeat window
pub const MIN_RECENT_MATCHES: usize = 40;

impl LotteryRules {
    /// Number of history groups consulted for repeat avoidance
    pub fn recent_match_limit(&self) -> usize {
        (self.repeat_window_runs * RECENT_MATCHES_PER_RUN).max(MIN_RECENT_MATCHES)
    }
}

impl RunSnapshot {
    /// Confirmed participants, in participation order
    pub fn confirmed_participants(&self) -> Vec<ParticipantId> {
        self.participations
            .iter()
            .filter(|p| p.status == ParticipationStatus::Confirmed)
            .map(|p| p.user_id.clone())
            .collect()
    }

    /// Newest history groups up to the rules' limit, skipping groups below two members
    pub fn recent_matches(&self) -> Vec<RecentGroup> {
        self.history
            .iter()
            .flat_map(|run| run.matches.iter())
            .take(self.rules.recent_match_limit())
            .filter(|members| members.len() >= 2)
            .cloned()
            .collect()
    }
}

/// Executes a run; already matched runs are returned unchanged
pub fn execute_run(snapshot: &RunSnapshot) -> Result<RunOutcome, RunError> {
    match snapshot.status {
        RunStatus::Canceled => return Err(RunError::Canceled),
        RunStatus::Matched => {
            log::info!("run {} already matched", snapshot.run_id);
            return Ok(outcome(snapshot, RunDisposition::AlreadyMatched));
        }
        RunStatus::Scheduled | RunStatus::Matching => {}
    }

    log::info!("run {} matching started", snapshot.run_id);
    let confirmed = snapshot.confirmed_participants();
    if confirmed.len() < snapshot.rules.group_size_min {
        log::info!(
            "run {} skipped, {} confirmed participants",
            snapshot.run_id,
            confirmed.len()
        );
        let mut skipped = outcome(snapshot, RunDisposition::SkippedInsufficientParticipants);
        skipped.unmatched = confirmed;
        return Ok(skipped);
    }

    let matcher = Matcher::new(
        snapshot.rules.group_size_min,
        snapshot.rules.group_size_max,
        &snapshot.recent_matches(),
    );
    let plan = matcher.plan(&confirmed, &snapshot.run_id);

    let mut matched = outcome(snapshot, RunDisposition::Matched);
    matched.matches = plan
        .result
        .matches
        .into_iter()
        .map(|member_ids| MatchRecord {
            member_ids,
            algorithm_version: plan.result.algorithm_version.clone(),
        })
        .collect();
    matched.unmatched = plan.result.unmatched;
    matched.report = Some(plan.report);
    log::info!(
        "run {} matched, {} groups, {} unmatched, {} attempts",
        snapshot.run_id,
        matched.matches.len(),
        matched.unmatched.len(),
        plan.report.attempts
    );
    Ok(matched)
}

/// New status of a canceled run
pub fn cancel_run(snapshot: &RunSnapshot) -> Result<RunStatus, RunError> {
    match snapshot.status {
        RunStatus::Canceled | RunStatus::Matched => Err(RunError::NotCancelable(snapshot.status)),
        RunStatus::Scheduled | RunStatus::Matching => {
            log::info!("run {} canceled", snapshot.run_id);
            Ok(RunStatus::Canceled)
        }
    }
}

fn outcome(snapshot: &RunSnapshot, disposition: RunDisposition) -> RunOutcome {
    RunOutcome {
        run_id: snapshot.run_id.clone(),
        status: RunStatus::Matched,
        disposition,
        matches: Vec::new(),
        unmatched: Vec::new(),
        algorithm_version: ALGORITHM_VERSION.to_string(),
        report: None,
    }
}
