//! Match Engine Module
//!
//! Decodes matching commands and dispatches them to the matcher or the run
//! layer. Every dispatch is counted and timed in the metrics registry.

pub use super::entry::{MatchingInput, MatchingResult, RunOutcome, RunSnapshot, RunStatus};

use super::matchlogic::plan_matches;
use super::run::{cancel_run, execute_run};
use crate::error::EngineError;
use crate::metrics;
use serde::{Deserialize, Serialize};

/// Represents the different types of commands that can be processed by the match engine
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchCmdType {
    /// Group a flat participant list
    #[default]
    CreateMatches,
    /// Match the confirmed participants of a run
    ExecuteRun,
    /// Cancel a run that has not been matched
    CancelRun,
}

impl MatchCmdType {
    pub fn name(&self) -> &'static str {
        match self {
            MatchCmdType::CreateMatches => "create_matches",
            MatchCmdType::ExecuteRun => "execute_run",
            MatchCmdType::CancelRun => "cancel_run",
        }
    }
}

/// Command structure for interacting with the match engine
/// Contains the command type and the payload it needs
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct MatchCmd {
    pub cmd: MatchCmdType,
    /// Payload of `create_matches`
    pub input: Option<MatchingInput>,
    /// Payload of `execute_run` and `cancel_run`
    pub run: Option<RunSnapshot>,
}

/// Reply to a dispatched command
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum MatchReply {
    Matching(MatchingResult),
    Run(RunOutcome),
    #[serde(rename_all = "camelCase")]
    Canceled { run_id: String, status: RunStatus },
}

/// The main match engine implementation
#[derive(Debug, Clone)]
pub struct MatchEngine {
    /// Largest participant list accepted in one command
    max_participants: usize,
}

impl MatchEngine {
    pub fn new(max_participants: usize) -> MatchEngine {
        MatchEngine { max_participants }
    }

    /// Decodes a full JSON command and dispatches it
    pub fn on_message(&self, data: &[u8]) -> Result<MatchReply, EngineError> {
        log::debug!("on_message: len {}", data.len());
        let cmd: MatchCmd = serde_json::from_slice(data)?;
        self.dispatch(cmd)
    }

    /// Decodes a bare payload for `cmd_type` and dispatches it
    pub fn on_request(
        &self,
        cmd_type: MatchCmdType,
        body: &[u8],
    ) -> Result<MatchReply, EngineError> {
        let cmd = match cmd_type {
            MatchCmdType::CreateMatches => MatchCmd {
                cmd: cmd_type,
                input: Some(serde_json::from_slice(body)?),
                run: None,
            },
            MatchCmdType::ExecuteRun | MatchCmdType::CancelRun => MatchCmd {
                cmd: cmd_type,
                input: None,
                run: Some(serde_json::from_slice(body)?),
            },
        };
        self.dispatch(cmd)
    }

    pub fn dispatch(&self, cmd: MatchCmd) -> Result<MatchReply, EngineError> {
        let method = cmd.cmd.name();
        metrics::record_metrics(method, || -> Result<MatchReply, EngineError> {
            match cmd.cmd {
                MatchCmdType::CreateMatches => {
                    let input = cmd
                        .input
                        .ok_or(EngineError::MissingPayload(method, "input"))?;
                    self.check_size(input.participant_ids.len())?;
                    let plan = plan_matches(&input);
                    metrics::record_match_report(&plan.report);
                    Ok(MatchReply::Matching(plan.result))
                }
                MatchCmdType::ExecuteRun => {
                    let run = cmd.run.ok_or(EngineError::MissingPayload(method, "run"))?;
                    self.check_size(run.participations.len())?;
                    let outcome = execute_run(&run)?;
                    if let Some(report) = &outcome.report {
                        metrics::record_match_report(report);
                    }
                    Ok(MatchReply::Run(outcome))
                }
                MatchCmdType::CancelRun => {
                    let run = cmd.run.ok_or(EngineError::MissingPayload(method, "run"))?;
                    let status = cancel_run(&run)?;
                    Ok(MatchReply::Canceled {
                        run_id: run.run_id,
                        status,
                    })
                }
            }
        })
    }

    fn check_size(&self, count: usize) -> Result<(), EngineError> {
        if count > self.max_participants {
            return Err(EngineError::TooManyParticipants {
                count,
                limit: self.max_participants,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RunError;

    #[test]
    fn test_on_message_create_matches() {
        let engine = MatchEngine::new(100);
        let reply = engine
            .on_message(
                br#"{"cmd":"create_matches","input":{"participantIds":["a","b","c","d"],"groupSizeMin":2,"groupSizeMax":2,"seed":"run-42"}}"#,
            )
            .unwrap();
        match reply {
            MatchReply::Matching(result) => {
                assert_eq!(result.matches, vec![vec!["a", "b"], vec!["c", "d"]]);
            }
            other => panic!("unexpected reply {:?}", other),
        }
    }

    #[test]
    fn test_on_message_rejects_garbage() {
        let engine = MatchEngine::new(100);
        assert!(matches!(
            engine.on_message(b"not json"),
            Err(EngineError::Decode(_))
        ));
    }

    #[test]
    fn test_missing_payload() {
        let engine = MatchEngine::new(100);
        let err = engine
            .on_message(br#"{"cmd":"execute_run","input":null,"run":null}"#)
            .unwrap_err();
        assert!(matches!(err, EngineError::MissingPayload("execute_run", "run")));
        assert!(err.is_bad_request());
    }

    #[test]
    fn test_participant_limit() {
        let engine = MatchEngine::new(3);
        let err = engine
            .on_request(
                MatchCmdType::CreateMatches,
                br#"{"participantIds":["a","b","c","d"],"groupSizeMin":2,"groupSizeMax":2,"seed":"s"}"#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::TooManyParticipants { count: 4, limit: 3 }
        ));
    }

    #[test]
    fn test_cancel_conflict_is_not_bad_request() {
        let engine = MatchEngine::new(100);
        let err = engine
            .on_request(
                MatchCmdType::CancelRun,
                br#"{"runId":"run-9","status":"matched"}"#,
            )
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Run(RunError::NotCancelable(RunStatus::Matched))
        ));
        assert!(!err.is_bad_request());
    }

    #[test]
    fn test_cancel_reply_shape() {
        let engine = MatchEngine::new(100);
        let reply = engine
            .on_request(MatchCmdType::CancelRun, br#"{"runId":"run-9"}"#)
            .unwrap();
        let json = serde_json::to_value(&reply).unwrap();
        assert_eq!(json["runId"], "run-9");
        assert_eq!(json["status"], "canceled");
    }
}
