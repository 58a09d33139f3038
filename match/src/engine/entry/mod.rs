pub mod matching;
pub mod participant;
pub mod run;

pub use matching::{GroupBounds, MatchingInput, MatchingResult, ALGORITHM_VERSION};
pub use participant::{Pairing, ParticipantId, RecentGroup};
pub use run::{
    LotteryRules, MatchRecord, MatchReport, Participation, ParticipationStatus, PriorRun,
    RunDisposition, RunOutcome, RunSnapshot, RunStatus,
};
