//! Match Logic Module
//!
//! Seeded grouping of run participants. A participant list is shuffled with a
//! seed-derived stream, cut into groups of the minimum size, and the leftovers
//! are dealt into groups below the maximum size. Groupings that repeat a recent
//! pairing are retried with a new seed a bounded number of times.

pub mod chunk;
pub mod matcher;
pub mod seeded;

pub use matcher::{create_matches, plan_matches, MatchPlan, Matcher, MATCH_ATTEMPTS};
