//! Match Engine Module
//!
//! This module contains the core components of the group matching system:
//! - `data`: Lookup structures consulted while matching
//! - `entry`: Participant, matching and run type definitions
//! - `matchengine`: Command decoding and dispatch
//! - `matchlogic`: Seeded grouping algorithm
//! - `run`: Execution and cancellation of lottery runs

pub mod data;
pub mod entry;
pub mod matchengine;
pub mod matchlogic;
pub mod run;
