//! Seeded group matching for lottery runs.
//!
//! The core is [`engine::matchlogic::create_matches`]: a pure function that
//! splits participants into groups of bounded size while avoiding recent
//! pairings. The run layer, the command engine and the HTTP server wrap it.

pub mod config;
pub mod engine;
pub mod error;
pub mod metrics;
pub mod server;

pub use engine::entry::{MatchingInput, MatchingResult, ALGORITHM_VERSION};
pub use engine::matchlogic::{create_matches, Matcher};
