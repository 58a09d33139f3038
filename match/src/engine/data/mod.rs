//! Data Module
//!
//! Lookup structures consulted while matching.

pub mod recent_pairs;

pub use recent_pairs::RecentPairSet;
