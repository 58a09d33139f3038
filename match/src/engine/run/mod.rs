//! Run Module
//!
//! Storage-free execution and cancellation of lottery runs.

pub mod executor;

pub use executor::{cancel_run, execute_run};
