//! Metrics collection module for the match service
//!
//! This module provides functionality for collecting and exposing service metrics
//! using Prometheus.

use crate::engine::entry::MatchReport;
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec, Opts, Registry, TextEncoder,
};
use std::time::Instant;

lazy_static! {
    /// Global Prometheus registry instance
    pub static ref REGISTRY_INSTANCE: Registry = Registry::new();

    /// Counter for tracking request counts by method
    pub static ref REQ_COUNTER_VEC: CounterVec =
        CounterVec::new(Opts::new("request_counter", "request counter"), &["method"]).unwrap();

    /// Histogram for tracking method execution times
    pub static ref METHOD_HISTOGRAM_VEC: HistogramVec = HistogramVec::new(
        HistogramOpts::new("method_cost", "method cost"),
        &["method"]
    )
    .unwrap();

    /// Matching computations by outcome, `clean` or `fallback`
    pub static ref MATCHING_OUTCOME_COUNTER: CounterVec = CounterVec::new(
        Opts::new("matching_outcome", "matching computations by outcome"),
        &["outcome"]
    )
    .unwrap();

    /// Shuffle passes needed per matching computation
    pub static ref MATCHING_ATTEMPTS_HISTOGRAM: Histogram = Histogram::with_opts(
        HistogramOpts::new("matching_attempts", "shuffle passes per matching computation")
            .buckets(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0])
    )
    .unwrap();
}

/// Initializes the metrics registry
///
/// Registers all metric collectors with the global registry
pub fn init_registry() {
    let _ = REGISTRY_INSTANCE.register(Box::new(REQ_COUNTER_VEC.clone()));
    let _ = REGISTRY_INSTANCE.register(Box::new(METHOD_HISTOGRAM_VEC.clone()));
    let _ = REGISTRY_INSTANCE.register(Box::new(MATCHING_OUTCOME_COUNTER.clone()));
    let _ = REGISTRY_INSTANCE.register(Box::new(MATCHING_ATTEMPTS_HISTOGRAM.clone()));
}

/// Records metrics for a synchronous operation
///
/// Increments the request counter for `method_name`, runs `handler` and
/// observes its execution time.
pub fn record_metrics<F, T>(method_name: &'static str, handler: F) -> T
where
    F: FnOnce() -> T,
{
    let start = Instant::now();
    REQ_COUNTER_VEC.with_label_values(&[method_name]).inc();
    let result = handler();

    let elapsed = start.elapsed();
    METHOD_HISTOGRAM_VEC
        .with_label_values(&[method_name])
        .observe(elapsed.as_secs_f64());

    result
}

/// Records how a matching computation went
pub fn record_match_report(report: &MatchReport) {
    let outcome = if report.used_fallback {
        "fallback"
    } else {
        "clean"
    };
    MATCHING_OUTCOME_COUNTER.with_label_values(&[outcome]).inc();
    MATCHING_ATTEMPTS_HISTOGRAM.observe(f64::from(report.attempts));
}

/// Text exposition of every registered metric
pub fn gather() -> Vec<u8> {
    let encoder = TextEncoder::new();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&REGISTRY_INSTANCE.gather(), &mut buffer) {
        log::error!("failed to encode metrics: {}", e);
    }
    buffer
}
