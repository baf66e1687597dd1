//! # Quorum Metrics
//!
//! Prometheus metrics for quorum formation.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! qc-18-quorums = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `quorum_member_selections_total` - Member sets computed, by quorum type
//! - `quorum_connection_requests_total` - Connection sets computed, by quorum type
//! - `quorum_underfilled_total` - Member sets smaller than the configured size
//! - `quorum_active_checks_total` - Activity checks, by result

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_int_counter_vec, IntCounterVec};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Member sets computed, labeled by quorum type
    pub static ref MEMBER_SELECTIONS: IntCounterVec = register_int_counter_vec!(
        "quorum_member_selections_total",
        "Total number of quorum member sets computed",
        &["llmq_type"]
    )
    .expect("Failed to create MEMBER_SELECTIONS metric");

    /// Connection sets computed, labeled by quorum type
    pub static ref CONNECTION_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "quorum_connection_requests_total",
        "Total number of quorum connection sets computed",
        &["llmq_type"]
    )
    .expect("Failed to create CONNECTION_REQUESTS metric");

    /// Underfilled member sets, labeled by quorum type
    pub static ref UNDERFILLED: IntCounterVec = register_int_counter_vec!(
        "quorum_underfilled_total",
        "Total number of member sets smaller than the configured size",
        &["llmq_type"]
    )
    .expect("Failed to create UNDERFILLED metric");

    /// Activity checks, labeled by result
    pub static ref ACTIVE_CHECKS: IntCounterVec = register_int_counter_vec!(
        "quorum_active_checks_total",
        "Total number of quorum activity checks",
        &["result"]
    )
    .expect("Failed to create ACTIVE_CHECKS metric");
}

// =============================================================================
// METRIC RECORDING FUNCTIONS
// =============================================================================

/// Record a member set computation
#[cfg(feature = "metrics")]
pub fn record_member_selection(llmq_type: &str) {
    MEMBER_SELECTIONS.with_label_values(&[llmq_type]).inc();
}

/// Record a connection set computation
#[cfg(feature = "metrics")]
pub fn record_connection_request(llmq_type: &str) {
    CONNECTION_REQUESTS.with_label_values(&[llmq_type]).inc();
}

/// Record an underfilled member set
#[cfg(feature = "metrics")]
pub fn record_underfilled(llmq_type: &str) {
    UNDERFILLED.with_label_values(&[llmq_type]).inc();
}

/// Record an activity check outcome
#[cfg(feature = "metrics")]
pub fn record_active_check(active: bool) {
    let result = if active { "active" } else { "inactive" };
    ACTIVE_CHECKS.with_label_values(&[result]).inc();
}

// =============================================================================
// NO-OP IMPLEMENTATIONS (when metrics feature disabled)
// =============================================================================

/// Record a member set computation
#[cfg(not(feature = "metrics"))]
pub fn record_member_selection(_llmq_type: &str) {}

/// Record a connection set computation
#[cfg(not(feature = "metrics"))]
pub fn record_connection_request(_llmq_type: &str) {}

/// Record an underfilled member set
#[cfg(not(feature = "metrics"))]
pub fn record_underfilled(_llmq_type: &str) {}

/// Record an activity check outcome
#[cfg(not(feature = "metrics"))]
pub fn record_active_check(_active: bool) {}
