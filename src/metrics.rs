//! Metric helpers for `framesink`.
//!
//! The helpers record through the [`metrics`] facade when the optional
//! `metrics` feature is enabled (the default) and compile to no-ops otherwise.
//! Install a recorder such as `metrics-exporter-prometheus` in the host
//! application to export them.

/// Name of the counter tracking frames accepted by sinks.
pub const FRAMES_ACCEPTED: &str = "framesink_frames_accepted_total";
/// Name of the counter tracking messages delivered to handlers.
pub const MESSAGES_DELIVERED: &str = "framesink_messages_delivered_total";
/// Name of the counter tracking failed completions, labelled by `kind`.
pub const ERRORS_TOTAL: &str = "framesink_errors_total";

/// Record one accepted frame.
#[cfg(feature = "metrics")]
pub fn inc_frames() { metrics::counter!(FRAMES_ACCEPTED).increment(1); }

/// Record one message delivered to its handler.
#[cfg(feature = "metrics")]
pub fn inc_messages() { metrics::counter!(MESSAGES_DELIVERED).increment(1); }

/// Record one failed completion of the given kind.
#[cfg(feature = "metrics")]
pub fn inc_errors(kind: &'static str) { metrics::counter!(ERRORS_TOTAL, "kind" => kind).increment(1); }

#[cfg(not(feature = "metrics"))]
pub fn inc_frames() {}

#[cfg(not(feature = "metrics"))]
pub fn inc_messages() {}

#[cfg(not(feature = "metrics"))]
pub fn inc_errors(_kind: &'static str) {}
