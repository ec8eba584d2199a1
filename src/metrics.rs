//! Per-turn metrics notification.
//!
//! Aggregation and leaderboards live elsewhere; the core only emits one
//! `TurnReport` per turn and never waits on the result.

use std::time::Duration;

use serde::Serialize;
use tracing::info;

use crate::pipeline::types::SurfacedIntel;

/// What happened on one turn, as seen by a metrics collector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReport {
    pub session_id: String,
    pub scam: bool,
    pub extracted: SurfacedIntel,
    /// Messages in the session including this one.
    pub message_count: usize,
    /// Time since the session's first recorded turn.
    pub engagement: Duration,
}

/// Fire-and-forget receiver for turn reports.
pub trait MetricsSink: Send + Sync {
    fn record(&self, report: TurnReport);
}

/// Discards every report.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetricsSink;

impl MetricsSink for NoopMetricsSink {
    fn record(&self, _report: TurnReport) {}
}

/// Writes each report as a structured log line.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMetricsSink;

impl MetricsSink for LogMetricsSink {
    fn record(&self, report: TurnReport) {
        info!(
            session_id = %report.session_id,
            scam = report.scam,
            artifacts = report.extracted.artifact_count(),
            message_count = report.message_count,
            engagement_secs = report.engagement.as_secs(),
            "Turn recorded"
        );
    }
}
