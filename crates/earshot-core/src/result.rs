//! Classification result wire shape

use std::collections::BTreeMap;

use serde::Serialize;

/// JSON result returned by both classifiers.
///
/// Field names match what the upstream gateway decodes; don't rename them.
#[derive(Debug, Clone, Serialize)]
pub struct Classification {
    pub label: String,
    pub confidence: f32,
    pub scores: BTreeMap<String, f32>,
    pub latency_ms: f64,
}

/// Score precision on the wire
pub(crate) fn round4(v: f32) -> f32 {
    (v * 10_000.0).round() / 10_000.0
}

/// Latency precision on the wire
pub(crate) fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
