//! Dashboard summary model.

use serde::Serialize;

use super::{GrowthCurrent, Stream};

/// What the dashboard page shows: the next stream and the current counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub next_stream: Option<Stream>,
    pub growth: GrowthCurrent,
}
