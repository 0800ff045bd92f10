//! Dashboard aggregator: reads the stream planner and growth tracker for the summary.

use chrono::NaiveDateTime;

use super::{GrowthTracker, StreamPlanner};
use crate::errors::AppError;
use crate::models::{DashboardSummary, Stream};
use crate::store::KvStore;

pub struct DashboardAggregator<S> {
    streams: StreamPlanner<S>,
    growth: GrowthTracker<S>,
}

impl<S: KvStore> DashboardAggregator<S> {
    pub fn new(streams: StreamPlanner<S>, growth: GrowthTracker<S>) -> Self {
        Self { streams, growth }
    }

    pub async fn next_upcoming_stream(&self, now: NaiveDateTime) -> Result<Option<Stream>, AppError> {
        let streams = self.streams.list().await?;
        Ok(next_upcoming(&streams, now))
    }

    pub async fn summary(&self, now: NaiveDateTime) -> Result<DashboardSummary, AppError> {
        Ok(DashboardSummary {
            next_stream: self.next_upcoming_stream(now).await?,
            growth: self.growth.current_values().await?,
        })
    }
}

/// Earliest stream that is not completed and not in the past.
///
/// Does not rely on the stored order; the first of several equal dates wins.
pub fn next_upcoming(streams: &[Stream], now: NaiveDateTime) -> Option<Stream> {
    streams
        .iter()
        .filter(|s| !s.completed && s.date >= now)
        .min_by_key(|s| s.date)
        .cloned()
}
