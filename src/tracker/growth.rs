//! Growth tracker: current follower counters plus a bounded snapshot history.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::Shared;
use crate::errors::AppError;
use crate::models::{GrowthCurrent, GrowthInput, GrowthSnapshot, Platform};
use crate::store::{keys, load_json, save_json, KvStore};

/// Counter values supplied in one update; absent platforms are left out.
pub type CounterUpdate = Vec<(Platform, u64)>;

pub struct GrowthTracker<S> {
    shared: Arc<Shared<S>>,
    history_limit: usize,
}

impl<S> Clone for GrowthTracker<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
            history_limit: self.history_limit,
        }
    }
}

impl<S: KvStore> GrowthTracker<S> {
    pub fn new(shared: Arc<Shared<S>>, history_limit: usize) -> Self {
        Self {
            shared,
            history_limit,
        }
    }

    /// Current counters. Missing or unreadable values count as zero.
    pub async fn current_values(&self) -> Result<GrowthCurrent, AppError> {
        let mut current = GrowthCurrent::default();

        for platform in Platform::ALL {
            let Some(raw) = self.shared.store().get(platform.key()).await? else {
                continue;
            };
            match raw.trim().parse::<u64>() {
                Ok(value) => current.set(platform, value),
                Err(_) => {
                    tracing::warn!(key = platform.key(), value = %raw, "Unreadable counter, using 0");
                }
            }
        }

        Ok(current)
    }

    /// Recorded snapshots, oldest first.
    pub async fn history(&self) -> Result<Vec<GrowthSnapshot>, AppError> {
        load_json(self.shared.store(), keys::GROWTH_HISTORY).await
    }

    /// Overwrite the supplied counters and append a history entry.
    ///
    /// Platforms left out of `input` are recorded in the snapshot with the value they had
    /// before this call.
    pub async fn record_snapshot(&self, input: &GrowthInput) -> Result<GrowthSnapshot, AppError> {
        let update = parse_counter_update(input)?;

        let _guard = self.shared.lock().await;
        let previous = self.current_values().await?;

        for (platform, value) in &update {
            self.shared
                .store()
                .set(platform.key(), &value.to_string())
                .await?;
        }

        let snapshot = resolve_snapshot(previous, &update, Utc::now());
        let mut history = self.history().await?;
        history.push(snapshot.clone());
        truncate_history(&mut history, self.history_limit);
        save_json(self.shared.store(), keys::GROWTH_HISTORY, &history).await?;

        tracing::debug!(
            twitch = snapshot.twitch,
            youtube = snapshot.youtube,
            tiktok = snapshot.tiktok,
            entries = history.len(),
            "Recorded growth snapshot"
        );
        Ok(snapshot)
    }
}

/// Validate raw inputs: at least one field present, every present field a count.
pub fn parse_counter_update(input: &GrowthInput) -> Result<CounterUpdate, AppError> {
    let mut update = CounterUpdate::new();

    for platform in Platform::ALL {
        let Some(raw) = input.field(platform) else {
            continue;
        };
        let value = raw.parse::<u64>().map_err(|_| {
            AppError::validation(format!(
                "{} followers must be a whole number, got {}",
                platform.label(),
                raw
            ))
        })?;
        update.push((platform, value));
    }

    if update.is_empty() {
        return Err(AppError::validation("Please enter at least one value"));
    }
    Ok(update)
}

/// Snapshot values: updated platforms take their new value, the rest keep `previous`.
pub fn resolve_snapshot(
    previous: GrowthCurrent,
    update: &[(Platform, u64)],
    now: DateTime<Utc>,
) -> GrowthSnapshot {
    let mut resolved = previous;
    for (platform, value) in update {
        resolved.set(*platform, *value);
    }
    GrowthSnapshot::new(now, resolved)
}

/// Keep only the most recent `limit` entries.
pub fn truncate_history(history: &mut Vec<GrowthSnapshot>, limit: usize) {
    if history.len() > limit {
        history.drain(..history.len() - limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_HISTORY_LIMIT;
    use crate::store::MemoryStore;

    fn tracker() -> GrowthTracker<MemoryStore> {
        GrowthTracker::new(
            Arc::new(Shared::new(MemoryStore::new())),
            DEFAULT_HISTORY_LIMIT,
        )
    }

    fn input(twitch: &str, youtube: &str, tiktok: &str) -> GrowthInput {
        let field = |v: &str| (!v.is_empty()).then(|| v.to_string());
        GrowthInput {
            twitch: field(twitch),
            youtube: field(youtube),
            tiktok: field(tiktok),
        }
    }

    #[tokio::test]
    async fn test_first_snapshot_defaults_to_zero() {
        let growth = tracker();
        growth.record_snapshot(&input("100", "", "")).await.unwrap();

        let current = growth.current_values().await.unwrap();
        assert_eq!(
            current,
            GrowthCurrent {
                twitch: 100,
                youtube: 0,
                tiktok: 0
            }
        );

        let history = growth.history().await.unwrap();
        let last = history.last().unwrap();
        assert_eq!((last.twitch, last.youtube, last.tiktok), (100, 0, 0));
    }

    #[tokio::test]
    async fn test_absent_fields_carry_previous_values() {
        let growth = tracker();
        growth.record_snapshot(&input("100", "50", "10")).await.unwrap();
        let snapshot = growth.record_snapshot(&input("", "75", "")).await.unwrap();

        assert_eq!(
            (snapshot.twitch, snapshot.youtube, snapshot.tiktok),
            (100, 75, 10)
        );
        assert_eq!(growth.current_values().await.unwrap().youtube, 75);
    }

    #[tokio::test]
    async fn test_zero_is_a_real_value() {
        let growth = tracker();
        growth.record_snapshot(&input("100", "", "")).await.unwrap();
        let snapshot = growth.record_snapshot(&input("0", "", "")).await.unwrap();

        assert_eq!(snapshot.twitch, 0);
        assert_eq!(growth.current_values().await.unwrap().twitch, 0);
    }

    #[tokio::test]
    async fn test_invalid_input_changes_nothing() {
        let growth = tracker();

        let err = growth.record_snapshot(&input("", "", "")).await.unwrap_err();
        assert!(err.is_validation());

        let err = growth
            .record_snapshot(&input("200", "lots", ""))
            .await
            .unwrap_err();
        assert!(err.is_validation());

        assert_eq!(growth.current_values().await.unwrap(), GrowthCurrent::default());
        assert!(growth.history().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_history_is_capped() {
        let growth = tracker();
        for n in 1..=DEFAULT_HISTORY_LIMIT + 1 {
            growth
                .record_snapshot(&input(&n.to_string(), "", ""))
                .await
                .unwrap();
            assert!(growth.history().await.unwrap().len() <= DEFAULT_HISTORY_LIMIT);
        }

        let history = growth.history().await.unwrap();
        assert_eq!(history.len(), DEFAULT_HISTORY_LIMIT);
        // The first entry (twitch = 1) was evicted; the second is now the oldest.
        assert_eq!(history.first().unwrap().twitch, 2);
        assert_eq!(
            history.last().unwrap().twitch,
            DEFAULT_HISTORY_LIMIT as u64 + 1
        );
    }

    #[test]
    fn test_truncate_history_keeps_newest() {
        let now = Utc::now();
        let mut history: Vec<GrowthSnapshot> = (0..5)
            .map(|n| {
                GrowthSnapshot::new(
                    now,
                    GrowthCurrent {
                        twitch: n,
                        ..Default::default()
                    },
                )
            })
            .collect();

        truncate_history(&mut history, 3);
        let kept: Vec<u64> = history.iter().map(|s| s.twitch).collect();
        assert_eq!(kept, vec![2, 3, 4]);
    }

    #[tokio::test]
    async fn test_unreadable_counter_reads_as_zero() {
        let store = MemoryStore::new();
        store.set("twitch", "abc").await.unwrap();
        store.set("youtube", "250").await.unwrap();
        let growth = GrowthTracker::new(Arc::new(Shared::new(store)), DEFAULT_HISTORY_LIMIT);

        let current = growth.current_values().await.unwrap();
        assert_eq!(
            current,
            GrowthCurrent {
                twitch: 0,
                youtube: 250,
                tiktok: 0
            }
        );

        let snapshot = growth.record_snapshot(&input("", "", "7")).await.unwrap();
        assert_eq!(
            (snapshot.twitch, snapshot.youtube, snapshot.tiktok),
            (0, 250, 7)
        );
    }
}
