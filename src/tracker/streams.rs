//! Stream planner: scheduled streams kept in ascending date order.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};

use super::{next_id, remove_by_id, require_text, update_by_id, Shared};
use crate::errors::AppError;
use crate::models::{parse_stream_date, EntityId, Stream};
use crate::store::{keys, load_json, save_json, KvStore};

pub struct StreamPlanner<S> {
    shared: Arc<Shared<S>>,
}

impl<S> Clone for StreamPlanner<S> {
    fn clone(&self) -> Self {
        Self {
            shared: self.shared.clone(),
        }
    }
}

impl<S: KvStore> StreamPlanner<S> {
    pub fn new(shared: Arc<Shared<S>>) -> Self {
        Self { shared }
    }

    /// All scheduled streams, ordered by date.
    pub async fn list(&self) -> Result<Vec<Stream>, AppError> {
        load_json(self.shared.store(), keys::STREAMS).await
    }

    /// Schedule a stream. Both fields are required and the date must parse.
    pub async fn add(&self, title: &str, date: &str) -> Result<Stream, AppError> {
        let title = require_text(title, "Stream title is required")?;
        let date = require_text(date, "Stream date is required")?;
        let date = parse_stream_date(&date)
            .ok_or_else(|| AppError::validation(format!("Invalid stream date: {}", date)))?;

        let _guard = self.shared.lock().await;
        let mut streams = self.list().await?;
        let stream = insert_stream(&mut streams, title, date, Utc::now());
        save_json(self.shared.store(), keys::STREAMS, &streams).await?;

        tracing::debug!(id = stream.id, date = %stream.date, "Scheduled stream");
        Ok(stream)
    }

    /// Flip the completed flag. Unknown ids are a no-op and return `None`.
    pub async fn toggle_complete(&self, id: EntityId) -> Result<Option<Stream>, AppError> {
        let _guard = self.shared.lock().await;
        let mut streams = self.list().await?;

        let Some(updated) = update_by_id(&mut streams, id, |s| s.completed = !s.completed).cloned()
        else {
            return Ok(None);
        };
        save_json(self.shared.store(), keys::STREAMS, &streams).await?;

        tracing::debug!(id, completed = updated.completed, "Toggled stream");
        Ok(Some(updated))
    }

    /// Remove a stream. Returns whether it existed.
    pub async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        let _guard = self.shared.lock().await;
        let mut streams = self.list().await?;

        if !remove_by_id(&mut streams, id) {
            return Ok(false);
        }
        save_json(self.shared.store(), keys::STREAMS, &streams).await?;

        tracing::debug!(id, "Deleted stream");
        Ok(true)
    }
}

/// Append a new stream and restore date order. Equal dates keep insertion order.
pub fn insert_stream(
    streams: &mut Vec<Stream>,
    title: String,
    date: NaiveDateTime,
    now: DateTime<Utc>,
) -> Stream {
    let stream = Stream {
        id: next_id(streams, now),
        title,
        date,
        completed: false,
    };
    streams.push(stream.clone());
    streams.sort_by_key(|s| s.date);
    stream
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn planner() -> StreamPlanner<MemoryStore> {
        StreamPlanner::new(Arc::new(Shared::new(MemoryStore::new())))
    }

    #[tokio::test]
    async fn test_add_keeps_date_order() {
        let planner = planner();
        planner.add("Launch", "2025-01-10").await.unwrap();
        planner.add("Recap", "2025-01-05").await.unwrap();

        let titles: Vec<String> = planner
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.title)
            .collect();
        assert_eq!(titles, vec!["Recap", "Launch"]);
    }

    #[tokio::test]
    async fn test_add_grows_by_one_with_unique_ids() {
        let planner = planner();
        let dates = ["2025-03-01T20:00", "2025-02-01T20:00", "2025-02-01T18:00", "2025-04-01"];

        for (n, date) in dates.iter().enumerate() {
            let added = planner.add("Stream", date).await.unwrap();
            let streams = planner.list().await.unwrap();

            assert_eq!(streams.len(), n + 1);
            assert_eq!(streams.iter().filter(|s| s.id == added.id).count(), 1);
            assert!(streams.windows(2).all(|pair| pair[0].date <= pair[1].date));
        }
    }

    #[tokio::test]
    async fn test_add_rejects_missing_fields() {
        let planner = planner();

        assert!(planner.add("", "2025-01-10").await.unwrap_err().is_validation());
        assert!(planner.add("Launch", "  ").await.unwrap_err().is_validation());
        assert!(planner.add("Launch", "soon").await.unwrap_err().is_validation());
        assert!(planner.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_toggle_twice_restores_state() {
        let planner = planner();
        let stream = planner.add("Launch", "2025-01-10").await.unwrap();

        let toggled = planner.toggle_complete(stream.id).await.unwrap().unwrap();
        assert!(toggled.completed);
        let toggled = planner.toggle_complete(stream.id).await.unwrap().unwrap();
        assert!(!toggled.completed);

        assert_eq!(planner.toggle_complete(stream.id + 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_second_delete_is_noop() {
        let planner = planner();
        let keep = planner.add("Keep", "2025-01-10").await.unwrap();
        let gone = planner.add("Gone", "2025-01-11").await.unwrap();

        assert!(planner.delete(gone.id).await.unwrap());
        assert!(!planner.delete(gone.id).await.unwrap());
        assert_eq!(planner.list().await.unwrap(), vec![keep]);
    }

    #[test]
    fn test_insert_stream_equal_dates_keep_insertion_order() {
        let date = parse_stream_date("2025-01-10T19:00").unwrap();
        let now = Utc::now();
        let mut streams = Vec::new();

        let first = insert_stream(&mut streams, "First".to_string(), date, now);
        let second = insert_stream(&mut streams, "Second".to_string(), date, now);

        assert!(second.id > first.id);
        assert_eq!(streams[0].title, "First");
        assert_eq!(streams[1].title, "Second");
    }
}
