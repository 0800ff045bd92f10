//! Goal tracker: insertion-ordered goals with a completion flag.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{next_id, remove_by_id, require_text, update_by_id, Shared};
use crate::errors::AppError;
use crate::models::{EntityId, Goal};
use crate::store::{keys, load_json, save_json, KvStore};

pub struct GoalTracker<S> {
    shared: Arc<Shared<S>>,
}

impl<S: KvStore> GoalTracker<S> {
    pub fn new(shared: Arc<Shared<S>>) -> Self {
        Self { shared }
    }

    pub async fn list(&self) -> Result<Vec<Goal>, AppError> {
        load_json(self.shared.store(), keys::GOALS).await
    }

    pub async fn add(&self, text: &str) -> Result<Goal, AppError> {
        let text = require_text(text, "Please enter a goal")?;

        let _guard = self.shared.lock().await;
        let mut goals = self.list().await?;
        let goal = push_goal(&mut goals, text, Utc::now());
        save_json(self.shared.store(), keys::GOALS, &goals).await?;

        tracing::debug!(id = goal.id, "Added goal");
        Ok(goal)
    }

    pub async fn toggle_complete(&self, id: EntityId) -> Result<Option<Goal>, AppError> {
        let _guard = self.shared.lock().await;
        let mut goals = self.list().await?;

        let Some(updated) = update_by_id(&mut goals, id, |g| g.completed = !g.completed).cloned()
        else {
            return Ok(None);
        };
        save_json(self.shared.store(), keys::GOALS, &goals).await?;

        tracing::debug!(id, completed = updated.completed, "Toggled goal");
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        let _guard = self.shared.lock().await;
        let mut goals = self.list().await?;

        if !remove_by_id(&mut goals, id) {
            return Ok(false);
        }
        save_json(self.shared.store(), keys::GOALS, &goals).await?;

        tracing::debug!(id, "Deleted goal");
        Ok(true)
    }
}

pub fn push_goal(goals: &mut Vec<Goal>, text: String, now: DateTime<Utc>) -> Goal {
    let goal = Goal {
        id: next_id(goals, now),
        text,
        completed: false,
        created_at: now,
    };
    goals.push(goal.clone());
    goal
}
