//! Idea bank: insertion-ordered content ideas with a "used" flag.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::{next_id, remove_by_id, require_text, update_by_id, Shared};
use crate::errors::AppError;
use crate::models::{EntityId, Idea};
use crate::store::{keys, load_json, save_json, KvStore};

pub struct IdeaBank<S> {
    shared: Arc<Shared<S>>,
}

impl<S: KvStore> IdeaBank<S> {
    pub fn new(shared: Arc<Shared<S>>) -> Self {
        Self { shared }
    }

    pub async fn list(&self) -> Result<Vec<Idea>, AppError> {
        load_json(self.shared.store(), keys::IDEAS).await
    }

    pub async fn add(&self, text: &str) -> Result<Idea, AppError> {
        let text = require_text(text, "Please enter an idea")?;

        let _guard = self.shared.lock().await;
        let mut ideas = self.list().await?;
        let idea = push_idea(&mut ideas, text, Utc::now());
        save_json(self.shared.store(), keys::IDEAS, &ideas).await?;

        tracing::debug!(id = idea.id, "Saved idea");
        Ok(idea)
    }

    pub async fn toggle_used(&self, id: EntityId) -> Result<Option<Idea>, AppError> {
        let _guard = self.shared.lock().await;
        let mut ideas = self.list().await?;

        let Some(updated) = update_by_id(&mut ideas, id, |i| i.used = !i.used).cloned() else {
            return Ok(None);
        };
        save_json(self.shared.store(), keys::IDEAS, &ideas).await?;

        tracing::debug!(id, used = updated.used, "Toggled idea");
        Ok(Some(updated))
    }

    pub async fn delete(&self, id: EntityId) -> Result<bool, AppError> {
        let _guard = self.shared.lock().await;
        let mut ideas = self.list().await?;

        if !remove_by_id(&mut ideas, id) {
            return Ok(false);
        }
        save_json(self.shared.store(), keys::IDEAS, &ideas).await?;

        tracing::debug!(id, "Deleted idea");
        Ok(true)
    }
}

pub fn push_idea(ideas: &mut Vec<Idea>, text: String, now: DateTime<Utc>) -> Idea {
    let idea = Idea {
        id: next_id(ideas, now),
        text,
        used: false,
        created_at: now,
    };
    ideas.push(idea.clone());
    idea
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_idea_lifecycle() {
        let bank = IdeaBank::new(Arc::new(Shared::new(MemoryStore::new())));

        let first = bank.add("Blind speedrun").await.unwrap();
        let second = bank.add("Viewer challenge night").await.unwrap();
        assert_ne!(first.id, second.id);

        let used = bank.toggle_used(first.id).await.unwrap().unwrap();
        assert!(used.used);
        let unused = bank.toggle_used(first.id).await.unwrap().unwrap();
        assert!(!unused.used);

        assert!(bank.delete(second.id).await.unwrap());
        assert!(!bank.delete(second.id).await.unwrap());
        assert_eq!(bank.list().await.unwrap(), vec![unused]);
    }

    #[tokio::test]
    async fn test_blank_idea_is_rejected() {
        let bank = IdeaBank::new(Arc::new(Shared::new(MemoryStore::new())));
        assert!(bank.add(" \t ").await.unwrap_err().is_validation());
        assert!(bank.list().await.unwrap().is_empty());
    }
}
