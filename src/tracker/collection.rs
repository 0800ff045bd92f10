//! Helpers shared by the list-backed trackers.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::errors::AppError;
use crate::models::{EntityId, Goal, Idea, Stream};

/// A record addressed by its id inside a collection.
pub trait Entity {
    fn id(&self) -> EntityId;
}

impl Entity for Stream {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for Goal {
    fn id(&self) -> EntityId {
        self.id
    }
}

impl Entity for Idea {
    fn id(&self) -> EntityId {
        self.id
    }
}

/// Next id for a collection: the creation instant in milliseconds, bumped past the
/// largest existing id so ids stay unique and increasing.
///
/// When the largest stored id is `i64::MAX` the id cannot increase any further, and the
/// first free id at or after the clock value is used instead.
pub fn next_id<T: Entity>(items: &[T], now: DateTime<Utc>) -> EntityId {
    let candidate = now.timestamp_millis();
    match items.iter().map(Entity::id).max() {
        Some(max) if max >= candidate => max
            .checked_add(1)
            .unwrap_or_else(|| first_free_id(items, candidate)),
        _ => candidate,
    }
}

fn first_free_id<T: Entity>(items: &[T], from: EntityId) -> EntityId {
    let taken: HashSet<EntityId> = items.iter().map(Entity::id).collect();
    (from..=EntityId::MAX)
        .find(|id| !taken.contains(id))
        .unwrap_or(from)
}

/// Apply `flip` to the entry with `id`, returning the updated entry.
pub fn update_by_id<T, F>(items: &mut [T], id: EntityId, flip: F) -> Option<&T>
where
    T: Entity,
    F: FnOnce(&mut T),
{
    let item = items.iter_mut().find(|item| item.id() == id)?;
    flip(&mut *item);
    Some(&*item)
}

/// Remove the entry with `id`. Returns whether anything was removed.
pub fn remove_by_id<T: Entity>(items: &mut Vec<T>, id: EntityId) -> bool {
    let before = items.len();
    items.retain(|item| item.id() != id);
    items.len() != before
}

/// Trim a required text field, failing when nothing is left.
pub fn require_text(raw: &str, message: &str) -> Result<String, AppError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(message));
    }
    Ok(trimmed.to_string())
}
