//! Theme preference, stored as a bare `dark`/`light` string.

use std::sync::Arc;

use super::Shared;
use crate::errors::AppError;
use crate::models::Theme;
use crate::store::{keys, KvStore};

/// Persisted light/dark preference.
pub struct ThemePreference<S> {
    shared: Arc<Shared<S>>,
}

impl<S: KvStore> ThemePreference<S> {
    pub fn new(shared: Arc<Shared<S>>) -> Self {
        Self { shared }
    }

    pub async fn current(&self) -> Result<Theme, AppError> {
        let Some(stored) = self.shared.store().get(keys::THEME).await? else {
            return Ok(Theme::default());
        };
        Ok(stored.parse().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Stored theme is unreadable, using dark");
            Theme::default()
        }))
    }

    pub async fn toggle(&self) -> Result<Theme, AppError> {
        let _guard = self.shared.lock().await;
        let theme = self.current().await?.toggled();
        self.shared.store().set(keys::THEME, theme.as_str()).await?;

        tracing::debug!(theme = theme.as_str(), "Switched theme");
        Ok(theme)
    }
}
