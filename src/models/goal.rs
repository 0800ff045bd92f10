//! Goal model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::EntityId;

/// A goal with a completion flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: EntityId,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    /// Older records store the creation instant under `date`.
    #[serde(default, alias = "date")]
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_accepts_legacy_date_field() {
        let json = r#"{"id":1,"text":"Hit 1000 followers","completed":true,"date":"2025-01-10T19:00:00.000Z"}"#;
        let goal: Goal = serde_json::from_str(json).unwrap();
        assert!(goal.completed);
        assert_eq!(goal.created_at.to_rfc3339(), "2025-01-10T19:00:00+00:00");

        let written = serde_json::to_value(&goal).unwrap();
        assert!(written.get("createdAt").is_some());
        assert!(written.get("date").is_none());
    }
}
