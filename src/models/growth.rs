//! Growth tracking models: current follower counters and their history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Platforms whose follower counts are tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Twitch,
    Youtube,
    Tiktok,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Twitch, Platform::Youtube, Platform::Tiktok];

    /// Storage key holding the current counter.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Twitch => "twitch",
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Platform::Twitch => "Twitch",
            Platform::Youtube => "YouTube",
            Platform::Tiktok => "TikTok",
        }
    }
}

/// The three current counters, each overwritten independently.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthCurrent {
    pub twitch: u64,
    pub youtube: u64,
    pub tiktok: u64,
}

impl GrowthCurrent {
    pub fn get(&self, platform: Platform) -> u64 {
        match platform {
            Platform::Twitch => self.twitch,
            Platform::Youtube => self.youtube,
            Platform::Tiktok => self.tiktok,
        }
    }

    pub fn set(&mut self, platform: Platform, value: u64) {
        match platform {
            Platform::Twitch => self.twitch = value,
            Platform::Youtube => self.youtube = value,
            Platform::Tiktok => self.tiktok = value,
        }
    }
}

/// One recorded data point in the growth history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthSnapshot {
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub twitch: u64,
    #[serde(default)]
    pub youtube: u64,
    #[serde(default)]
    pub tiktok: u64,
}

impl GrowthSnapshot {
    pub fn new(date: DateTime<Utc>, counts: GrowthCurrent) -> Self {
        Self {
            date,
            twitch: counts.twitch,
            youtube: counts.youtube,
            tiktok: counts.tiktok,
        }
    }
}

/// Raw counter inputs. Missing and blank fields are both treated as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrowthInput {
    #[serde(default, deserialize_with = "lenient_count")]
    pub twitch: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub youtube: Option<String>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub tiktok: Option<String>,
}

impl GrowthInput {
    pub fn field(&self, platform: Platform) -> Option<&str> {
        let value = match platform {
            Platform::Twitch => &self.twitch,
            Platform::Youtube => &self.youtube,
            Platform::Tiktok => &self.tiktok,
        };
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}

/// Accepts `"100"`, `100` or `null` so form posts and JSON bodies share one shape.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawCount {
        Number(u64),
        Text(String),
    }

    Ok(
        Option::<RawCount>::deserialize(deserializer)?.map(|raw| match raw {
            RawCount::Number(n) => n.to_string(),
            RawCount::Text(s) => s,
        }),
    )
}
