//! Data models for the creator dashboard.
//!
//! The serialized shapes are the flat camelCase records stored under each key of the
//! persistence port.

mod goal;
mod growth;
mod idea;
mod stream;
mod summary;
mod theme;

pub use goal::*;
pub use growth::*;
pub use idea::*;
pub use stream::*;
pub use summary::*;
pub use theme::*;

/// Identifier shared by every list entity: the creation instant in milliseconds.
pub type EntityId = i64;

/// Request body for creating a goal or an idea.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CreateTextRequest {
    #[serde(default)]
    pub text: String,
}
