use serde::{Deserialize, Serialize};

/// One visually distinct step of an algorithm's execution.
///
/// The snapshot is opaque to the player; it is whatever the renderer needs to
/// draw that instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Frame<T> {
    pub snapshot: T,
    pub description: String,
}

impl<T> Frame<T> {
    pub fn new(snapshot: T, description: impl Into<String>) -> Self {
        Self {
            snapshot,
            description: description.into(),
        }
    }
}
