use serde::{Deserialize, Serialize};

/// A tenant on the platform. Every contest and member lives inside a space,
/// and the space URL is the base for all judge and community calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Space {
    pub id: String,
    pub key: String,
    pub name: String,
    pub url: String,
}
