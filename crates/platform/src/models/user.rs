use serde::{Deserialize, Serialize};

/// A platform-wide account, independent of any space.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub username: String,
}
