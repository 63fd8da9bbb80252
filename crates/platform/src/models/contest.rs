use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contest {
    pub id: String,
    pub name: String,
}

/// A problem as listed inside one contest. `id` is only meaningful within the
/// owning contest; `index` is the 1-based ordinal shown to participants as a letter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Problem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

impl Problem {
    pub fn new(id: impl Into<String>, index: Option<u32>) -> Self {
        Self {
            id: id.into(),
            index,
        }
    }
}
