use serde::{Deserialize, Serialize};

/// One page of an offset/size listing. `total` is the server's count of all
/// matching items, not the length of `items`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u32) -> Self {
        Self { items, total }
    }
}
