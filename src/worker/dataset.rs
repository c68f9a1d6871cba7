use serde::{Deserialize, Serialize};

/// The in-memory shard a worker node searches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Dataset {
    items: Vec<String>,
}

impl Dataset {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    /// Parses a JSON array of strings, e.g. `["Berlin","Paris"]`.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Case-insensitive substring filter, in dataset order.
    pub fn search(&self, query: &str) -> Vec<String> {
        let needle = query.to_lowercase();
        self.items
            .iter()
            .filter(|item| item.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }
}
