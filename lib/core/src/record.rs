use serde::{Deserialize, Serialize};

/// Country code assumed when a story carries none
pub const DEFAULT_COUNTRY: &str = "JP";

/// Name the upstream export uses for stories without a property
pub const PLACEHOLDER_NAME: &str = "Unknown Property";

/// A single stay in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyRecord {
    pub name: String,
    #[serde(default)]
    pub prefecture: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub description: String,
    /// Only populated by some exports; destination matching treats empty as no match
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(default)]
    pub likes: u64,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl PropertyRecord {
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, prefecture: impl Into<String>, likes: u64) -> Self {
        Self {
            name: name.into(),
            prefecture: prefecture.into(),
            country: default_country(),
            description: String::new(),
            address: String::new(),
            likes,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    /// Whether a name is acceptable for the catalog
    pub fn is_listable_name(name: &str) -> bool {
        !name.trim().is_empty() && name != PLACEHOLDER_NAME
    }
}
