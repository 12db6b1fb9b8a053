//! Keyword-table intent detection for the composite recommend call.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    Property,
    Experience,
    Inspiration,
}

/// Intent → trigger phrases. Order here is the order intents are reported in.
pub const INTENT_KEYWORDS: &[(Intent, &[&str])] = &[
    (Intent::Property, &["stay", "hotel", "property", "where", "visit"]),
    (Intent::Experience, &["experience", "review", "guests", "people say"]),
    (Intent::Inspiration, &["inspire", "ideas", "popular", "recommend"]),
];

/// Used when the query triggers nothing
pub const DEFAULT_INTENTS: &[Intent] = &[Intent::Property, Intent::Inspiration];

impl Intent {
    /// Label used in the `understanding` sentence
    pub fn label(self) -> &'static str {
        match self {
            Intent::Property => "properties",
            Intent::Experience => "guest experiences",
            Intent::Inspiration => "travel inspiration",
        }
    }
}

/// Every intent whose keywords appear in `query`, in table order. Never empty.
pub fn detect(query: &str) -> Vec<Intent> {
    let query = query.to_lowercase();
    let detected: Vec<Intent> = INTENT_KEYWORDS
        .iter()
        .filter(|(_, words)| words.iter().any(|w| query.contains(w)))
        .map(|(intent, _)| *intent)
        .collect();

    if detected.is_empty() {
        DEFAULT_INTENTS.to_vec()
    } else {
        detected
    }
}

/// "Looking for: properties, travel inspiration"
pub fn understanding(intents: &[Intent]) -> String {
    let mut ordered = intents.to_vec();
    ordered.sort();
    ordered.dedup();
    let labels: Vec<&str> = ordered.into_iter().map(Intent::label).collect();
    format!("Looking for: {}", labels.join(", "))
}
