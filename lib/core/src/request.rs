//! Request shapes for each operation.
//!
//! Every field is optional and parsing never fails: a missing, unparsable or
//! non-object body is the default request, and a field of the wrong JSON type
//! is treated as absent.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Numbers or numeric strings; negatives clamp to zero
fn lenient_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let count = match Value::deserialize(deserializer)? {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    Ok(count.map(|c| c.max(0) as usize))
}

/// Plain keyword search
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub query: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub destination: Option<String>,
}

/// Composite recommend call from the voice agent
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RecommendRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub query: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExperiencesRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub theme: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub prefecture: Option<String>,
    /// Accepted as a synonym; `prefecture` wins when both are sent
    #[serde(deserialize_with = "lenient_text")]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InspirationRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub destination: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GalleryRequest {
    #[serde(deserialize_with = "lenient_text")]
    pub style: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub count: Option<usize>,
}

/// Decode a raw request body into `T`, degrading to `T::default()`
pub fn parse_body<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }

    match serde_json::from_slice::<Value>(body) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).unwrap_or_else(|e| {
            debug!("Ignoring unusable request body: {}", e);
            T::default()
        }),
        Ok(other) => {
            debug!("Ignoring non-object request body: {}", other);
            T::default()
        }
        Err(e) => {
            debug!("Ignoring unparsable request body: {}", e);
            T::default()
        }
    }
}
