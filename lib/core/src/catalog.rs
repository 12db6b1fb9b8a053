//! Immutable, in-memory property catalog.
//!
//! The catalog is built exactly once at startup and shared read-only by all
//! request handlers, so it carries no locks.

use crate::record::{PropertyRecord, DEFAULT_COUNTRY};
use crate::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Where the catalog's records came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogOrigin {
    File(PathBuf),
    Builtin,
    Memory,
}

impl fmt::Display for CatalogOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogOrigin::File(path) => write!(f, "{}", path.display()),
            CatalogOrigin::Builtin => write!(f, "builtin"),
            CatalogOrigin::Memory => write!(f, "memory"),
        }
    }
}

/// One story as exported upstream. Every field is optional; wrong JSON types
/// make the whole row fail to deserialize and it is skipped.
#[derive(Debug, Deserialize)]
struct StoryRow {
    name: Option<String>,
    prefecture: Option<String>,
    country: Option<String>,
    ts_stay_text: Option<String>,
    ts_text: Option<String>,
    likes_count: Option<u64>,
    address: Option<String>,
}

impl StoryRow {
    fn into_record(self) -> Option<PropertyRecord> {
        let name = self.name?;
        if !PropertyRecord::is_listable_name(&name) {
            return None;
        }

        Some(PropertyRecord {
            name,
            prefecture: self.prefecture.unwrap_or_default(),
            country: self.country.unwrap_or_else(|| DEFAULT_COUNTRY.to_string()),
            description: self.ts_stay_text.or(self.ts_text).unwrap_or_default(),
            address: self.address.unwrap_or_default(),
            likes: self.likes_count.unwrap_or(0),
        })
    }
}

/// Ordered, read-only sequence of properties
#[derive(Debug, Clone)]
pub struct Catalog {
    records: Vec<PropertyRecord>,
    origin: CatalogOrigin,
}

impl Catalog {
    /// Build a catalog from already-projected records, dropping unlisted names
    pub fn from_records(records: Vec<PropertyRecord>) -> Self {
        let records = records
            .into_iter()
            .filter(|r| PropertyRecord::is_listable_name(&r.name))
            .collect();
        Self {
            records,
            origin: CatalogOrigin::Memory,
        }
    }

    /// Parse a JSON array of stories. Individual malformed stories are skipped;
    /// a source that yields no records at all is an error.
    pub fn from_reader<R: Read>(reader: R, origin: CatalogOrigin) -> Result<Self> {
        let rows: Vec<serde_json::Value> = serde_json::from_reader(reader)?;
        let total = rows.len();

        let mut records = Vec::with_capacity(total);
        for (position, row) in rows.into_iter().enumerate() {
            match serde_json::from_value::<StoryRow>(row) {
                Ok(story) => {
                    if let Some(record) = story.into_record() {
                        records.push(record);
                    }
                }
                Err(e) => debug!("Skipping story {}: {}", position, e),
            }
        }

        if records.is_empty() {
            return Err(Error::EmptyCatalog);
        }

        debug!("Kept {} of {} stories", records.len(), total);
        Ok(Self { records, origin })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), CatalogOrigin::File(path.to_path_buf()))
    }

    /// Load from disk, or fall back to the built-in records so the service
    /// keeps answering in degraded mode.
    pub fn load_or_builtin<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::from_path(path) {
            Ok(catalog) => {
                info!("Loaded {} properties from {}", catalog.len(), path.display());
                catalog
            }
            Err(e) => {
                warn!("Could not load catalog from {}: {}", path.display(), e);
                let catalog = Self::builtin();
                warn!("Serving {} built-in properties", catalog.len());
                catalog
            }
        }
    }

    pub fn builtin() -> Self {
        let records = vec![
            PropertyRecord::new("Mountain Retreat Nagano", "Nagano", 45).with_description(
                "Peaceful mountain property with stunning views. Guests love the serene atmosphere.",
            ),
            PropertyRecord::new("Kyoto Traditional Guesthouse", "Kyoto", 38).with_description(
                "Authentic Japanese experience in historic Kyoto. Traditional architecture and warm hospitality.",
            ),
        ];
        Self {
            records,
            origin: CatalogOrigin::Builtin,
        }
    }

    #[inline]
    pub fn records(&self) -> &[PropertyRecord] {
        &self.records
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, PropertyRecord> {
        self.records.iter()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn origin(&self) -> &CatalogOrigin {
        &self.origin
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PropertyRecord;
    type IntoIter = std::slice::Iter<'a, PropertyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
