//! Projections of [`PropertyRecord`] into the per-endpoint payload items.

use crate::PropertyRecord;
use serde::{Deserialize, Serialize};

pub const ELLIPSIS: &str = "...";

/// Character budgets for the text field of each view
pub const SEARCH_HIGHLIGHT_CHARS: usize = 80;
pub const GALLERY_DESCRIPTION_CHARS: usize = 100;
pub const STORY_CHARS: usize = 120;
pub const EXPERIENCE_CHARS: usize = 150;
pub const RECOMMEND_HIGHLIGHT_CHARS: usize = 200;

pub const MAX_STARS: u64 = 5;
pub const LIKES_PER_STAR: u64 = 10;

/// First `budget` characters of `text`, plus an ellipsis only when something was cut
pub fn snippet(text: &str, budget: usize) -> String {
    match text.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

/// One star per ten likes, at most five
pub fn star_rating(likes: u64) -> String {
    "★".repeat((likes / LIKES_PER_STAR).min(MAX_STARS) as usize)
}

pub fn likes_label(likes: u64) -> String {
    if likes == 1 {
        "1 like".to_string()
    } else {
        format!("{} likes", likes)
    }
}

/// Plain search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub location: String,
    pub country: String,
    pub likes: u64,
    pub popularity: String,
    pub highlight: String,
}

impl From<&PropertyRecord> for SearchHit {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            name: record.name.clone(),
            location: record.prefecture.clone(),
            country: record.country.clone(),
            likes: record.likes,
            popularity: likes_label(record.likes),
            highlight: snippet(&record.description, SEARCH_HIGHLIGHT_CHARS),
        }
    }
}

/// Property suggestion inside a recommend envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyView {
    pub name: String,
    pub location: String,
    pub highlight: String,
}

impl From<&PropertyRecord> for PropertyView {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            name: record.name.clone(),
            location: record.prefecture.clone(),
            highlight: snippet(&record.description, RECOMMEND_HIGHLIGHT_CHARS),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceView {
    pub name: String,
    pub location: String,
    pub experience: String,
    pub guest_rating: String,
}

impl From<&PropertyRecord> for ExperienceView {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            name: record.name.clone(),
            location: record.prefecture.clone(),
            experience: snippet(&record.description, EXPERIENCE_CHARS),
            guest_rating: star_rating(record.likes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub name: String,
    pub location: String,
    pub description: String,
}

impl From<&PropertyRecord> for GalleryItem {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            name: record.name.clone(),
            location: record.prefecture.clone(),
            description: snippet(&record.description, GALLERY_DESCRIPTION_CHARS),
        }
    }
}

/// Popular travel story
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryView {
    pub title: String,
    pub location: String,
    pub popularity: u64,
    pub story: String,
}

impl From<&PropertyRecord> for StoryView {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            title: record.name.clone(),
            location: record.prefecture.clone(),
            popularity: record.likes,
            story: snippet(&record.description, STORY_CHARS),
        }
    }
}

/// Inspiration pick inside a recommend envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspirationItem {
    pub title: String,
    pub location: String,
    pub likes: u64,
    pub why: String,
}

impl From<&PropertyRecord> for InspirationItem {
    fn from(record: &PropertyRecord) -> Self {
        Self {
            title: format!("Popular: {}", record.name),
            location: record.prefecture.clone(),
            likes: record.likes,
            why: "Highly rated by guests".to_string(),
        }
    }
}

/// Project every selected record into view `V`
pub fn project<'a, V>(records: &[&'a PropertyRecord]) -> Vec<V>
where
    V: From<&'a PropertyRecord>,
{
    records.iter().map(|r| V::from(*r)).collect()
}
