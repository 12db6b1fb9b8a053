use crate::sampler::{draw, Sampler};
use crate::{PropertyRecord, Result};

/// How a filtered set is ordered before truncation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankStrategy {
    /// Keep catalog order, take the first N
    CatalogOrder,
    /// Most liked first; ties keep catalog order
    Popularity,
    /// Fresh uniform sample of N, independent of likes
    Shuffle,
}

impl RankStrategy {
    pub fn apply<'a>(
        self,
        mut records: Vec<&'a PropertyRecord>,
        limit: usize,
        sampler: &dyn Sampler,
    ) -> Result<Vec<&'a PropertyRecord>> {
        match self {
            RankStrategy::CatalogOrder => {
                records.truncate(limit);
                Ok(records)
            }
            RankStrategy::Popularity => {
                // sort_by is stable
                records.sort_by(|a, b| b.likes.cmp(&a.likes));
                records.truncate(limit);
                Ok(records)
            }
            RankStrategy::Shuffle => draw(sampler, &records, limit),
        }
    }
}
