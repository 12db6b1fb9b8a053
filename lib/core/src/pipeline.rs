//! filter → fallback → rank/limit, shared by every response shape.

use crate::filter::{self, FacetFilter, Facets, QueryMatch};
use crate::rank::RankStrategy;
use crate::sampler::{draw, Sampler};
use crate::{Catalog, PropertyRecord, Result};
use tracing::debug;

/// What a request that supplies no facets at all selects
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyFacetPolicy {
    /// The whole catalog, ranked as usual
    #[default]
    SelectAll,
    /// A random sample, exactly as if the facets had matched nothing
    Sample,
}

/// One configured selection: how to match the query facet, how to rank,
/// and how many records to keep.
#[derive(Debug, Clone, Copy)]
pub struct Pipeline {
    pub query_match: QueryMatch,
    pub rank: RankStrategy,
    pub limit: usize,
    pub empty_facets: EmptyFacetPolicy,
}

/// Records picked by a [`Pipeline`] run
#[derive(Debug, Clone)]
pub struct Selection<'a> {
    pub records: Vec<&'a PropertyRecord>,
    /// Records that passed the filter before ranking
    pub matched: usize,
    /// True when the records are a random sample of the full catalog
    pub fell_back: bool,
}

impl Selection<'_> {
    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Pipeline {
    pub fn new(rank: RankStrategy, limit: usize) -> Self {
        Self {
            query_match: QueryMatch::default(),
            rank,
            limit,
            empty_facets: EmptyFacetPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_query_match(mut self, query_match: QueryMatch) -> Self {
        self.query_match = query_match;
        self
    }

    #[must_use]
    pub fn with_empty_facets(mut self, policy: EmptyFacetPolicy) -> Self {
        self.empty_facets = policy;
        self
    }

    pub fn run<'a>(
        &self,
        catalog: &'a Catalog,
        facets: &Facets,
        sampler: &dyn Sampler,
    ) -> Result<Selection<'a>> {
        let limit = self.limit.min(catalog.len());

        let (pool, matched, fell_back) = if facets.is_empty() {
            match self.empty_facets {
                EmptyFacetPolicy::SelectAll => {
                    let everything: Vec<&PropertyRecord> = catalog.iter().collect();
                    let total = everything.len();
                    (everything, total, false)
                }
                EmptyFacetPolicy::Sample => (Self::fallback(catalog, limit, sampler)?, 0, true),
            }
        } else {
            let hits = filter::apply(catalog, &FacetFilter::new(facets, self.query_match));
            if hits.is_empty() {
                debug!("No records matched {:?}; sampling {} at random", facets, limit);
                (Self::fallback(catalog, limit, sampler)?, 0, true)
            } else {
                let total = hits.len();
                (hits, total, false)
            }
        };

        let records = self.rank.apply(pool, limit, sampler)?;
        Ok(Selection {
            records,
            matched,
            fell_back,
        })
    }

    fn fallback<'a>(
        catalog: &'a Catalog,
        limit: usize,
        sampler: &dyn Sampler,
    ) -> Result<Vec<&'a PropertyRecord>> {
        let everything: Vec<&PropertyRecord> = catalog.iter().collect();
        draw(sampler, &everything, limit)
    }
}
