//! # Concierge
//!
//! Webhook backend for a travel voice agent. Free-text queries and optional
//! hints (destination, style, theme, limit) are matched against an in-memory
//! catalog of properties; the matches are ranked or sampled and returned as
//! small JSON payloads the agent can read aloud.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! concierge --data-file data/hafh_stories.json --http-port 5001
//! curl -X POST localhost:5001/recommend -d '{"query": "where to stay", "destination": "Kyoto"}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use concierge::prelude::*;
//! use std::sync::Arc;
//!
//! let engine = Engine::new(Arc::new(Catalog::builtin()));
//! let response = engine
//!     .search(&SearchRequest { query: None, destination: Some("nagano".to_string()) })
//!     .unwrap();
//! assert_eq!(response.properties[0].name, "Mountain Retreat Nagano");
//! ```
//!
//! ## Crate Structure
//!
//! - `concierge-core` - Catalog, facet matching, ranking, sampling and the query engine
//! - `concierge-api` - actix-web routes, health and landing pages

// Re-export core types
pub use concierge_core::{
    Catalog, CatalogOrigin, PropertyRecord,
    Engine, EngineConfig, EmptyFacetPolicy,
    Facets, QueryMatch, RankStrategy, Pipeline, Selection, Intent,
    Sampler, RandomSampler, SeededSampler,
    SearchRequest, RecommendRequest, ExperiencesRequest, InspirationRequest, GalleryRequest,
    Error, Result,
};

// Re-export API
pub use concierge_api::RestApi;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Catalog, PropertyRecord,
        Engine, EngineConfig, EmptyFacetPolicy,
        Sampler, RandomSampler, SeededSampler,
        SearchRequest, RecommendRequest, ExperiencesRequest, InspirationRequest, GalleryRequest,
        Error, Result,
        RestApi,
    };
}
