//! # Concierge Core
//!
//! Core library for the concierge webhook.
//!
//! This crate holds everything with decision logic in it:
//!
//! - [`Catalog`] - Immutable, ordered collection of [`PropertyRecord`]s loaded once at startup
//! - [`Facets`] / [`FacetFilter`] - OR-combined destination, style/theme and free-text matching
//! - [`Pipeline`] - filter → fallback → rank/limit, shared by every response shape
//! - [`Sampler`] - Injectable random source for fallback and showcase sampling
//! - [`Engine`] - The five operations (search, experiences, inspiration, gallery, recommend)
//!
//! ## Example
//!
//! ```rust
//! use concierge_core::{Catalog, Engine, InspirationRequest};
//! use std::sync::Arc;
//!
//! let engine = Engine::new(Arc::new(Catalog::builtin()));
//! let response = engine
//!     .inspiration(&InspirationRequest { destination: None, limit: Some(1) })
//!     .unwrap();
//! assert_eq!(response.stories[0].title, "Mountain Retreat Nagano");
//! ```

pub mod catalog;
pub mod engine;
pub mod error;
pub mod filter;
pub mod intent;
pub mod pipeline;
pub mod rank;
pub mod record;
pub mod request;
pub mod response;
pub mod sampler;
pub mod view;

pub use catalog::{Catalog, CatalogOrigin};
pub use engine::{Engine, EngineConfig};
pub use error::{Error, Result};
pub use filter::{FacetFilter, Facets, Filter, QueryMatch};
pub use intent::Intent;
pub use pipeline::{EmptyFacetPolicy, Pipeline, Selection};
pub use rank::RankStrategy;
pub use record::PropertyRecord;
pub use request::{
    parse_body, ExperiencesRequest, GalleryRequest, InspirationRequest, RecommendRequest, SearchRequest,
};
pub use response::{
    ErrorResponse, ExperiencesResponse, GalleryResponse, InspirationResponse, RecommendResponse,
    Recommendations, SearchResponse,
};
pub use sampler::{RandomSampler, Sampler, SeededSampler};
pub use view::{ExperienceView, GalleryItem, InspirationItem, PropertyView, SearchHit, StoryView};
