//! Query resolution engine.
//!
//! Each operation is a thin configuration of the shared [`Pipeline`]: which
//! facets it reads, how the query facet matches, how results are ranked, how
//! many are kept, and which view they are projected into.

use crate::filter::{Facets, QueryMatch};
use crate::intent::{self, Intent};
use crate::pipeline::{EmptyFacetPolicy, Pipeline, Selection};
use crate::rank::RankStrategy;
use crate::request::{ExperiencesRequest, GalleryRequest, InspirationRequest, RecommendRequest, SearchRequest};
use crate::response::{
    ExperiencesResponse, GalleryResponse, InspirationResponse, RecommendResponse, Recommendations,
    SearchResponse,
};
use crate::sampler::{RandomSampler, Sampler};
use crate::view::{self, ExperienceView, GalleryItem, InspirationItem, PropertyView, SearchHit, StoryView};
use crate::{Catalog, Result};
use std::sync::Arc;
use tracing::info;

/// Default result sizes per operation
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub empty_facets: EmptyFacetPolicy,
    pub search_limit: usize,
    /// Per detected intent
    pub recommend_limit: usize,
    pub experience_limit: usize,
    pub inspiration_limit: usize,
    pub gallery_count: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            empty_facets: EmptyFacetPolicy::SelectAll,
            search_limit: 5,
            recommend_limit: 3,
            experience_limit: 3,
            inspiration_limit: 5,
            gallery_count: 3,
        }
    }
}

const FALLBACK_NOTE: &str = " (no exact matches, showing other stays)";

/// Trimmed, non-empty request text
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn with_fallback_note(mut text: String, selection: &Selection<'_>) -> String {
    if selection.fell_back {
        text.push_str(FALLBACK_NOTE);
    }
    text
}

pub struct Engine {
    catalog: Arc<Catalog>,
    sampler: Arc<dyn Sampler>,
    config: EngineConfig,
}

impl Engine {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            sampler: Arc::new(RandomSampler),
            config: EngineConfig::default(),
        }
    }

    #[must_use]
    pub fn with_sampler(mut self, sampler: Arc<dyn Sampler>) -> Self {
        self.sampler = sampler;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn pipeline(&self, rank: RankStrategy, limit: usize) -> Pipeline {
        Pipeline::new(rank, limit).with_empty_facets(self.config.empty_facets)
    }

    fn select(&self, pipeline: Pipeline, facets: &Facets) -> Result<Selection<'_>> {
        pipeline.run(&self.catalog, facets, self.sampler.as_ref())
    }

    /// Keyword search in catalog order
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        let query = present(&request.query);
        let destination = present(&request.destination);
        info!("SEARCH - query: {:?}, destination: {:?}", query, destination);

        let facets = Facets::new().with_query(query).with_destination(destination);
        let pipeline = self
            .pipeline(RankStrategy::CatalogOrder, self.config.search_limit)
            .with_query_match(QueryMatch::Substring);
        let selection = self.select(pipeline, &facets)?;

        let understanding = match (query, destination) {
            (Some(q), _) => format!("Searching for: {}", q),
            (None, Some(d)) => format!("Showing properties in {}", d),
            (None, None) => "Showing popular properties".to_string(),
        };
        let properties: Vec<SearchHit> = view::project(&selection.records);
        info!("Found {} properties ({} matched)", properties.len(), selection.matched);

        Ok(SearchResponse {
            success: true,
            understanding: with_fallback_note(understanding, &selection),
            count: properties.len(),
            properties,
        })
    }

    /// Highest-rated stays, optionally narrowed by theme or prefecture
    pub fn experiences(&self, request: &ExperiencesRequest) -> Result<ExperiencesResponse> {
        let theme = present(&request.theme);
        let prefecture = present(&request.prefecture).or(present(&request.destination));
        info!("EXPERIENCES - theme: {:?}, prefecture: {:?}", theme, prefecture);

        let facets = Facets::new().with_description(theme).with_destination(prefecture);
        let pipeline = self.pipeline(RankStrategy::Popularity, self.config.experience_limit);
        let selection = self.select(pipeline, &facets)?;

        let mut summary = "Top guest experiences".to_string();
        if let Some(p) = prefecture {
            summary.push_str(&format!(" in {}", p));
        }
        if let Some(t) = theme {
            summary.push_str(&format!(" about {}", t));
        }
        let experiences: Vec<ExperienceView> = view::project(&selection.records);
        info!("Returning {} experiences", experiences.len());

        Ok(ExperiencesResponse {
            success: true,
            summary: with_fallback_note(summary, &selection),
            experiences,
        })
    }

    /// Most-liked stays, optionally for one destination
    pub fn inspiration(&self, request: &InspirationRequest) -> Result<InspirationResponse> {
        let destination = present(&request.destination);
        let limit = request.limit.unwrap_or(self.config.inspiration_limit);
        info!("INSPIRATION - destination: {:?}, limit: {}", destination, limit);

        let facets = Facets::new().with_destination(destination);
        let selection = self.select(self.pipeline(RankStrategy::Popularity, limit), &facets)?;

        let summary = match destination {
            Some(d) => format!("Most popular stays in {}", d),
            None => "Most popular stays".to_string(),
        };
        let stories: Vec<StoryView> = view::project(&selection.records);
        info!("Returning {} stories", stories.len());

        Ok(InspirationResponse {
            success: true,
            summary: with_fallback_note(summary, &selection),
            count: stories.len(),
            stories,
        })
    }

    /// Random showcase, optionally matching a style
    pub fn gallery(&self, request: &GalleryRequest) -> Result<GalleryResponse> {
        let style = present(&request.style);
        let count = request.count.unwrap_or(self.config.gallery_count);
        info!("GALLERY - style: {:?}, count: {}", style, count);

        let facets = Facets::new().with_description(style);
        let selection = self.select(self.pipeline(RankStrategy::Shuffle, count), &facets)?;

        let summary = match style {
            Some(s) => format!("Visual highlights with a {} feel", s),
            None => "Visual highlights".to_string(),
        };
        let gallery: Vec<GalleryItem> = view::project(&selection.records);
        info!("Returning {} gallery items", gallery.len());

        Ok(GalleryResponse {
            success: true,
            summary: with_fallback_note(summary, &selection),
            gallery,
        })
    }

    /// Composite call: detect intents from the query and run each one's pipeline
    pub fn recommend(&self, request: &RecommendRequest) -> Result<RecommendResponse> {
        let query = present(&request.query);
        let destination = present(&request.destination);
        let intents = intent::detect(query.unwrap_or_default());
        info!(
            "RECOMMEND - query: {:?}, destination: {:?}, intents: {:?}",
            query, destination, intents
        );

        let limit = self.config.recommend_limit;
        let by_destination = Facets::new().with_destination(destination);
        let mut recommendations = Recommendations::default();

        for intent in &intents {
            match intent {
                Intent::Property => {
                    let facets = by_destination.clone().with_query(query);
                    let pipeline = self
                        .pipeline(RankStrategy::CatalogOrder, limit)
                        .with_query_match(QueryMatch::Tokens);
                    let selection = self.select(pipeline, &facets)?;
                    recommendations.properties = Some(view::project::<PropertyView>(&selection.records));
                }
                Intent::Experience => {
                    // Without a destination there is nothing to rank against
                    let rank = if destination.is_some() {
                        RankStrategy::Popularity
                    } else {
                        RankStrategy::Shuffle
                    };
                    let selection = self.select(self.pipeline(rank, limit), &by_destination)?;
                    recommendations.experiences = Some(view::project::<ExperienceView>(&selection.records));
                }
                Intent::Inspiration => {
                    let pipeline = self.pipeline(RankStrategy::Popularity, limit);
                    let selection = self.select(pipeline, &by_destination)?;
                    recommendations.inspiration = Some(view::project::<InspirationItem>(&selection.records));
                }
            }
        }

        let mut understanding = intent::understanding(&intents);
        if let Some(d) = destination {
            understanding.push_str(&format!(" in {}", d));
        }

        info!(
            "Returning {} properties, {} experiences, {} inspiration",
            recommendations.properties.as_ref().map_or(0, Vec::len),
            recommendations.experiences.as_ref().map_or(0, Vec::len),
            recommendations.inspiration.as_ref().map_or(0, Vec::len)
        );

        Ok(RecommendResponse {
            success: true,
            understanding,
            recommendations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, PropertyRecord, SeededSampler};
    use pretty_assertions::assert_eq;

    /// Deterministic sampler: always the first `amount` indices
    struct FirstN;

    impl Sampler for FirstN {
        fn sample(&self, population: usize, amount: usize) -> Vec<usize> {
            (0..amount.min(population)).collect()
        }
    }

    struct OutOfRange;

    impl Sampler for OutOfRange {
        fn sample(&self, population: usize, _amount: usize) -> Vec<usize> {
            vec![population + 1]
        }
    }

    fn create_test_catalog() -> Arc<Catalog> {
        Arc::new(Catalog::from_records(vec![
            PropertyRecord::new("Mountain Retreat Nagano", "Nagano", 45)
                .with_description("Peaceful mountain property with stunning views. Guests love the serene atmosphere."),
            PropertyRecord::new("Kyoto Traditional Guesthouse", "Kyoto", 38)
                .with_description("Authentic Japanese experience in historic Kyoto. Traditional architecture and warm hospitality."),
            PropertyRecord::new("Osaka Canal House", "Osaka", 51)
                .with_description("Lively neighbourhood near the canal, perfect for food lovers."),
            PropertyRecord::new("Hakone Onsen Ryokan", "Kanagawa", 12)
                .with_description("Private onsen baths and kaiseki dinners."),
            PropertyRecord::new("Kyoto Machiya", "Kyoto", 20)
                .with_description("Restored townhouse with a small garden."),
        ]))
    }

    fn create_test_engine() -> Engine {
        Engine::new(create_test_catalog()).with_sampler(Arc::new(FirstN))
    }

    #[test]
    fn test_search_destination() {
        let engine = create_test_engine();
        let response = engine
            .search(&SearchRequest {
                query: None,
                destination: Some("kyoto".to_string()),
            })
            .unwrap();
        let names: Vec<&str> = response.properties.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Kyoto Traditional Guesthouse", "Kyoto Machiya"]);
        assert_eq!(response.count, 2);
        assert_eq!(response.understanding, "Showing properties in kyoto");
    }

    #[test]
    fn test_search_without_facets_lists_catalog_order() {
        let engine = create_test_engine();
        let response = engine.search(&SearchRequest::default()).unwrap();
        assert_eq!(response.properties.len(), 5);
        assert_eq!(response.properties[0].name, "Mountain Retreat Nagano");
        assert_eq!(response.understanding, "Showing popular properties");
    }

    #[test]
    fn test_search_fallback_is_never_empty() {
        let engine = Engine::new(create_test_catalog()).with_sampler(Arc::new(SeededSampler::new(11)));
        let response = engine
            .search(&SearchRequest {
                query: Some("snowboarding".to_string()),
                destination: None,
            })
            .unwrap();
        assert!(response.success);
        assert_eq!(response.properties.len(), 5);
        assert!(response.understanding.starts_with("Searching for: snowboarding"));
        assert!(response.understanding.ends_with(FALLBACK_NOTE));
    }

    #[test]
    fn test_search_sample_policy_without_facets() {
        let config = EngineConfig {
            empty_facets: EmptyFacetPolicy::Sample,
            search_limit: 2,
            ..EngineConfig::default()
        };
        let engine = create_test_engine().with_config(config);
        let response = engine.search(&SearchRequest::default()).unwrap();
        assert_eq!(response.count, 2);
        assert!(response.understanding.ends_with(FALLBACK_NOTE));
    }

    #[test]
    fn test_experiences_top_rated() {
        let engine = create_test_engine();
        let response = engine.experiences(&ExperiencesRequest::default()).unwrap();
        let names: Vec<&str> = response.experiences.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Osaka Canal House", "Mountain Retreat Nagano", "Kyoto Traditional Guesthouse"]);
        assert_eq!(response.experiences[0].guest_rating, "★★★★★");
    }

    #[test]
    fn test_experiences_theme_filters_description() {
        let engine = create_test_engine();
        let response = engine
            .experiences(&ExperiencesRequest {
                theme: Some("Onsen".to_string()),
                prefecture: None,
                destination: None,
            })
            .unwrap();
        assert_eq!(response.experiences.len(), 1);
        assert_eq!(response.experiences[0].name, "Hakone Onsen Ryokan");
        assert_eq!(response.summary, "Top guest experiences about Onsen");
    }

    #[test]
    fn test_experiences_prefecture_over_destination() {
        let engine = create_test_engine();
        let request: ExperiencesRequest = crate::parse_body(
            br#"{"theme": "onsen", "prefecture": "Kyoto", "destination": "Nagano"}"#,
        );
        let response = engine.experiences(&request).unwrap();
        let names: Vec<&str> = response.experiences.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Kyoto Traditional Guesthouse", "Kyoto Machiya", "Hakone Onsen Ryokan"]);
        assert_eq!(response.summary, "Top guest experiences in Kyoto about onsen");

        let request: ExperiencesRequest = crate::parse_body(br#"{"destination": "Nagano"}"#);
        let response = engine.experiences(&request).unwrap();
        assert_eq!(response.experiences.len(), 1);
        assert_eq!(response.experiences[0].name, "Mountain Retreat Nagano");
    }

    #[test]
    fn test_inspiration_limit_one() {
        let engine = create_test_engine();
        let response = engine
            .inspiration(&InspirationRequest {
                destination: None,
                limit: Some(1),
            })
            .unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.stories[0].title, "Osaka Canal House");
        assert_eq!(response.stories[0].popularity, 51);
    }

    #[test]
    fn test_inspiration_limit_clamped_to_catalog() {
        let engine = create_test_engine();
        let response = engine
            .inspiration(&InspirationRequest {
                destination: None,
                limit: Some(500),
            })
            .unwrap();
        assert_eq!(response.count, 5);
        assert!(response.stories.windows(2).all(|w| w[0].popularity >= w[1].popularity));
    }

    #[test]
    fn test_gallery_count_and_style() {
        let engine = create_test_engine();
        let response = engine
            .gallery(&GalleryRequest {
                style: None,
                count: Some(2),
            })
            .unwrap();
        assert_eq!(response.gallery.len(), 2);

        let response = engine
            .gallery(&GalleryRequest {
                style: Some("garden".to_string()),
                count: None,
            })
            .unwrap();
        assert_eq!(response.gallery.len(), 1);
        assert_eq!(response.gallery[0].name, "Kyoto Machiya");
    }

    #[test]
    fn test_recommend_default_intents() {
        let engine = create_test_engine();
        let response = engine.recommend(&RecommendRequest::default()).unwrap();
        assert_eq!(response.understanding, "Looking for: properties, travel inspiration");
        assert!(response.recommendations.properties.is_some());
        assert!(response.recommendations.experiences.is_none());

        let inspiration = response.recommendations.inspiration.unwrap();
        assert_eq!(inspiration.len(), 3);
        assert_eq!(inspiration[0].title, "Popular: Osaka Canal House");
    }

    #[test]
    fn test_recommend_experience_only() {
        let engine = create_test_engine();
        let response = engine
            .recommend(&RecommendRequest {
                query: Some("Tell me about guest reviews in Kyoto".to_string()),
                destination: None,
            })
            .unwrap();
        assert_eq!(response.understanding, "Looking for: guest experiences");
        assert!(response.recommendations.properties.is_none());
        assert!(response.recommendations.inspiration.is_none());
        assert_eq!(response.recommendations.experiences.unwrap().len(), 3);

        let body = serde_json::to_value(
            engine
                .recommend(&RecommendRequest {
                    query: Some("what do guests say".to_string()),
                    destination: None,
                })
                .unwrap(),
        )
        .unwrap();
        let keys: Vec<&String> = body["recommendations"].as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["experiences"]);
    }

    #[test]
    fn test_recommend_property_tokens_and_destination() {
        let engine = create_test_engine();
        let response = engine
            .recommend(&RecommendRequest {
                query: Some("Where can I stay near the mountain?".to_string()),
                destination: Some("Osaka".to_string()),
            })
            .unwrap();
        assert_eq!(response.understanding, "Looking for: properties in Osaka");
        let names: Vec<String> = response
            .recommendations
            .properties
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        // destination OR any token longer than three characters
        assert_eq!(names, vec!["Mountain Retreat Nagano", "Osaka Canal House"]);
    }

    #[test]
    fn test_broken_sampler_is_internal_failure() {
        let engine = Engine::new(create_test_catalog()).with_sampler(Arc::new(OutOfRange));
        let result = engine.gallery(&GalleryRequest::default());
        assert!(matches!(result, Err(Error::InvalidSample { .. })));
    }
}
