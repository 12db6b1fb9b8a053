use crate::pages;
use actix_cors::Cors;
use actix_web::http::{header, StatusCode};
use actix_web::{middleware, web, App, HttpResponse, HttpServer, ResponseError};
use futures_util::StreamExt;
use concierge_core::{
    parse_body, Engine, ErrorResponse, ExperiencesRequest, GalleryRequest, InspirationRequest,
    RecommendRequest, SearchRequest,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

/// Failures surfaced to the caller as `{success: false, error}`
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Engine(#[from] concierge_core::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse::new(self.to_string()))
    }
}

fn failed(e: concierge_core::Error) -> ApiError {
    error!("Request failed: {}", e);
    ApiError::from(e)
}

type ApiResult = Result<HttpResponse, ApiError>;

/// Webhook bodies above this size are treated as empty requests
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Collect the request body. Oversized or broken payloads yield an empty
/// body, which parses to the default request.
async fn read_body(mut payload: web::Payload) -> Vec<u8> {
    let mut body = Vec::new();
    while let Some(chunk) = payload.next().await {
        match chunk {
            Ok(chunk) if body.len() + chunk.len() <= MAX_BODY_BYTES => body.extend_from_slice(&chunk),
            Ok(_) => {
                debug!("Request body over {} bytes; treating it as empty", MAX_BODY_BYTES);
                return Vec::new();
            }
            Err(e) => {
                debug!("Could not read request body: {}", e);
                return Vec::new();
            }
        }
    }
    body
}

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<Engine>, host: &str, port: u16) -> std::io::Result<()> {
        let engine = web::Data::from(engine);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .wrap(middleware::Logger::default())
                .app_data(engine.clone())
                .configure(RestApi::configure)
        })
        .bind((host, port))?
        .run()
        .await
    }

    /// Register every route. Expects `web::Data<Engine>` in the app data.
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/", web::get().to(index))
            .route("/details", web::get().to(details))
            .route("/favicon.ico", web::get().to(favicon))
            .route("/health", web::get().to(health))
            .route("/search", web::post().to(search))
            .route("/recommend", web::post().to(recommend))
            .route("/experiences", web::post().to(experiences))
            .route("/gallery", web::post().to(gallery))
            .route("/inspiration", web::post().to(inspiration));
    }
}

async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, "public, max-age=300"))
        .content_type("text/html; charset=utf-8")
        .body(pages::LANDING_PAGE)
}

async fn details(engine: web::Data<Engine>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(pages::details_page(engine.catalog()))
}

async fn favicon() -> HttpResponse {
    HttpResponse::NoContent().finish()
}

async fn health(engine: web::Data<Engine>) -> HttpResponse {
    let catalog = engine.catalog();
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "properties_loaded": catalog.len(),
        "catalog_source": catalog.origin().to_string(),
        "endpoints": pages::endpoint_summary(),
    }))
}

async fn search(engine: web::Data<Engine>, payload: web::Payload) -> ApiResult {
    let request: SearchRequest = parse_body(&read_body(payload).await);
    let response = engine.search(&request).map_err(failed)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn recommend(engine: web::Data<Engine>, payload: web::Payload) -> ApiResult {
    let request: RecommendRequest = parse_body(&read_body(payload).await);
    let response = engine.recommend(&request).map_err(failed)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn experiences(engine: web::Data<Engine>, payload: web::Payload) -> ApiResult {
    let request: ExperiencesRequest = parse_body(&read_body(payload).await);
    let response = engine.experiences(&request).map_err(failed)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn gallery(engine: web::Data<Engine>, payload: web::Payload) -> ApiResult {
    let request: GalleryRequest = parse_body(&read_body(payload).await);
    let response = engine.gallery(&request).map_err(failed)?;
    Ok(HttpResponse::Ok().json(response))
}

async fn inspiration(engine: web::Data<Engine>, payload: web::Payload) -> ApiResult {
    let request: InspirationRequest = parse_body(&read_body(payload).await);
    let response = engine.inspiration(&request).map_err(failed)?;
    Ok(HttpResponse::Ok().json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use concierge_core::{Catalog, Sampler};

    struct OutOfRange;

    impl Sampler for OutOfRange {
        fn sample(&self, population: usize, _amount: usize) -> Vec<usize> {
            vec![population]
        }
    }

    #[actix_web::test]
    async fn test_favicon_no_content() {
        let engine = web::Data::new(Engine::new(Arc::new(Catalog::builtin())));
        let app = test::init_service(App::new().app_data(engine).configure(RestApi::configure)).await;

        let req = test::TestRequest::get().uri("/favicon.ico").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn test_landing_page_cached() {
        let engine = web::Data::new(Engine::new(Arc::new(Catalog::builtin())));
        let app = test::init_service(App::new().app_data(engine).configure(RestApi::configure)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get(header::CACHE_CONTROL).unwrap(),
            "public, max-age=300"
        );
    }

    #[actix_web::test]
    async fn test_internal_failure_is_500_json() {
        let engine = Engine::new(Arc::new(Catalog::builtin())).with_sampler(Arc::new(OutOfRange));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(engine))
                .configure(RestApi::configure),
        )
        .await;

        let req = test::TestRequest::post().uri("/gallery").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: ErrorResponse = test::read_body_json(resp).await;
        assert!(!body.success);
        assert!(body.error.contains("Sampler returned index 2"));
    }

    #[actix_web::test]
    async fn test_oversized_body_is_empty_request() {
        let engine = web::Data::new(Engine::new(Arc::new(Catalog::builtin())));
        let app = test::init_service(App::new().app_data(engine).configure(RestApi::configure)).await;

        let padding = "x".repeat(300 * 1024);
        let payload = format!(r#"{{"query": "onsen", "padding": "{}"}}"#, padding);
        let req = test::TestRequest::post()
            .uri("/search")
            .insert_header((header::CONTENT_TYPE, "application/json"))
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: concierge_core::SearchResponse = test::read_body_json(resp).await;
        assert_eq!(body.understanding, "Showing popular properties");
        assert_eq!(body.count, 5);
    }

    #[actix_web::test]
    async fn test_small_body_within_limit_is_parsed() {
        let engine = web::Data::new(Engine::new(Arc::new(Catalog::builtin())));
        let app = test::init_service(App::new().app_data(engine).configure(RestApi::configure)).await;

        let req = test::TestRequest::post()
            .uri("/search")
            .set_payload(r#"{"destination": "nagano"}"#)
            .to_request();
        let body: concierge_core::SearchResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.count, 1);
        assert_eq!(body.properties[0].name, "Mountain Retreat Nagano");
    }
}
