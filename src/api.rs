use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::demo::{DemoFile, DemoLinks};
use crate::extractor::{
    classify, classify_any, extract_media, ExtractError, MediaInfo, Platform, Target,
    UrlClassification,
};

#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    links: DemoLinks,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let links = DemoLinks::new(config.public_base_url.clone());
        Self {
            config: Arc::new(config),
            links,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/classify", get(classify_url))
        .route("/api/download/:platform", post(download))
        .route("/api/download/:platform/:kind", get(download_kind))
        .route("/demo/:platform/:id/:file", get(demo_file))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
    })
}

async fn classify_url(Query(query): Query<ClassifyQuery>) -> Result<Json<UrlClassification>, ApiError> {
    let url = query.url.ok_or(ExtractError::MissingUrl)?;
    if url.trim().is_empty() {
        return Err(ExtractError::MissingUrl.into());
    }

    let classification = match query.platform.as_deref() {
        Some(platform) => classify(&url, platform.parse::<Platform>()?)?,
        None => classify_any(&url)?,
    };
    Ok(Json(classification))
}

async fn download(
    State(state): State<AppState>,
    Path(platform): Path<String>,
    payload: Result<Json<DownloadRequest>, JsonRejection>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let target = Target::auto(platform.parse::<Platform>()?);
    respond(&state, target, request.url).await
}

async fn download_kind(
    State(state): State<AppState>,
    Path((platform, kind)): Path<(String, String)>,
    Query(query): Query<UrlQuery>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let target = Target::parse(&platform, &kind)?;
    respond(&state, target, query.url).await
}

async fn respond(
    state: &AppState,
    target: Target,
    url: Option<String>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let url = url.ok_or(ExtractError::MissingUrl)?;
    let info = extract_media(&url, target, &state.links)?;

    if state.config.simulate_delay {
        tokio::time::sleep(target.delay()).await;
    }

    tracing::info!(
        %target,
        id = %info.id,
        formats = info.formats.len(),
        "fabricated media info"
    );

    Ok(Json(DownloadResponse {
        success: true,
        data: info,
    }))
}

async fn demo_file(
    State(state): State<AppState>,
    Path((platform, id, file)): Path<(String, String, String)>,
) -> Result<Response, ApiError> {
    let platform = platform.parse::<Platform>()?;
    let source = state.links.file_link(platform, &id, &file);
    let demo = DemoFile::new(&source, &file, Local::now());

    tracing::debug!(platform = platform.slug(), %id, file = %demo.filename, "serving demo file");

    let headers = [
        (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
        (header::CONTENT_DISPOSITION, demo.content_disposition()),
    ];
    Ok((headers, demo.body).into_response())
}

#[derive(Debug, Deserialize)]
pub struct DownloadRequest {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UrlQuery {
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub url: Option<String>,
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub data: MediaInfo,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error("{0}")]
    BadRequest(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Extract(ExtractError::UnsupportedTarget(_)) => StatusCode::NOT_FOUND,
            ApiError::Extract(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        };
        tracing::info!(status = status.as_u16(), error = %self, "request rejected");
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
