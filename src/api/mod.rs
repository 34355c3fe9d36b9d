pub mod clubs;
pub mod health;
pub mod players;

use crate::db::Repository;
use crate::error::AppError;
use axum::extract::rejection::QueryRejection;
use axum::extract::Query;
use axum::http::{header, Method, Uri};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
}

impl AppState {
    pub fn new(repo: Arc<Repository>) -> Self {
        Self { repo }
    }
}

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .route("/clubs", get(clubs::list_clubs).post(clubs::create_club))
        .route("/clubs/search", post(clubs::search_clubs))
        .route(
            "/clubs/:id",
            get(clubs::get_club)
                .patch(clubs::update_club)
                .delete(clubs::delete_club),
        )
        .route("/clubs/:id/players", get(clubs::get_club_players))
        .route(
            "/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/players/search", post(players::search_players))
        .route(
            "/players/:id",
            get(players::get_player)
                .patch(players::update_player)
                .delete(players::delete_player),
        )
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn not_found() -> AppError {
    AppError::NotFound("no route".into())
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{} {}", method, uri.path()))
}

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
}

/// 1-based page from the query string; defaults to 1, rejects 0.
pub(crate) fn page_param(query: Result<Query<PageQuery>, QueryRejection>) -> Result<u32, AppError> {
    let Query(params) = query?;
    match params.page {
        Some(0) => Err(AppError::BadRequest("page must be >= 1".into())),
        Some(page) => Ok(page),
        None => Ok(1),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub search_term: String,
}

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i64,
}
