use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use super::{page_param, AppState, DeletedResponse, PageQuery, SearchRequest};
use crate::domain::{NewPlayer, Player, PlayerPatch};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct PlayersResponse {
    pub success: bool,
    pub players: Vec<Player>,
    pub total_players: i64,
}

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub success: bool,
    pub player: Player,
}

pub async fn list_players(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<PlayersResponse>, AppError> {
    let page = page_param(query)?;

    let players = state.repo.list_players(page).await?;
    if players.is_empty() {
        return Err(AppError::NotFound(format!("no players on page {}", page)));
    }

    Ok(Json(PlayersResponse {
        success: true,
        players,
        total_players: state.repo.count_players().await?,
    }))
}

pub async fn get_player(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<PlayerResponse>, AppError> {
    let Path(id) = id?;
    let player = state.repo.get_player(id).await?;
    Ok(Json(PlayerResponse {
        success: true,
        player,
    }))
}

pub async fn create_player(
    State(state): State<AppState>,
    payload: Result<Json<NewPlayer>, JsonRejection>,
) -> Result<Json<PlayerResponse>, AppError> {
    let Json(new_player) = payload?;
    new_player.validate()?;

    let player = state.repo.insert_player(&new_player).await?;
    Ok(Json(PlayerResponse {
        success: true,
        player,
    }))
}

pub async fn update_player(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<PlayerPatch>, JsonRejection>,
) -> Result<Json<PlayerResponse>, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    patch.validate()?;

    let player = state.repo.update_player(id, &patch).await?;
    Ok(Json(PlayerResponse {
        success: true,
        player,
    }))
}

pub async fn delete_player(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let Path(id) = id?;
    state.repo.delete_player(id).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}

pub async fn search_players(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<PlayersResponse>, AppError> {
    let page = page_param(query)?;
    let Json(request) = payload?;

    let (players, total_players) = state
        .repo
        .search_players(&request.search_term, page)
        .await?;
    Ok(Json(PlayersResponse {
        success: true,
        players,
        total_players,
    }))
}
