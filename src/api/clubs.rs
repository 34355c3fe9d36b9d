use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use super::{page_param, AppState, DeletedResponse, PageQuery, SearchRequest};
use crate::domain::{Club, ClubPatch, NewClub, Player};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ClubsResponse {
    pub success: bool,
    pub clubs: Vec<Club>,
    pub total_clubs: i64,
}

#[derive(Debug, Serialize)]
pub struct ClubResponse {
    pub success: bool,
    pub club: Club,
}

#[derive(Debug, Serialize)]
pub struct ClubPlayersResponse {
    pub success: bool,
    pub players: Vec<Player>,
    pub total_players: usize,
    pub current_club: String,
}

pub async fn list_clubs(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<ClubsResponse>, AppError> {
    let page = page_param(query)?;

    let clubs = state.repo.list_clubs(page).await?;
    if clubs.is_empty() {
        return Err(AppError::NotFound(format!("no clubs on page {}", page)));
    }

    Ok(Json(ClubsResponse {
        success: true,
        clubs,
        total_clubs: state.repo.count_clubs().await?,
    }))
}

pub async fn get_club(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ClubResponse>, AppError> {
    let Path(id) = id?;
    let club = state.repo.get_club(id).await?;
    Ok(Json(ClubResponse {
        success: true,
        club,
    }))
}

pub async fn get_club_players(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<ClubPlayersResponse>, AppError> {
    let Path(id) = id?;
    let (club, players) = state.repo.players_for_club(id).await?;

    Ok(Json(ClubPlayersResponse {
        success: true,
        total_players: players.len(),
        players,
        current_club: club.name,
    }))
}

pub async fn create_club(
    State(state): State<AppState>,
    payload: Result<Json<NewClub>, JsonRejection>,
) -> Result<Json<ClubResponse>, AppError> {
    let Json(new_club) = payload?;
    new_club.validate()?;

    let club = state.repo.insert_club(&new_club).await?;
    Ok(Json(ClubResponse {
        success: true,
        club,
    }))
}

pub async fn update_club(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ClubPatch>, JsonRejection>,
) -> Result<Json<ClubResponse>, AppError> {
    let Path(id) = id?;
    let Json(patch) = payload?;
    patch.validate()?;

    let club = state.repo.update_club(id, &patch).await?;
    Ok(Json(ClubResponse {
        success: true,
        club,
    }))
}

pub async fn delete_club(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletedResponse>, AppError> {
    let Path(id) = id?;
    state.repo.delete_club(id).await?;
    Ok(Json(DeletedResponse {
        success: true,
        deleted: id,
    }))
}

pub async fn search_clubs(
    State(state): State<AppState>,
    query: Result<Query<PageQuery>, QueryRejection>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<ClubsResponse>, AppError> {
    let page = page_param(query)?;
    let Json(request) = payload?;

    let (clubs, total_clubs) = state.repo.search_clubs(&request.search_term, page).await?;
    Ok(Json(ClubsResponse {
        success: true,
        clubs,
        total_clubs,
    }))
}
