// src/web/team_handlers.rs
use crate::{
    error::{AppError, AppResult},
    models::{
        player::Player,
        team::{MatchResult, NewTeam, Team, TeamPatch, TeamSummary},
    },
    state::AppState,
    web::mw_auth::CurrentUser,
};
use axum::{
    extract::{Extension, Json, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
pub struct FiltroEsporte {
    pub sport: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct ResultadoPayload {
    pub resultado: MatchResult,
}

// GET /api/teams?sport=
pub async fn list_teams(
    State(state): State<AppState>,
    Query(filtro): Query<FiltroEsporte>,
) -> Json<Vec<TeamSummary>> {
    Json(state.data.team_summaries(filtro.sport.as_deref()).await)
}

// GET /api/teams/{id}
pub async fn get_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<TeamSummary>> {
    let team = state
        .data
        .find_team(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("time {id}")))?;
    let players_count = state.data.get_players_by_team(&id).await.len();
    Ok(Json(TeamSummary::new(team, players_count)))
}

// POST /api/teams
pub async fn create_team(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(mut novo): Json<NewTeam>,
) -> AppResult<(StatusCode, Json<Team>)> {
    novo.professor_id = Some(user.id);
    let team = state.data.add_team(novo).await?;
    Ok((StatusCode::CREATED, Json(team)))
}

// PUT /api/teams/{id}
pub async fn update_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TeamPatch>,
) -> AppResult<Json<Team>> {
    Ok(Json(state.data.update_team(&id, patch).await?))
}

// DELETE /api/teams/{id}
pub async fn delete_team(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.data.delete_team(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// POST /api/teams/{id}/resultado
pub async fn record_result(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<ResultadoPayload>,
) -> AppResult<Json<Team>> {
    Ok(Json(state.data.record_team_result(&id, payload.resultado).await?))
}

// GET /api/teams/{id}/players
pub async fn team_players(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<Player>>> {
    if state.data.find_team(&id).await.is_none() {
        return Err(AppError::NotFound(format!("time {id}")));
    }
    Ok(Json(state.data.get_players_by_team(&id).await))
}
