use super::Envelope;
use crate::error::{ApiError, AppError};
use crate::models::Team;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Team>>>, ApiError> {
    state
        .query
        .list_teams()
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching teams"))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Team>>, ApiError> {
    state.query.get_team(&id).map(Envelope::one).map_err(|e| {
        let message = match e {
            AppError::NotFound { .. } => "Team not found",
            _ => "Error fetching team",
        };
        e.with_message(message)
    })
}

pub async fn random(
    State(state): State<AppState>,
) -> Result<Json<Envelope<Vec<Team>>>, ApiError> {
    state
        .query
        .random_teams()
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching random teams"))
}
