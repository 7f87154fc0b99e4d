use super::Envelope;
use crate::error::ApiError;
use crate::models::Player;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

type PlayerList = Result<Json<Envelope<Vec<Player>>>, ApiError>;

pub async fn list(State(state): State<AppState>) -> PlayerList {
    state
        .query
        .list_players()
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching players"))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Player>>, ApiError> {
    state.query.get_player(&id).map(Envelope::one).map_err(|e| {
        let message = match e {
            crate::error::AppError::NotFound { .. } => "Player not found",
            _ => "Error fetching player",
        };
        e.with_message(message)
    })
}

pub async fn search(State(state): State<AppState>, Path(name): Path<String>) -> PlayerList {
    state
        .query
        .search_players(&name)
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error searching players"))
}

pub async fn top(State(state): State<AppState>) -> PlayerList {
    state
        .query
        .top_players()
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching top players"))
}
