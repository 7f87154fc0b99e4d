use super::Envelope;
use crate::error::{ApiError, AppError};
use crate::models::Game;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};

type GameList = Result<Json<Envelope<Vec<Game>>>, ApiError>;

pub async fn list(State(state): State<AppState>) -> GameList {
    state
        .query
        .list_games()
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching games"))
}

pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Game>>, ApiError> {
    state.query.get_game(&id).map(Envelope::one).map_err(|e| {
        let message = match e {
            AppError::NotFound { .. } => "Game not found",
            _ => "Error fetching game",
        };
        e.with_message(message)
    })
}

pub async fn latest(State(state): State<AppState>) -> GameList {
    state
        .query
        .latest_games()
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching latest games"))
}

pub async fn on_date(State(state): State<AppState>, Path(date): Path<String>) -> GameList {
    state
        .query
        .games_on_date(&date)
        .map(Envelope::list)
        .map_err(|e| e.with_message("Error fetching games by date"))
}
