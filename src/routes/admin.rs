use super::Envelope;
use crate::error::ApiError;
use crate::refresh::RefreshSummary;
use crate::AppState;
use axum::{
    extract::{Path, RawQuery, State},
    Json,
};
use serde_json::Value;
use tracing::{error, info};

type Populated = Result<Json<Envelope<RefreshSummary>>, ApiError>;

pub async fn populate_teams(State(state): State<AppState>) -> Populated {
    match state.refresher.refresh_teams().await {
        Ok(summary) => Ok(Envelope::with_message(
            summary.count,
            format!("Successfully populated {} teams", summary.count),
            summary,
        )),
        Err(e) => {
            error!("Error populating teams: {}", e);
            Err(e.with_message("Error populating teams"))
        }
    }
}

pub async fn populate_players(State(state): State<AppState>) -> Populated {
    match state.refresher.refresh_players().await {
        Ok(summary) => Ok(Envelope::with_message(
            summary.count,
            format!("Successfully populated {} players", summary.count),
            summary,
        )),
        Err(e) => {
            error!("Error populating players: {}", e);
            Err(e.with_message("Error populating players"))
        }
    }
}

pub async fn populate_games(State(state): State<AppState>) -> Populated {
    match state.refresher.refresh_games().await {
        Ok(summary) if !summary.replaced => Ok(Envelope::with_message(
            0,
            "No games found",
            summary,
        )),
        Ok(summary) => Ok(Envelope::with_message(
            summary.count,
            format!("Successfully populated {} games", summary.count),
            summary,
        )),
        Err(e) => {
            error!("Error populating games: {}", e);
            Err(e.with_message("Error populating games"))
        }
    }
}

/// Raw passthrough to the provider, forwarding any query string
pub async fn test_api(
    State(state): State<AppState>,
    Path(endpoint): Path<String>,
    RawQuery(query): RawQuery,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let endpoint = match query {
        Some(q) if !q.is_empty() => format!("{}?{}", endpoint, q),
        _ => endpoint,
    };
    info!("Testing upstream endpoint {}", endpoint);

    state
        .upstream
        .fetch(&endpoint)
        .await
        .map(|payload| Envelope::message(format!("Fetched {}", endpoint), payload))
        .map_err(|e| {
            error!("Upstream test of {} failed: {}", endpoint, e);
            e.with_message(format!("Error calling {}", endpoint))
        })
}
