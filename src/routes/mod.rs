mod admin;
mod games;
mod players;
mod teams;

#[cfg(test)]
mod tests;

use crate::AppState;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Success body shared by every route: `{success, count?, message?, data}`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn one(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            count: None,
            message: None,
            data,
        })
    }

    pub fn message(message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            count: None,
            message: Some(message.into()),
            data,
        })
    }

    pub fn with_message(count: usize, message: impl Into<String>, data: T) -> Json<Self> {
        Json(Self {
            success: true,
            count: Some(count),
            message: Some(message.into()),
            data,
        })
    }
}

impl<T> Envelope<Vec<T>> {
    pub fn list(data: Vec<T>) -> Json<Self> {
        Json(Self {
            success: true,
            count: Some(data.len()),
            message: None,
            data,
        })
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/players", get(players::list))
        .route("/api/players/search/:name", get(players::search))
        .route("/api/players/top/10", get(players::top))
        .route("/api/players/:id", get(players::get_one))
        .route("/api/teams", get(teams::list))
        .route("/api/teams/random/10", get(teams::random))
        .route("/api/teams/:id", get(teams::get_one))
        .route("/api/games", get(games::list))
        .route("/api/games/latest", get(games::latest))
        .route("/api/games/date/:date", get(games::on_date))
        .route("/api/games/:id", get(games::get_one))
        .route("/api/admin/populate-teams", post(admin::populate_teams))
        .route("/api/admin/populate-players", post(admin::populate_players))
        .route("/api/admin/populate-games", post(admin::populate_games))
        .route("/api/admin/test-api/:endpoint", get(admin::test_api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> Json<Envelope<Value>> {
    Envelope::message(
        "NBA Stats API",
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "players": {
                    "list": "GET /api/players",
                    "byId": "GET /api/players/:id",
                    "search": "GET /api/players/search/:name",
                    "top": "GET /api/players/top/10"
                },
                "teams": {
                    "list": "GET /api/teams",
                    "byId": "GET /api/teams/:id",
                    "random": "GET /api/teams/random/10"
                },
                "games": {
                    "list": "GET /api/games",
                    "byId": "GET /api/games/:id",
                    "latest": "GET /api/games/latest",
                    "byDate": "GET /api/games/date/:date"
                },
                "admin": {
                    "populateTeams": "POST /api/admin/populate-teams",
                    "populatePlayers": "POST /api/admin/populate-players",
                    "populateGames": "POST /api/admin/populate-games",
                    "testApi": "GET /api/admin/test-api/:endpoint"
                }
            }
        }),
    )
}
