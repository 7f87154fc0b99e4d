//! Route tests driven through the router with `oneshot`

use super::build_router;
use crate::api::mock::ScriptedUpstream;
use crate::models::{Player, FREE_AGENT};
use crate::refresh::{Division, PLAYER_ENDPOINTS};
use crate::storage::Store;
use crate::AppState;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn player(name: &str, points: f64) -> Player {
    Player {
        id: 0,
        player_id: name.to_lowercase().replace(' ', "-"),
        name: name.to_string(),
        display_name: name.to_string(),
        short_name: None,
        team_name: FREE_AGENT.to_string(),
        team_id: None,
        position: None,
        jersey: None,
        headshot: None,
        image: None,
        points,
        assists: 0.0,
        rebounds: 0.0,
        last_updated: Utc::now(),
    }
}

fn app() -> (Router, Arc<Store>, Arc<ScriptedUpstream>) {
    let store = Arc::new(Store::open_in_memory().unwrap());
    let upstream = Arc::new(ScriptedUpstream::new());
    let state = AppState::new(store.clone(), upstream.clone());
    (build_router(state), store, upstream)
}

async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_root_lists_endpoints() {
    let (app, _, _) = app();
    let (status, body) = send(app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        body["data"]["endpoints"]["players"]["top"],
        "GET /api/players/top/10"
    );
}

#[tokio::test]
async fn test_list_players_envelope() {
    let (app, store, _) = app();
    store
        .insert_players(&[player("Stephen Curry", 0.0), player("Anthony Edwards", 0.0)])
        .unwrap();

    let (status, body) = send(app, Method::GET, "/api/players").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    assert_eq!(body["data"][0]["name"], "Anthony Edwards");
}

#[tokio::test]
async fn test_get_player_by_id_and_missing() {
    let (app, store, _) = app();
    store.insert_players(&[player("LeBron James", 0.0)]).unwrap();
    let id = store.list_players().unwrap()[0].id;

    let (status, body) = send(app.clone(), Method::GET, &format!("/api/players/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "LeBron James");

    let (status, body) = send(app, Method::GET, "/api/players/424242").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Player not found");
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_search_and_top_routes() {
    let (app, store, _) = app();
    let players: Vec<_> = (0..12)
        .map(|i| player(&format!("Player {}", i), i as f64))
        .chain(std::iter::once(player("LeBron James", 3.5)))
        .collect();
    store.insert_players(&players).unwrap();

    let (status, body) = send(app.clone(), Method::GET, "/api/players/search/bron").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["data"][0]["name"], "LeBron James");

    let (_, body) = send(app, Method::GET, "/api/players/top/10").await;
    let points: Vec<f64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["points"].as_f64().unwrap())
        .collect();
    assert_eq!(points.len(), 10);
    assert_eq!(points[0], 11.0);
    assert!(points.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_games_date_route_decodes_display_date() {
    let (app, _, _) = app();
    let (status, body) = send(app, Method::GET, "/api/games/date/Oct%2018,%202026").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_populate_players_route() {
    let (app, store, upstream) = app();
    upstream.respond(
        PLAYER_ENDPOINTS[0],
        json!({ "PlayerList": [{ "id": 1, "fullName": "Jalen Brunson" }] }),
    );

    let (status, body) = send(app, Method::POST, "/api/admin/populate-players").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
    assert_eq!(body["message"], "Successfully populated 1 players");
    assert_eq!(store.count_players().unwrap(), 1);
}

#[tokio::test]
async fn test_populate_players_failure_envelope() {
    let (app, store, _) = app();
    store.insert_players(&[player("Kept Player", 0.0)]).unwrap();

    let (status, body) = send(app, Method::POST, "/api/admin/populate-players").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Error populating players");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("No working endpoint found"));
    assert_eq!(store.count_players().unwrap(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_populate_teams_route_reports_breakdown() {
    let (app, _, upstream) = app();
    for division in Division::ALL {
        upstream.respond(
            &division.endpoint(),
            json!({ "teamList": [{ "id": division.name(), "displayName": division.name() }] }),
        );
    }

    let (status, body) = send(app, Method::POST, "/api/admin/populate-teams").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 6);
    assert_eq!(body["data"]["divisions"]["Atlantic"], 1);
}

#[tokio::test]
async fn test_populate_games_with_no_games() {
    let (app, _, upstream) = app();
    upstream.respond("nba-scoreboard", json!({ "Events": [] }));

    let (status, body) = send(app, Method::POST, "/api/admin/populate-games").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 0);
    assert_eq!(body["message"], "No games found");
}

#[tokio::test]
async fn test_api_passthrough_forwards_query() {
    let (app, _, upstream) = app();
    upstream.respond("nba-team-info", json!({ "team": "Knicks" }));

    let (status, body) = send(
        app,
        Method::GET,
        "/api/admin/test-api/nba-team-info?teamid=18",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["team"], "Knicks");
    assert_eq!(upstream.calls(), vec!["nba-team-info?teamid=18"]);
}
