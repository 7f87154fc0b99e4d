//! Repopulating the local collections from the provider
//!
//! Every refresh ends in a destructive clear-then-insert of its collection.
//! Nothing is cleared until the provider has produced usable records, so a
//! failed refresh leaves the previous contents in place.

pub mod normalize;


use crate::api::types::{decode_list, ApiGame, ApiPlayer, ApiTeam};
use crate::api::Upstream;
use crate::error::{AppError, Result};
use crate::models::Team;
use crate::storage::Store;
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Pause between consecutive division requests, to stay under the provider's rate limit
pub const DIVISION_PACING: Duration = Duration::from_millis(500);

/// Player list endpoints, in the order they are tried
pub const PLAYER_ENDPOINTS: [&str; 2] = ["nba-player-list", "nba-players"];

/// Game endpoints tried before falling back to today's dated scoreboard
pub const GAME_ENDPOINTS: [&str; 2] = ["nba-scoreboard", "nba-schedule"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conference {
    East,
    West,
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conference::East => write!(f, "East"),
            Conference::West => write!(f, "West"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Division {
    Atlantic,
    Central,
    Southeast,
    Northwest,
    Pacific,
    Southwest,
}

impl Division {
    /// Fetch order for a team refresh
    pub const ALL: [Division; 6] = [
        Division::Atlantic,
        Division::Central,
        Division::Southeast,
        Division::Northwest,
        Division::Pacific,
        Division::Southwest,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Division::Atlantic => "Atlantic",
            Division::Central => "Central",
            Division::Southeast => "Southeast",
            Division::Northwest => "Northwest",
            Division::Pacific => "Pacific",
            Division::Southwest => "Southwest",
        }
    }

    pub fn conference(&self) -> Conference {
        match self {
            Division::Atlantic | Division::Central | Division::Southeast => Conference::East,
            Division::Northwest | Division::Pacific | Division::Southwest => Conference::West,
        }
    }

    /// The provider's per-division team list
    pub fn endpoint(&self) -> String {
        format!("nba-{}-team-list", self.name().to_lowercase())
    }
}

impl fmt::Display for Division {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Today's scoreboard, qualified by ISO date
pub fn dated_game_endpoint(date: NaiveDate) -> String {
    format!("nba-scoreboard-by-date?date={}", date.format("%Y-%m-%d"))
}

/// Outcome of one refresh
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshSummary {
    pub kind: &'static str,
    pub count: usize,
    /// Whether the collection was cleared and rewritten
    pub replaced: bool,
    /// Endpoint that produced the data, for fallback chains
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Teams stored per division
    #[serde(skip_serializing_if = "Option::is_none")]
    pub divisions: Option<BTreeMap<&'static str, usize>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failed_divisions: Vec<&'static str>,
}

impl RefreshSummary {
    fn new(kind: &'static str, count: usize) -> Self {
        Self {
            kind,
            count,
            replaced: true,
            endpoint: None,
            divisions: None,
            failed_divisions: Vec::new(),
        }
    }
}

/// Drives the three refresh operations against one provider and one store
#[derive(Clone)]
pub struct Refresher {
    upstream: Arc<dyn Upstream>,
    store: Arc<Store>,
}

impl Refresher {
    pub fn new(upstream: Arc<dyn Upstream>, store: Arc<Store>) -> Self {
        Self { upstream, store }
    }

    /// Pull all six divisions, tolerating individual division failures
    pub async fn refresh_teams(&self) -> Result<RefreshSummary> {
        info!("Refreshing teams from {} divisions", Division::ALL.len());

        let mut teams = Vec::new();
        let mut breakdown = BTreeMap::new();
        let mut failed = Vec::new();

        for (i, division) in Division::ALL.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(DIVISION_PACING).await;
            }

            match self.fetch_division(*division).await {
                Ok(mut batch) => {
                    info!("{} division: {} teams", division, batch.len());
                    breakdown.insert(division.name(), batch.len());
                    teams.append(&mut batch);
                }
                Err(e) => {
                    warn!("Failed to fetch {} division: {}", division, e);
                    breakdown.insert(division.name(), 0);
                    failed.push(division.name());
                }
            }
        }

        if teams.is_empty() {
            return Err(AppError::NoData { kind: "team" });
        }

        self.store.clear_teams()?;
        let count = self.store.insert_teams(&teams)?;
        info!("Stored {} teams", count);

        let mut summary = RefreshSummary::new("teams", count);
        summary.divisions = Some(breakdown);
        summary.failed_divisions = failed;
        Ok(summary)
    }

    async fn fetch_division(&self, division: Division) -> Result<Vec<Team>> {
        let payload = self.upstream.fetch(&division.endpoint()).await?;
        let now = Utc::now();

        let raw = decode_list::<ApiTeam>(&payload).ok_or(AppError::NoData { kind: "team" })?;
        Ok(raw
            .into_iter()
            .filter_map(|raw| normalize::team(raw, division, now))
            .collect())
    }

    /// Primary player list, then one fallback
    pub async fn refresh_players(&self) -> Result<RefreshSummary> {
        info!("Refreshing players");

        let candidates: Vec<String> = PLAYER_ENDPOINTS.iter().map(|e| e.to_string()).collect();
        let (endpoint, payload) = self.fetch_first(&candidates).await?;

        let now = Utc::now();
        let players: Vec<_> = decode_list::<ApiPlayer>(&payload)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| normalize::player(raw, now))
            .collect();

        if players.is_empty() {
            return Err(AppError::NoData { kind: "player" });
        }

        self.store.clear_players()?;
        let count = self.store.insert_players(&players)?;
        info!("Stored {} players from {}", count, endpoint);

        let mut summary = RefreshSummary::new("players", count);
        summary.endpoint = Some(endpoint);
        Ok(summary)
    }

    /// Primary, secondary, then today's dated scoreboard
    ///
    /// An empty game list is a successful no-op: the collection is kept.
    pub async fn refresh_games(&self) -> Result<RefreshSummary> {
        info!("Refreshing games");

        let mut candidates: Vec<String> = GAME_ENDPOINTS.iter().map(|e| e.to_string()).collect();
        candidates.push(dated_game_endpoint(Utc::now().date_naive()));
        let (endpoint, payload) = self.fetch_first(&candidates).await?;

        let now = Utc::now();
        let games: Vec<_> = decode_list::<ApiGame>(&payload)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|raw| normalize::game(raw, now))
            .collect();

        let mut summary = if games.is_empty() {
            info!("No games returned by {}, keeping stored games", endpoint);
            let mut summary = RefreshSummary::new("games", 0);
            summary.replaced = false;
            summary
        } else {
            self.store.clear_games()?;
            let count = self.store.insert_games(&games)?;
            info!("Stored {} games from {}", count, endpoint);
            RefreshSummary::new("games", count)
        };
        summary.endpoint = Some(endpoint);
        Ok(summary)
    }

    /// Try each endpoint in order, stopping at the first success
    async fn fetch_first(&self, endpoints: &[String]) -> Result<(String, serde_json::Value)> {
        let mut last_error = None;

        for endpoint in endpoints {
            match self.upstream.fetch(endpoint).await {
                Ok(payload) => return Ok((endpoint.clone(), payload)),
                Err(e) => {
                    warn!("Endpoint {} failed: {}", endpoint, e);
                    last_error = Some(e);
                }
            }
        }

        Err(AppError::EndpointNotFound {
            last_error: last_error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no endpoints to try".to_string()),
        })
    }
}
