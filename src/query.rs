//! Read-side operations over the cached collections

use crate::error::{AppError, Result};
use crate::models::{Game, Player, Team, GAME_DATE_FORMAT};
use crate::storage::Store;
use chrono::NaiveDate;
use std::sync::Arc;

/// Result cap for search, top and random queries
pub const FIXED_LIMIT: usize = 10;

#[derive(Clone)]
pub struct QueryService {
    store: Arc<Store>,
}

impl QueryService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        self.store.list_players()
    }

    pub fn get_player(&self, id: &str) -> Result<Player> {
        let found = match parse_id(id) {
            Some(id) => self.store.get_player(id)?,
            None => None,
        };
        found.ok_or_else(|| not_found("Player", id))
    }

    pub fn search_players(&self, name: &str) -> Result<Vec<Player>> {
        self.store.search_players(name.trim(), FIXED_LIMIT)
    }

    pub fn top_players(&self) -> Result<Vec<Player>> {
        self.store.top_players_by_points(FIXED_LIMIT)
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        self.store.list_teams()
    }

    pub fn get_team(&self, id: &str) -> Result<Team> {
        let found = match parse_id(id) {
            Some(id) => self.store.get_team(id)?,
            None => None,
        };
        found.ok_or_else(|| not_found("Team", id))
    }

    pub fn random_teams(&self) -> Result<Vec<Team>> {
        self.store.random_teams(FIXED_LIMIT)
    }

    pub fn list_games(&self) -> Result<Vec<Game>> {
        self.store.list_games()
    }

    pub fn get_game(&self, id: &str) -> Result<Game> {
        let found = match parse_id(id) {
            Some(id) => self.store.get_game(id)?,
            None => None,
        };
        found.ok_or_else(|| not_found("Game", id))
    }

    pub fn latest_games(&self) -> Result<Vec<Game>> {
        self.store.latest_games(FIXED_LIMIT)
    }

    /// Games on a display date ("Oct 18, 2026"); an ISO date is converted first
    pub fn games_on_date(&self, date: &str) -> Result<Vec<Game>> {
        let date = date.trim();
        let formatted = match NaiveDate::parse_from_str(date, "%Y-%m-%d") {
            Ok(iso) => iso.format(GAME_DATE_FORMAT).to_string(),
            Err(_) => date.to_string(),
        };
        self.store.games_on(&formatted)
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn not_found(kind: &'static str, id: &str) -> AppError {
    AppError::NotFound {
        kind,
        id: id.to_string(),
    }
}
