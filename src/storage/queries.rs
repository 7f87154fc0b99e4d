//! Per-collection reads and writes

use super::schema::Store;
use crate::error::Result;
use crate::models::{Game, GameTeam, Player, Team};
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, types::Type, Row};

const PLAYER_COLUMNS: &str = "id, player_id, name, display_name, short_name, team_name, team_id,
     position, jersey, headshot, image, points, assists, rebounds, last_updated";

const TEAM_COLUMNS: &str = "id, team_id, name, short_name, abbreviation, logo, logo_dark, href,
     conference, division, wins, losses, last_updated";

const GAME_COLUMNS: &str =
    "id, game_id, date, formatted_date, status, home_team, away_team, venue, last_updated";

impl Store {
    // Players

    pub fn clear_players(&self) -> Result<usize> {
        Ok(self.conn().execute("DELETE FROM players", [])?)
    }

    /// Insert all players, returning how many were written
    pub fn insert_players(&self, players: &[Player]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO players (player_id, name, display_name, short_name, team_name,
                 team_id, position, jersey, headshot, image, points, assists, rebounds,
                 last_updated)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for player in players {
                stmt.execute(params![
                    player.player_id,
                    player.name,
                    player.display_name,
                    player.short_name,
                    player.team_name,
                    player.team_id,
                    player.position,
                    player.jersey,
                    player.headshot,
                    player.image,
                    player.points,
                    player.assists,
                    player.rebounds,
                    timestamp(&player.last_updated),
                ])?;
            }
        }
        tx.commit()?;
        Ok(players.len())
    }

    pub fn list_players(&self) -> Result<Vec<Player>> {
        let sql = format!("SELECT {} FROM players ORDER BY name ASC", PLAYER_COLUMNS);
        self.query_players(&sql, [])
    }

    pub fn get_player(&self, id: i64) -> Result<Option<Player>> {
        let sql = format!("SELECT {} FROM players WHERE id = ?", PLAYER_COLUMNS);
        Ok(self.query_players(&sql, [id])?.into_iter().next())
    }

    /// Case-insensitive substring match on name or display name
    pub fn search_players(&self, needle: &str, limit: usize) -> Result<Vec<Player>> {
        let sql = format!(
            "SELECT {} FROM players
             WHERE fold(name) LIKE ?1 ESCAPE '\\' OR fold(display_name) LIKE ?1 ESCAPE '\\'
             ORDER BY name ASC
             LIMIT ?2",
            PLAYER_COLUMNS
        );
        self.query_players(
            &sql,
            params![like_pattern(&needle.to_lowercase()), limit as i64],
        )
    }

    pub fn top_players_by_points(&self, limit: usize) -> Result<Vec<Player>> {
        let sql = format!(
            "SELECT {} FROM players ORDER BY points DESC, name ASC LIMIT ?",
            PLAYER_COLUMNS
        );
        self.query_players(&sql, [limit as i64])
    }

    pub fn count_players(&self) -> Result<usize> {
        self.count("players")
    }

    fn query_players<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Player>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, player_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // Teams

    pub fn clear_teams(&self) -> Result<usize> {
        Ok(self.conn().execute("DELETE FROM teams", [])?)
    }

    pub fn insert_teams(&self, teams: &[Team]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO teams (team_id, name, short_name, abbreviation, logo, logo_dark,
                 href, conference, division, wins, losses, last_updated)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for team in teams {
                stmt.execute(params![
                    team.team_id,
                    team.name,
                    team.short_name,
                    team.abbreviation,
                    team.logo,
                    team.logo_dark,
                    team.href,
                    team.conference,
                    team.division,
                    team.wins,
                    team.losses,
                    timestamp(&team.last_updated),
                ])?;
            }
        }
        tx.commit()?;
        Ok(teams.len())
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let sql = format!("SELECT {} FROM teams ORDER BY name ASC", TEAM_COLUMNS);
        self.query_teams(&sql, [])
    }

    pub fn get_team(&self, id: i64) -> Result<Option<Team>> {
        let sql = format!("SELECT {} FROM teams WHERE id = ?", TEAM_COLUMNS);
        Ok(self.query_teams(&sql, [id])?.into_iter().next())
    }

    /// Uniform random sample of at most `limit` teams
    pub fn random_teams(&self, limit: usize) -> Result<Vec<Team>> {
        let sql = format!(
            "SELECT {} FROM teams ORDER BY RANDOM() LIMIT ?",
            TEAM_COLUMNS
        );
        self.query_teams(&sql, [limit as i64])
    }

    pub fn count_teams(&self) -> Result<usize> {
        self.count("teams")
    }

    fn query_teams<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Team>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, team_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    // Games

    pub fn clear_games(&self) -> Result<usize> {
        Ok(self.conn().execute("DELETE FROM games", [])?)
    }

    pub fn insert_games(&self, games: &[Game]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO games (game_id, date, formatted_date, status, home_team,
                 away_team, venue, last_updated)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for game in games {
                stmt.execute(params![
                    game.game_id,
                    timestamp(&game.date),
                    game.formatted_date,
                    game.status,
                    snapshot_to_json(&game.home_team)?,
                    snapshot_to_json(&game.away_team)?,
                    game.venue,
                    timestamp(&game.last_updated),
                ])?;
            }
        }
        tx.commit()?;
        Ok(games.len())
    }

    pub fn list_games(&self) -> Result<Vec<Game>> {
        let sql = format!("SELECT {} FROM games ORDER BY date DESC", GAME_COLUMNS);
        self.query_games(&sql, [])
    }

    pub fn get_game(&self, id: i64) -> Result<Option<Game>> {
        let sql = format!("SELECT {} FROM games WHERE id = ?", GAME_COLUMNS);
        Ok(self.query_games(&sql, [id])?.into_iter().next())
    }

    pub fn latest_games(&self, limit: usize) -> Result<Vec<Game>> {
        let sql = format!(
            "SELECT {} FROM games ORDER BY date DESC LIMIT ?",
            GAME_COLUMNS
        );
        self.query_games(&sql, [limit as i64])
    }

    /// Games whose display date equals `formatted_date` exactly, earliest first
    pub fn games_on(&self, formatted_date: &str) -> Result<Vec<Game>> {
        let sql = format!(
            "SELECT {} FROM games WHERE formatted_date = ? ORDER BY date ASC",
            GAME_COLUMNS
        );
        self.query_games(&sql, [formatted_date])
    }

    pub fn count_games(&self) -> Result<usize> {
        self.count("games")
    }

    fn query_games<P: rusqlite::Params>(&self, sql: &str, params: P) -> Result<Vec<Game>> {
        let conn = self.conn();
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt.query_map(params, game_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn count(&self, table: &'static str) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table);
        let count: i64 = self.conn().query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn player_from_row(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        id: row.get(0)?,
        player_id: row.get(1)?,
        name: row.get(2)?,
        display_name: row.get(3)?,
        short_name: row.get(4)?,
        team_name: row.get(5)?,
        team_id: row.get(6)?,
        position: row.get(7)?,
        jersey: row.get(8)?,
        headshot: row.get(9)?,
        image: row.get(10)?,
        points: row.get(11)?,
        assists: row.get(12)?,
        rebounds: row.get(13)?,
        last_updated: parse_timestamp(row, 14)?,
    })
}

fn team_from_row(row: &Row) -> rusqlite::Result<Team> {
    Ok(Team {
        id: row.get(0)?,
        team_id: row.get(1)?,
        name: row.get(2)?,
        short_name: row.get(3)?,
        abbreviation: row.get(4)?,
        logo: row.get(5)?,
        logo_dark: row.get(6)?,
        href: row.get(7)?,
        conference: row.get(8)?,
        division: row.get(9)?,
        wins: row.get(10)?,
        losses: row.get(11)?,
        last_updated: parse_timestamp(row, 12)?,
    })
}

fn game_from_row(row: &Row) -> rusqlite::Result<Game> {
    Ok(Game {
        id: row.get(0)?,
        game_id: row.get(1)?,
        date: parse_timestamp(row, 2)?,
        formatted_date: row.get(3)?,
        status: row.get(4)?,
        home_team: snapshot_from_row(row, 5)?,
        away_team: snapshot_from_row(row, 6)?,
        venue: row.get(7)?,
        last_updated: parse_timestamp(row, 8)?,
    })
}

/// Fixed-width UTC timestamps so that text ordering matches time ordering
fn timestamp(time: &DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn parse_timestamp(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn snapshot_to_json(team: &GameTeam) -> rusqlite::Result<String> {
    serde_json::to_string(team).map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

fn snapshot_from_row(row: &Row, idx: usize) -> rusqlite::Result<GameTeam> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Build a LIKE pattern that matches `needle` literally anywhere in the value
fn like_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
