//! Database connection and schema management

use crate::error::Result;
use rusqlite::{functions::FunctionFlags, Connection};
use std::sync::{Mutex, MutexGuard};
use tracing::info;

/// Shared handle to the record store
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Open (or create) the database named by `database_url` and ensure tables exist
    pub fn open(database_url: &str) -> Result<Self> {
        let conn = if database_url == ":memory:" {
            Connection::open_in_memory()?
        } else {
            let path = database_url.strip_prefix("sqlite://").unwrap_or(database_url);
            Connection::open(path)?
        };
        info!("Opened record store at {}", database_url);
        Self::with_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        register_functions(&conn)?;
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.initialize_schema()?;
        Ok(store)
    }

    pub(crate) fn conn(&self) -> MutexGuard<'_, Connection> {
        // A panic while holding the lock leaves no partial statement behind
        self.conn.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn initialize_schema(&self) -> Result<()> {
        let conn = self.conn();

        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS players (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id TEXT NOT NULL,
                name TEXT NOT NULL,
                display_name TEXT NOT NULL,
                short_name TEXT,
                team_name TEXT NOT NULL,
                team_id TEXT,
                position TEXT,
                jersey TEXT,
                headshot TEXT,
                image TEXT,
                points REAL NOT NULL DEFAULT 0,
                assists REAL NOT NULL DEFAULT 0,
                rebounds REAL NOT NULL DEFAULT 0,
                last_updated TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS teams (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                team_id TEXT NOT NULL,
                name TEXT NOT NULL,
                short_name TEXT,
                abbreviation TEXT,
                logo TEXT,
                logo_dark TEXT,
                href TEXT,
                conference TEXT NOT NULL,
                division TEXT NOT NULL,
                wins INTEGER NOT NULL DEFAULT 0,
                losses INTEGER NOT NULL DEFAULT 0,
                last_updated TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS games (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                game_id TEXT NOT NULL,
                date TEXT NOT NULL,
                formatted_date TEXT NOT NULL,
                status TEXT NOT NULL,
                home_team TEXT NOT NULL,
                away_team TEXT NOT NULL,
                venue TEXT,
                last_updated TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_players_name ON players(name);
            CREATE INDEX IF NOT EXISTS idx_players_points ON players(points);
            CREATE INDEX IF NOT EXISTS idx_teams_name ON teams(name);
            CREATE INDEX IF NOT EXISTS idx_games_date ON games(date);
            CREATE INDEX IF NOT EXISTS idx_games_formatted_date ON games(formatted_date);",
        )?;

        Ok(())
    }
}

/// `fold(text)`: Unicode lowercase, for case-insensitive matching beyond ASCII
fn register_functions(conn: &Connection) -> Result<()> {
    conn.create_scalar_function(
        "fold",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let text: Option<String> = ctx.get(0)?;
            Ok(text.map(|t| t.to_lowercase()))
        },
    )?;
    Ok(())
}
