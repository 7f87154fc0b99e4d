use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Team name stored for players the provider lists without a team
pub const FREE_AGENT: &str = "Free Agent";

/// An NBA player as cached locally
///
/// `id` is the storage identifier assigned on insert; records built by the
/// refresh normalizers carry `0` until they are stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: i64,
    pub player_id: String,
    pub name: String,
    pub display_name: String,
    pub short_name: Option<String>,
    pub team_name: String,
    pub team_id: Option<String>,
    pub position: Option<String>,
    pub jersey: Option<String>,
    pub headshot: Option<String>,
    pub image: Option<String>,
    pub points: f64,
    pub assists: f64,
    pub rebounds: f64,
    pub last_updated: DateTime<Utc>,
}

/// An NBA team as cached locally
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: i64,
    pub team_id: String,
    pub name: String,
    pub short_name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub logo_dark: Option<String>,
    pub href: Option<String>,
    pub conference: String,
    pub division: String,
    pub wins: u32,
    pub losses: u32,
    pub last_updated: DateTime<Utc>,
}

/// Frozen box-score view of one side of a game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameTeam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    #[serde(default)]
    pub score: u32,
}

/// A scheduled or completed game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: i64,
    pub game_id: String,
    pub date: DateTime<Utc>,
    pub formatted_date: String,
    pub status: String,
    pub home_team: GameTeam,
    pub away_team: GameTeam,
    pub venue: Option<String>,
    pub last_updated: DateTime<Utc>,
}

/// Display format used for `Game::formatted_date`, e.g. "Oct 18, 2026"
pub const GAME_DATE_FORMAT: &str = "%b %-d, %Y";

pub fn format_game_date(date: &DateTime<Utc>) -> String {
    date.format(GAME_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_game_date() {
        let date = Utc.with_ymd_and_hms(2026, 1, 5, 0, 30, 0).unwrap();
        assert_eq!(format_game_date(&date), "Jan 5, 2026");
    }

    #[test]
    fn test_player_serializes_camel_case() {
        let player = Player {
            id: 1,
            player_id: "1966".to_string(),
            name: "LeBron James".to_string(),
            display_name: "LeBron James".to_string(),
            short_name: Some("L. James".to_string()),
            team_name: "Los Angeles Lakers".to_string(),
            team_id: Some("13".to_string()),
            position: Some("SF".to_string()),
            jersey: Some("23".to_string()),
            headshot: None,
            image: None,
            points: 0.0,
            assists: 0.0,
            rebounds: 0.0,
            last_updated: Utc::now(),
        };
        let json = serde_json::to_value(&player).unwrap();
        assert_eq!(json["displayName"], "LeBron James");
        assert_eq!(json["teamName"], "Los Angeles Lakers");
        assert!(json.get("display_name").is_none());
    }
}
