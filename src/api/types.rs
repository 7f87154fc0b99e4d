//! Wire shapes of the provider's list payloads
//!
//! The provider is loose about types: ids and jersey numbers arrive as
//! strings or numbers, nested objects are sometimes flattened to strings, and
//! lists are wrapped under per-endpoint keys. Everything here is lenient and
//! optional; the refresh normalizers decide the defaults.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A scalar that may be sent as a string or a number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Integer(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Integer(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

fn opt_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_string)
        .filter(|s| !s.is_empty()))
}

fn score<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Scalar>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Scalar::Integer(n)) => n.max(0) as u32,
        Some(Scalar::Float(f)) => f.max(0.0) as u32,
        Some(Scalar::Text(s)) => s.trim().parse().unwrap_or(0),
        None => 0,
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Link {
    pub href: Option<String>,
}

/// Either a plain string or an object carrying the value in a named field
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TextOrObject {
    Text(String),
    Object(Value),
}

impl TextOrObject {
    /// The string itself, or the first string found at one of the JSON `pointers`
    pub fn resolve(&self, pointers: &[&str]) -> Option<String> {
        match self {
            TextOrObject::Text(s) => Some(s.clone()),
            TextOrObject::Object(value) => pointers
                .iter()
                .find_map(|p| value.pointer(p).and_then(Value::as_str))
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiTeam {
    #[serde(deserialize_with = "opt_scalar")]
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
    pub short_display_name: Option<String>,
    pub abbrev: Option<String>,
    pub abbreviation: Option<String>,
    pub logo: Option<String>,
    pub logo_dark: Option<String>,
    pub logos: Vec<Link>,
    pub href: Option<String>,
    pub links: Vec<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiTeamRef {
    #[serde(deserialize_with = "opt_scalar")]
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiPlayer {
    #[serde(deserialize_with = "opt_scalar")]
    pub id: Option<String>,
    pub full_name: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub short_name: Option<String>,
    pub team: Option<ApiTeamRef>,
    pub team_name: Option<String>,
    #[serde(deserialize_with = "opt_scalar")]
    pub team_id: Option<String>,
    pub position: Option<TextOrObject>,
    #[serde(deserialize_with = "opt_scalar")]
    pub jersey: Option<String>,
    pub headshot: Option<TextOrObject>,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiGameTeam {
    #[serde(deserialize_with = "opt_scalar")]
    pub id: Option<String>,
    pub name: Option<String>,
    pub display_name: Option<String>,
    pub abbreviation: Option<String>,
    pub abbrev: Option<String>,
    pub logo: Option<String>,
    #[serde(deserialize_with = "score")]
    pub score: u32,
}

/// One side of a nested scoreboard competition
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCompetitor {
    pub home_away: Option<String>,
    pub team: ApiGameTeam,
    #[serde(deserialize_with = "score")]
    pub score: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiCompetition {
    pub competitors: Vec<ApiCompetitor>,
    pub venue: Option<TextOrObject>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiGame {
    #[serde(deserialize_with = "opt_scalar")]
    pub id: Option<String>,
    pub date: Option<String>,
    pub status: Option<TextOrObject>,
    pub home_team: Option<ApiGameTeam>,
    pub away_team: Option<ApiGameTeam>,
    pub competitions: Vec<ApiCompetition>,
    pub venue: Option<TextOrObject>,
}

/// Keys the provider wraps record lists in, checked in order
const LIST_KEYS: [&str; 8] = [
    "teamList",
    "PlayerList",
    "playerList",
    "players",
    "Events",
    "events",
    "games",
    "teams",
];

/// Find the record list inside a payload
///
/// The payload is either the list itself, or an object holding it under one
/// of the known list keys. An object with none of those keys falls back to its only
/// array-valued field. Returns `None` when no list can be told apart.
pub fn extract_list(payload: &Value) -> Option<&Vec<Value>> {
    match payload {
        Value::Array(items) => Some(items),
        Value::Object(fields) => {
            if let Some(items) = LIST_KEYS
                .iter()
                .find_map(|key| fields.get(*key).and_then(Value::as_array))
            {
                return Some(items);
            }

            let mut arrays = fields.values().filter_map(Value::as_array);
            match (arrays.next(), arrays.next()) {
                (Some(items), None) => Some(items),
                _ => None,
            }
        }
        _ => None,
    }
}

/// Decode every element of the payload's list, skipping unreadable entries
pub fn decode_list<T>(payload: &Value) -> Option<Vec<T>>
where
    T: for<'de> Deserialize<'de>,
{
    let items = extract_list(payload)?;
    Some(
        items
            .iter()
            .filter_map(|item| match T::deserialize(item) {
                Ok(decoded) => Some(decoded),
                Err(e) => {
                    tracing::warn!("Skipping malformed record: {}", e);
                    None
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_list_from_wrapped_payload() {
        let payload = json!({ "teamList": [{ "id": 1 }, { "id": 2 }] });
        assert_eq!(extract_list(&payload).unwrap().len(), 2);

        let payload = json!([{ "id": 1 }]);
        assert_eq!(extract_list(&payload).unwrap().len(), 1);

        assert!(extract_list(&json!({ "message": "none" })).is_none());
        assert!(extract_list(&Value::Null).is_none());
    }

    #[test]
    fn test_extract_list_prefers_known_keys_over_other_arrays() {
        let payload = json!({
            "errors": [],
            "teamList": [{ "id": 1 }, { "id": 2 }],
            "alerts": [{ "text": "maintenance" }]
        });
        assert_eq!(extract_list(&payload).unwrap().len(), 2);

        let payload = json!({ "data": [{ "id": 1 }], "meta": {} });
        assert_eq!(extract_list(&payload).unwrap().len(), 1);

        // Two unknown arrays are ambiguous
        let payload = json!({ "alpha": [1], "beta": [2, 3] });
        assert!(extract_list(&payload).is_none());
    }

    #[test]
    fn test_player_accepts_numeric_and_nested_fields() {
        let players: Vec<ApiPlayer> = decode_list(&json!({
            "PlayerList": [{
                "id": 1966,
                "fullName": "LeBron James",
                "jersey": 23,
                "position": { "abbreviation": "SF", "name": "Small Forward" },
                "headshot": { "href": "https://img/1966.png" },
                "team": { "id": 13, "displayName": "Los Angeles Lakers" }
            }]
        }))
        .unwrap();

        let player = &players[0];
        assert_eq!(player.id.as_deref(), Some("1966"));
        assert_eq!(player.jersey.as_deref(), Some("23"));
        assert_eq!(
            player.position.as_ref().unwrap().resolve(&["/abbreviation"]),
            Some("SF".to_string())
        );
        assert_eq!(
            player.team.as_ref().unwrap().id.as_deref(),
            Some("13")
        );
    }

    #[test]
    fn test_game_team_score_from_string() {
        let team: ApiGameTeam =
            serde_json::from_value(json!({ "id": "2", "score": "118" })).unwrap();
        assert_eq!(team.score, 118);

        let team: ApiGameTeam = serde_json::from_value(json!({ "id": "2" })).unwrap();
        assert_eq!(team.score, 0);
    }
}
