//! Provider records to storage records

use super::Division;
use crate::api::types::{ApiCompetition, ApiGame, ApiGameTeam, ApiPlayer, ApiTeam};
use crate::models::{format_game_date, Game, GameTeam, Player, Team, FREE_AGENT};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use tracing::debug;

/// Tag a provider team with its division and conference; `None` without a name
pub fn team(raw: ApiTeam, division: Division, now: DateTime<Utc>) -> Option<Team> {
    let name = raw.display_name.or_else(|| raw.name.clone())?;

    let mut logos = raw.logos.into_iter().filter_map(|l| l.href);
    let logo = raw.logo.or_else(|| logos.next());
    let logo_dark = raw.logo_dark.or_else(|| logos.next());
    let href = raw
        .href
        .or_else(|| raw.links.into_iter().find_map(|l| l.href));

    Some(Team {
        id: 0,
        team_id: raw.id.unwrap_or_default(),
        name,
        short_name: raw.short_display_name.or(raw.name),
        abbreviation: raw.abbrev.or(raw.abbreviation),
        logo,
        logo_dark,
        href,
        conference: division.conference().to_string(),
        division: division.to_string(),
        wins: 0,
        losses: 0,
        last_updated: now,
    })
}

/// Stats are always zeroed: the player list carries none
pub fn player(raw: ApiPlayer, now: DateTime<Utc>) -> Option<Player> {
    let name = raw
        .full_name
        .or(raw.name)
        .or_else(|| raw.display_name.clone())?;
    let display_name = raw.display_name.unwrap_or_else(|| name.clone());

    let team_ref = raw.team.unwrap_or_default();
    let team_name = raw
        .team_name
        .or(team_ref.display_name)
        .or(team_ref.name)
        .unwrap_or_else(|| FREE_AGENT.to_string());

    Some(Player {
        id: 0,
        player_id: raw.id.unwrap_or_default(),
        name,
        display_name,
        short_name: raw.short_name,
        team_name,
        team_id: raw.team_id.or(team_ref.id),
        position: raw
            .position
            .and_then(|p| p.resolve(&["/abbreviation", "/name"])),
        jersey: raw.jersey,
        headshot: raw.headshot.and_then(|h| h.resolve(&["/href"])),
        image: raw.image,
        points: 0.0,
        assists: 0.0,
        rebounds: 0.0,
        last_updated: now,
    })
}

/// Accepts the flat (`homeTeam`/`awayTeam`) and the nested scoreboard shape
pub fn game(raw: ApiGame, now: DateTime<Utc>) -> Option<Game> {
    let game_id = raw.id?;

    let date = match raw.date.as_deref().and_then(parse_upstream_date) {
        Some(date) => date,
        None => {
            debug!("Game {} has no usable date, using refresh time", game_id);
            now
        }
    };

    let competition = raw.competitions.into_iter().next().unwrap_or_default();
    let (home_team, away_team) = if raw.home_team.is_some() || raw.away_team.is_some() {
        (
            snapshot(raw.home_team.unwrap_or_default()),
            snapshot(raw.away_team.unwrap_or_default()),
        )
    } else {
        competitor_snapshots(&competition)
    };

    let venue = raw
        .venue
        .or(competition.venue)
        .and_then(|v| v.resolve(&["/fullName", "/name"]));

    let status = raw
        .status
        .and_then(|s| s.resolve(&["/type/description", "/description", "/type/name"]))
        .unwrap_or_else(|| "Scheduled".to_string());

    Some(Game {
        id: 0,
        game_id,
        formatted_date: format_game_date(&date),
        date,
        status,
        home_team,
        away_team,
        venue,
        last_updated: now,
    })
}

fn snapshot(raw: ApiGameTeam) -> GameTeam {
    GameTeam {
        id: raw.id,
        name: raw.display_name.or(raw.name),
        abbreviation: raw.abbreviation.or(raw.abbrev),
        logo: raw.logo,
        score: raw.score,
    }
}

fn competitor_snapshots(competition: &ApiCompetition) -> (GameTeam, GameTeam) {
    let side = |which: &str| {
        competition
            .competitors
            .iter()
            .find(|c| c.home_away.as_deref() == Some(which))
            .map(|c| {
                let mut team = snapshot(c.team.clone());
                if c.score > 0 {
                    team.score = c.score;
                }
                team
            })
            .unwrap_or_default()
    };
    (side("home"), side("away"))
}

/// RFC 3339, minute-precision `2026-10-18T23:30Z`, or a bare date
pub fn parse_upstream_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%MZ") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
