/// MLB Stats API raw wire types — serde shapes for deserializing upstream
/// responses. Every field is optional; defaulting happens in the mapping
/// code, never here.
use serde::Deserialize;
use std::collections::HashMap;

// ---------------------------------------------------------------------------
// People  (/people/{id}?hydrate=currentTeam,team(league))
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct PeopleResponse {
    pub people: Option<Vec<WirePerson>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePerson {
    pub id: Option<u32>,
    pub full_name: Option<String>,
    /// Jersey number arrives as a string ("7").
    pub primary_number: Option<String>,
    pub primary_position: Option<WirePosition>,
    pub current_team: Option<WireTeam>,
    pub active: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePosition {
    pub abbreviation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireTeam {
    pub id: Option<u32>,
    pub name: Option<String>,
    pub sport: Option<WireSport>,
    pub league: Option<WireLeague>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireSport {
    pub id: Option<u32>,
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireLeague {
    pub id: Option<u32>,
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Game log  (/people/{id}/stats?stats=gameLog&season=…)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StatsResponse {
    pub stats: Option<Vec<WireStatGroup>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireStatGroup {
    pub splits: Option<Vec<WireSplit>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireSplit {
    /// "YYYY-MM-DD"
    pub date: Option<String>,
    pub team: Option<WireTeam>,
    pub sport: Option<WireSport>,
    pub opponent: Option<WireTeam>,
    pub is_home: Option<bool>,
    pub game: Option<WireGameRef>,
    pub stat: Option<WireSplitStat>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireGameRef {
    pub game_pk: Option<u64>,
}

/// Game-log stat line. Batting and pitching fields share one shape upstream.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireSplitStat {
    pub at_bats: Option<u32>,
    pub plate_appearances: Option<u32>,
    pub innings_pitched: Option<String>,
}

// ---------------------------------------------------------------------------
// Schedule  (/schedule?sportId=…&startDate=…&endDate=…)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleResponse {
    pub dates: Option<Vec<WireScheduleDate>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireScheduleDate {
    pub games: Option<Vec<WireScheduleGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireScheduleGame {
    pub game_pk: Option<u64>,
    /// ISO 8601
    pub game_date: Option<String>,
    pub status: Option<WireGameStatus>,
    pub teams: Option<WireScheduleSides>,
    pub venue: Option<WireVenue>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireGameStatus {
    /// "Preview" | "Live" | "Final"
    pub abstract_game_state: Option<String>,
    /// Free text; "Postponed"/"Cancelled" substrings override the abstract state.
    pub detailed_state: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireScheduleSides {
    pub home: Option<WireScheduleSide>,
    pub away: Option<WireScheduleSide>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireScheduleSide {
    pub team: Option<WireTeam>,
    pub score: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireVenue {
    pub name: Option<String>,
}

// ---------------------------------------------------------------------------
// Live feed  (/game/{gamePk}/feed/live, v1.1 with v1 fallback)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeedResponse {
    pub game_data: Option<WireGameData>,
    pub live_data: Option<WireLiveData>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGameData {
    pub teams: Option<WireHomeAway<WireTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireLiveData {
    pub boxscore: Option<WireBoxscore>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireHomeAway<T> {
    pub home: Option<T>,
    pub away: Option<T>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireBoxscore {
    pub teams: Option<WireHomeAway<WireBoxTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireBoxTeam {
    pub team: Option<WireTeam>,
    /// Keyed "ID{mlbId}".
    pub players: Option<HashMap<String, WireBoxPlayer>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireBoxPlayer {
    pub person: Option<WirePersonRef>,
    pub position: Option<WirePosition>,
    /// "300" means third in the order; substitutes get "301", "302", …
    pub batting_order: Option<String>,
    pub game_status: Option<WireBoxGameStatus>,
    pub all_positions: Option<Vec<WirePosition>>,
    pub stats: Option<WireBoxStats>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePersonRef {
    pub id: Option<u32>,
    pub full_name: Option<String>,
    pub primary_number: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireBoxGameStatus {
    pub is_current_batter: Option<bool>,
    pub is_current_pitcher: Option<bool>,
    pub is_on_bench: Option<bool>,
    pub is_substitute: Option<bool>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireBoxStats {
    pub batting: Option<WireBattingStats>,
    pub pitching: Option<WirePitchingStats>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireBattingStats {
    pub plate_appearances: Option<u32>,
    pub at_bats: Option<u32>,
    pub hits: Option<u32>,
    pub runs: Option<u32>,
    pub rbi: Option<u32>,
    pub home_runs: Option<u32>,
    pub strike_outs: Option<u32>,
    pub base_on_balls: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePitchingStats {
    pub innings_pitched: Option<String>,
    pub hits: Option<u32>,
    pub runs: Option<u32>,
    pub earned_runs: Option<u32>,
    pub strike_outs: Option<u32>,
    pub base_on_balls: Option<u32>,
    pub home_runs: Option<u32>,
}

// ---------------------------------------------------------------------------
// Play-by-play  (/game/{gamePk}/playByPlay)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayByPlayResponse {
    pub all_plays: Option<Vec<WirePlay>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePlay {
    pub result: Option<WirePlayResult>,
    pub about: Option<WirePlayAbout>,
    pub matchup: Option<WireMatchup>,
    pub at_bat_index: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePlayResult {
    /// Outcome category, e.g. "Home Run", "Strikeout".
    pub event: Option<String>,
    pub description: Option<String>,
    pub rbi: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayAbout {
    pub inning: Option<u32>,
    /// "top" | "bottom"
    pub half_inning: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatchup {
    pub batter: Option<WirePersonRef>,
    pub pitcher: Option<WirePersonRef>,
}
