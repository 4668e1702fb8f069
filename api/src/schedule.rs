use crate::client::MlbApi;
use crate::statsapi::{WireGameStatus, WireScheduleGame, WireSplit};
use crate::{Game, GameStatus, GameTeam, PlayerInfo};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use futures_util::future::join_all;
use log::{debug, warn};
use std::collections::HashSet;

/// Per-player appearance lookup bounds: newest N played games within the
/// lookback horizon.
const RECENT_GAMES_LIMIT: usize = 100;
const LOOKBACK_DAYS: i64 = 60;

/// Days covered by the initial window (yesterday through today+6) and by
/// each subsequent expansion.
const INITIAL_PAST_DAYS: u32 = 1;
const INITIAL_FUTURE_DAYS: u32 = 6;
const EXPANSION_DAYS: u32 = 7;

/// Map the upstream status pair onto the domain status. Detailed-state
/// substrings win over the abstract state; anything unrecognized is treated
/// as scheduled.
pub fn derive_status(status: Option<&WireGameStatus>) -> GameStatus {
    let detailed = status.and_then(|s| s.detailed_state.as_deref()).unwrap_or("");
    if detailed.contains("Postponed") {
        return GameStatus::Postponed;
    }
    if detailed.contains("Cancelled") {
        return GameStatus::Cancelled;
    }
    let abstract_state = status
        .and_then(|s| s.abstract_game_state.as_deref())
        .unwrap_or("")
        .to_ascii_lowercase();
    match abstract_state.as_str() {
        "live" | "in progress" => GameStatus::Live,
        "final" => GameStatus::Final,
        _ => GameStatus::Scheduled,
    }
}

/// Map one schedule entry to the domain `Game`. Entries without a gamePk
/// cannot be deduplicated and are dropped; an unparsable date keeps the game
/// with `date = None`.
pub fn map_game(wire: WireScheduleGame) -> Option<Game> {
    let game_pk = wire.game_pk?;
    let date = wire
        .game_date
        .as_deref()
        .and_then(|d| DateTime::parse_from_rfc3339(d).ok())
        .map(|d| d.with_timezone(&Utc));
    let status = derive_status(wire.status.as_ref());

    let side = |s: Option<crate::statsapi::WireScheduleSide>| {
        let s = s.unwrap_or_default();
        GameTeam {
            id: s.team.as_ref().and_then(|t| t.id).unwrap_or(0),
            name: s.team.and_then(|t| t.name).unwrap_or_default(),
            score: s.score,
        }
    };
    let sides = wire.teams.unwrap_or_default();

    Some(Game {
        game_pk,
        date,
        status,
        home: side(sides.home),
        away: side(sides.away),
        venue: wire.venue.and_then(|v| v.name).unwrap_or_default(),
    })
}

/// Fetches date windows of games relevant to the tracked roster.
///
/// Live and scheduled games are always relevant. A game that is already
/// decided (final, postponed, cancelled) is only shown when a tracked player
/// verifiably appeared in it, via the per-player recent-appearance lookup.
pub struct ScheduleAggregator {
    api: MlbApi,
}

impl ScheduleAggregator {
    pub fn new(api: MlbApi) -> Self {
        Self { api }
    }

    pub async fn fetch_window(
        &self,
        players: &[PlayerInfo],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Vec<Game> {
        let mut team_ids: Vec<u32> = players.iter().map(|p| p.team_id).filter(|&id| id > 0).collect();
        team_ids.sort_unstable();
        team_ids.dedup();

        let schedule = match self.api.fetch_schedule(start, end, &team_ids).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("schedule fetch {start}..{end} failed: {e}");
                return Vec::new();
            }
        };

        let appeared = self.appearance_set(players).await;

        let mut games: Vec<Game> = schedule
            .dates
            .unwrap_or_default()
            .into_iter()
            .flat_map(|d| d.games.unwrap_or_default())
            .filter_map(map_game)
            .filter(|g| match g.status {
                GameStatus::Live | GameStatus::Scheduled => true,
                // Participation is only knowable after the fact; decided
                // games without roster involvement are noise.
                GameStatus::Final | GameStatus::Postponed | GameStatus::Cancelled => {
                    appeared.contains(&g.game_pk)
                }
            })
            .collect();

        sort_by_date(&mut games);
        debug!("window {start}..{end}: {} games kept", games.len());
        games
    }

    /// All gamePks any tracked player is known to have appeared in recently.
    /// Per-player lookups run concurrently and fail independently.
    async fn appearance_set(&self, players: &[PlayerInfo]) -> HashSet<u64> {
        let season = Utc::now().year();
        let lookups = players.iter().map(|p| async move {
            match self.api.fetch_game_log(p.mlb_id, season, Some(p.sport_id)).await {
                Ok(resp) => played_game_pks(
                    resp.stats
                        .unwrap_or_default()
                        .into_iter()
                        .flat_map(|g| g.splits.unwrap_or_default())
                        .collect(),
                ),
                Err(e) => {
                    warn!("player {}: recent games lookup failed: {e}", p.mlb_id);
                    Vec::new()
                }
            }
        });
        join_all(lookups).await.into_iter().flatten().collect()
    }
}

/// Filter a game log down to entries where the player actually batted or
/// pitched, newest first, bounded by count and lookback horizon.
fn played_game_pks(mut splits: Vec<WireSplit>) -> Vec<u64> {
    let horizon = (Utc::now() - Duration::days(LOOKBACK_DAYS)).date_naive();
    splits.retain(|s| {
        let within_horizon = s
            .date
            .as_deref()
            .and_then(|d| d.parse::<NaiveDate>().ok())
            .map(|d| d >= horizon)
            .unwrap_or(false);
        within_horizon && split_shows_appearance(s)
    });
    splits.sort_by(|a, b| b.date.cmp(&a.date));
    splits
        .into_iter()
        .take(RECENT_GAMES_LIMIT)
        .filter_map(|s| s.game.and_then(|g| g.game_pk))
        .collect()
}

/// An appearance means innings actually pitched, or at least one plate
/// appearance / at-bat.
fn split_shows_appearance(split: &WireSplit) -> bool {
    let Some(stat) = split.stat.as_ref() else {
        return false;
    };
    let pitched = stat
        .innings_pitched
        .as_deref()
        .and_then(|ip| ip.parse::<f32>().ok())
        .map(|ip| ip > 0.0)
        .unwrap_or(false);
    pitched
        || stat.plate_appearances.map(|pa| pa > 0).unwrap_or(false)
        || stat.at_bats.map(|ab| ab > 0).unwrap_or(false)
}

fn sort_by_date(games: &mut [Game]) {
    // Ascending; unparsable dates sort last.
    games.sort_by_key(|g| (g.date.is_none(), g.date));
}

// ---------------------------------------------------------------------------
// Incremental window state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Initial,
    Past,
    Future,
}

/// The merged rolling window plus the pagination counters.
///
/// Each direction carries its own in-flight guard: `begin` hands out a date
/// range at most once per outstanding request, so two "load more" presses
/// cannot expand the same side twice. Merging is keyed by gamePk and
/// first-seen wins — a later fetch never overwrites an existing entry.
#[derive(Debug, Default)]
pub struct ScheduleWindow {
    games: Vec<Game>,
    past_days_loaded: u32,
    future_days_loaded: u32,
    past_in_flight: bool,
    future_in_flight: bool,
}

impl ScheduleWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self) -> &[Game] {
        &self.games
    }

    pub fn is_loading(&self) -> bool {
        self.past_in_flight || self.future_in_flight
    }

    /// Date range for the next fetch in `direction`, or `None` while a fetch
    /// for that direction is still outstanding.
    pub fn begin(&mut self, direction: Direction, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match direction {
            Direction::Initial => {
                // A full reload supersedes any pending expansion. The
                // expansion formulas below already account for the initial
                // yesterday..today+6 span, so both counters restart at zero.
                self.past_in_flight = false;
                self.future_in_flight = false;
                self.past_days_loaded = 0;
                self.future_days_loaded = 0;
                Some((
                    today - Duration::days(i64::from(INITIAL_PAST_DAYS)),
                    today + Duration::days(i64::from(INITIAL_FUTURE_DAYS)),
                ))
            }
            Direction::Past => {
                if self.past_in_flight {
                    return None;
                }
                self.past_in_flight = true;
                let loaded = i64::from(self.past_days_loaded);
                self.past_days_loaded += EXPANSION_DAYS;
                Some((
                    today - Duration::days(loaded + 8),
                    today - Duration::days(loaded + 2),
                ))
            }
            Direction::Future => {
                if self.future_in_flight {
                    return None;
                }
                self.future_in_flight = true;
                let loaded = i64::from(self.future_days_loaded);
                self.future_days_loaded += EXPANSION_DAYS;
                Some((
                    today + Duration::days(loaded + 7),
                    today + Duration::days(loaded + 13),
                ))
            }
        }
    }

    /// Apply the games fetched for `direction` and release its guard.
    /// Initial results replace the window; expansions merge into it.
    pub fn finish(&mut self, direction: Direction, fetched: Vec<Game>) {
        match direction {
            Direction::Initial => {
                self.games = fetched;
                sort_by_date(&mut self.games);
            }
            Direction::Past => {
                self.past_in_flight = false;
                self.merge(fetched);
            }
            Direction::Future => {
                self.future_in_flight = false;
                self.merge(fetched);
            }
        }
    }

    fn merge(&mut self, fetched: Vec<Game>) {
        let existing: HashSet<u64> = self.games.iter().map(|g| g.game_pk).collect();
        self.games
            .extend(fetched.into_iter().filter(|g| !existing.contains(&g.game_pk)));
        sort_by_date(&mut self.games);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use mockito::Matcher;

    fn wire_status(abstract_state: &str, detailed: &str) -> WireGameStatus {
        WireGameStatus {
            abstract_game_state: Some(abstract_state.into()),
            detailed_state: Some(detailed.into()),
        }
    }

    #[test]
    fn status_derivation_follows_abstract_state() {
        assert_eq!(derive_status(Some(&wire_status("Live", "In Progress"))), GameStatus::Live);
        assert_eq!(derive_status(Some(&wire_status("Final", "Final"))), GameStatus::Final);
        assert_eq!(derive_status(Some(&wire_status("Preview", "Scheduled"))), GameStatus::Scheduled);
        assert_eq!(derive_status(None), GameStatus::Scheduled);
        assert_eq!(derive_status(Some(&wire_status("Weather", ""))), GameStatus::Scheduled);
    }

    #[test]
    fn detailed_state_overrides_abstract_state() {
        assert_eq!(
            derive_status(Some(&wire_status("Final", "Postponed: Rain"))),
            GameStatus::Postponed
        );
        assert_eq!(
            derive_status(Some(&wire_status("Preview", "Cancelled"))),
            GameStatus::Cancelled
        );
    }

    #[test]
    fn games_without_game_pk_are_dropped() {
        assert!(map_game(WireScheduleGame::default()).is_none());
    }

    fn game(pk: u64, day: u32) -> Game {
        Game {
            game_pk: pk,
            date: Some(Utc.with_ymd_and_hms(2025, 6, day, 0, 0, 0).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn merge_dedups_by_game_pk_first_seen_wins() {
        let mut window = ScheduleWindow::new();
        window.finish(Direction::Initial, vec![game(1, 1), game(2, 2), game(3, 3)]);

        // The overlapping copy of game 2 carries a different date; the
        // pre-existing entry must survive untouched.
        let mut newer_two = game(2, 20);
        newer_two.venue = "replacement".into();
        window.finish(Direction::Future, vec![newer_two, game(3, 3), game(4, 4)]);

        let pks: Vec<u64> = window.games().iter().map(|g| g.game_pk).collect();
        assert_eq!(pks, vec![1, 2, 3, 4]);
        let two = window.games().iter().find(|g| g.game_pk == 2).unwrap();
        assert_eq!(two.venue, "");
        assert_eq!(two.date, game(2, 2).date);
    }

    #[test]
    fn window_ranges_match_the_expansion_schedule() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut window = ScheduleWindow::new();

        let (start, end) = window.begin(Direction::Initial, today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 14).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 6, 21).unwrap());

        let (start, end) = window.begin(Direction::Past, today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 7).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 6, 13).unwrap());

        let (start, end) = window.begin(Direction::Future, today).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 6, 22).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 6, 28).unwrap());
    }

    #[test]
    fn expansions_tile_the_calendar_without_gaps() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut window = ScheduleWindow::new();

        let (mut earliest, mut latest) = window.begin(Direction::Initial, today).unwrap();
        window.finish(Direction::Initial, Vec::new());

        // Every expansion must abut the span fetched so far; a one-day seam
        // on either side would silently hide games forever.
        for _ in 0..4 {
            let (start, end) = window.begin(Direction::Past, today).unwrap();
            window.finish(Direction::Past, Vec::new());
            assert_eq!(end + Duration::days(1), earliest, "past expansion left a gap");
            earliest = start;

            let (start, end) = window.begin(Direction::Future, today).unwrap();
            window.finish(Direction::Future, Vec::new());
            assert_eq!(start, latest + Duration::days(1), "future expansion left a gap");
            latest = end;
        }
    }

    #[test]
    fn in_flight_guard_suppresses_same_direction_expansion() {
        let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let mut window = ScheduleWindow::new();
        window.begin(Direction::Initial, today);

        assert!(window.begin(Direction::Future, today).is_some());
        assert!(window.begin(Direction::Future, today).is_none(), "same direction must be serialized");
        assert!(window.begin(Direction::Past, today).is_some(), "opposite direction is unconstrained");

        window.finish(Direction::Future, Vec::new());
        assert!(window.begin(Direction::Future, today).is_some());
    }

    #[test]
    fn appearance_filter_requires_batting_or_pitching() {
        use crate::statsapi::{WireGameRef, WireSplitStat};
        let today = Utc::now().date_naive().to_string();
        let split = |stat: WireSplitStat, pk: u64| WireSplit {
            date: Some(today.clone()),
            game: Some(WireGameRef { game_pk: Some(pk) }),
            stat: Some(stat),
            ..Default::default()
        };

        let pks = played_game_pks(vec![
            split(WireSplitStat { at_bats: Some(0), plate_appearances: Some(0), innings_pitched: None }, 1),
            split(WireSplitStat { at_bats: Some(0), plate_appearances: Some(1), innings_pitched: None }, 2),
            split(WireSplitStat { at_bats: None, plate_appearances: None, innings_pitched: Some("0.2".into()) }, 3),
            split(WireSplitStat { at_bats: None, plate_appearances: None, innings_pitched: Some("0.0".into()) }, 4),
        ]);
        assert_eq!(pks.len(), 2);
        assert!(pks.contains(&2) && pks.contains(&3));
    }

    #[tokio::test]
    async fn finished_games_need_a_roster_appearance() {
        let mut server = mockito::Server::new_async().await;
        let schedule_body = r#"{"dates": [{"games": [
            {"gamePk": 100, "gameDate": "2025-06-14T23:05:00Z",
             "status": {"abstractGameState": "Live", "detailedState": "In Progress"},
             "teams": {"home": {"team": {"id": 135, "name": "San Diego Padres"}},
                       "away": {"team": {"id": 119, "name": "Los Angeles Dodgers"}}}},
            {"gamePk": 200, "gameDate": "2025-06-13T23:05:00Z",
             "status": {"abstractGameState": "Final", "detailedState": "Final"},
             "teams": {"home": {"team": {"id": 135, "name": "San Diego Padres"}},
                       "away": {"team": {"id": 119, "name": "Los Angeles Dodgers"}}}},
            {"gamePk": 300, "gameDate": "2025-06-12T23:05:00Z",
             "status": {"abstractGameState": "Final", "detailedState": "Final"},
             "teams": {"home": {"team": {"id": 140, "name": "Texas Rangers"}},
                       "away": {"team": {"id": 141, "name": "Toronto Blue Jays"}}}}
        ]}]}"#;
        let _schedule = server
            .mock("GET", "/schedule")
            .match_query(Matcher::Any)
            .with_body(schedule_body)
            .create_async()
            .await;

        let today = Utc::now().date_naive();
        let log_body = format!(
            r#"{{"stats": [{{"splits": [{{
                "date": "{today}",
                "stat": {{"atBats": 4, "plateAppearances": 4}},
                "game": {{"gamePk": 200}}
            }}]}}]}}"#
        );
        let _log = server
            .mock("GET", "/people/673490/stats")
            .match_query(Matcher::Any)
            .with_body(log_body)
            .create_async()
            .await;

        let player = PlayerInfo {
            mlb_id: 673490,
            team_id: 135,
            sport_id: 1,
            ..Default::default()
        };
        let aggregator = ScheduleAggregator::new(MlbApi::with_base_url(server.url()));
        let start = NaiveDate::from_ymd_opt(2025, 6, 12).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let games = aggregator.fetch_window(&[player], start, end).await;

        let pks: Vec<u64> = games.iter().map(|g| g.game_pk).collect();
        // Live game 100 always shows; final 200 has an appearance; final 300
        // does not and is filtered out.
        assert!(pks.contains(&100));
        assert!(pks.contains(&200));
        assert!(!pks.contains(&300));
        assert_eq!(pks.len(), 2);
    }
}
