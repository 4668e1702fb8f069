use crate::client::MlbApi;
use crate::statsapi::{WireSplit, WireTeam};
use crate::{Level, PlayerInfo, roster};
use chrono::{Datelike, Utc};
use futures_util::future::join_all;
use log::{debug, warn};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Sport id assumed for a game-log fallback entry that carries no sport
/// metadata. Rookie ball is the lowest tier the tracker recognizes.
const FALLBACK_SPORT_ID: u32 = 16;

pub const CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// Time source for cache expiry. Tests inject a manual clock so TTL
/// behavior is assertable without sleeping.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Short-lived per-player memo of successful resolutions. A fresh entry
/// short-circuits the network; a stale or missing one is replaced after the
/// next successful resolve. Failures are never cached.
pub struct PlayerCache {
    ttl: Duration,
    clock: Box<dyn Clock>,
    entries: Mutex<HashMap<u32, (PlayerInfo, Instant)>>,
}

impl PlayerCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_clock(ttl, Box::new(SystemClock))
    }

    pub fn with_clock(ttl: Duration, clock: Box<dyn Clock>) -> Self {
        Self { ttl, clock, entries: Mutex::new(HashMap::new()) }
    }

    fn get(&self, mlb_id: u32) -> Option<PlayerInfo> {
        let entries = self.entries.lock().expect("player cache poisoned");
        let (info, stored_at) = entries.get(&mlb_id)?;
        if self.clock.now().duration_since(*stored_at) < self.ttl {
            Some(info.clone())
        } else {
            None
        }
    }

    fn put(&self, info: PlayerInfo) {
        let now = self.clock.now();
        let mut entries = self.entries.lock().expect("player cache poisoned");
        entries.insert(info.mlb_id, (info, now));
    }
}

/// Resolves a tracked player's current team, position and tier from the
/// upstream API, overlaying the roster's Korean name.
pub struct PlayerResolver {
    api: MlbApi,
    cache: PlayerCache,
}

impl PlayerResolver {
    pub fn new(api: MlbApi) -> Self {
        Self::with_cache(api, PlayerCache::new(CACHE_TTL))
    }

    pub fn with_cache(api: MlbApi, cache: PlayerCache) -> Self {
        Self { api, cache }
    }

    /// Cached resolution. A fresh cache hit never touches the network.
    pub async fn resolve(&self, mlb_id: u32) -> Option<PlayerInfo> {
        if let Some(cached) = self.cache.get(mlb_id) {
            return Some(cached);
        }
        let info = self.resolve_fresh(mlb_id).await?;
        self.cache.put(info.clone());
        Some(info)
    }

    /// Uncached resolution.
    ///
    /// A player with no current team (free agent, or between assignments) is
    /// recovered from the most recent game-log entry across every recognized
    /// tier. Any failure yields `None` — callers omit the player, they never
    /// abort the batch.
    pub async fn resolve_fresh(&self, mlb_id: u32) -> Option<PlayerInfo> {
        let people = match self.api.fetch_person(mlb_id).await {
            Ok(resp) => resp,
            Err(e) => {
                warn!("player {mlb_id}: person fetch failed: {e}");
                return None;
            }
        };
        let person = people.people.unwrap_or_default().into_iter().next()?;

        let mut team = person.current_team.clone();
        let mut sport_id = 1;

        if team.is_none() {
            let season = Utc::now().year();
            match self.api.fetch_game_log(mlb_id, season, None).await {
                Ok(stats) => {
                    if let Some(split) = latest_split(stats.stats.unwrap_or_default()) {
                        sport_id = split
                            .sport
                            .as_ref()
                            .and_then(|s| s.id)
                            .unwrap_or(FALLBACK_SPORT_ID);
                        team = split.team;
                    } else {
                        debug!("player {mlb_id}: no game log entries this season");
                    }
                }
                Err(e) => warn!("player {mlb_id}: game log fallback failed: {e}"),
            }
        }

        // A hydrated team carries its own sport id, which wins over the
        // game-log guess.
        if let Some(id) = team.as_ref().and_then(|t| t.sport.as_ref()).and_then(|s| s.id) {
            sport_id = id;
        }

        let level = Level::from_sport_id(sport_id);
        let league = if level == Level::Unknown {
            team_league_name(team.as_ref())
        } else {
            level.label().to_owned()
        };

        Some(PlayerInfo {
            mlb_id,
            name_kr: roster::korean_name(mlb_id).to_owned(),
            name_en: person.full_name.unwrap_or_default(),
            team: team
                .as_ref()
                .and_then(|t| t.name.clone())
                .unwrap_or_else(|| "Free Agent".into()),
            team_id: team.as_ref().and_then(|t| t.id).unwrap_or(0),
            position: person
                .primary_position
                .and_then(|p| p.abbreviation)
                .unwrap_or_default(),
            jersey_number: person
                .primary_number
                .and_then(|n| n.trim().parse().ok())
                .unwrap_or(0),
            level,
            league,
            sport_id,
        })
    }

    /// Independent concurrent resolutions; failed players are simply
    /// filtered out of the result.
    pub async fn resolve_all(&self, mlb_ids: &[u32]) -> Vec<PlayerInfo> {
        let results = join_all(mlb_ids.iter().map(|&id| self.resolve(id))).await;
        results.into_iter().flatten().collect()
    }
}

/// Most recent game-log split. The upstream log is newest-first, but sort by
/// date anyway rather than trusting response ordering.
fn latest_split(groups: Vec<crate::statsapi::WireStatGroup>) -> Option<WireSplit> {
    let mut splits: Vec<WireSplit> = groups
        .into_iter()
        .flat_map(|g| g.splits.unwrap_or_default())
        .collect();
    splits.sort_by(|a, b| b.date.cmp(&a.date));
    splits.into_iter().next()
}

fn team_league_name(team: Option<&WireTeam>) -> String {
    team.and_then(|t| t.league.as_ref())
        .and_then(|l| l.name.clone())
        .unwrap_or_default()
}

/// Bucket resolved players by tier, majors first. Empty tiers are omitted.
pub fn group_by_level(players: &[PlayerInfo]) -> Vec<(Level, Vec<PlayerInfo>)> {
    Level::ALL
        .iter()
        .filter_map(|&level| {
            let bucket: Vec<PlayerInfo> = players
                .iter()
                .filter(|p| p.level == level)
                .cloned()
                .collect();
            if bucket.is_empty() { None } else { Some((level, bucket)) }
        })
        .collect()
}
