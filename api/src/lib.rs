pub mod client;
pub mod detail;
pub mod resolver;
pub mod roster;
pub mod schedule;
pub mod statsapi;
pub mod translate;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Domain types — clean model, independent of the statsapi wire format
// ---------------------------------------------------------------------------

/// Competitive tier derived from the upstream sport id.
///
/// The Stats API tags every team with a numeric sport id; sport 1 is the
/// majors and the 5/11–16 range covers the affiliated minors. The "Advanced"
/// variants collapse into their parent tier for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Mlb,
    TripleA,
    DoubleA,
    SingleA,
    Rookie,
    #[default]
    Unknown,
}

impl Level {
    /// Pure sportId → tier mapping. Unknown ids map to `Unknown`, never fail.
    pub fn from_sport_id(sport_id: u32) -> Self {
        match sport_id {
            1 => Level::Mlb,
            11 => Level::TripleA,
            12 => Level::DoubleA,
            13 | 14 => Level::SingleA, // 13 is Single-A Advanced
            5 | 15 | 16 => Level::Rookie, // 5 Rookie Advanced, 15 Short Season A
            _ => Level::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Level::Mlb => "MLB",
            Level::TripleA => "Triple-A",
            Level::DoubleA => "Double-A",
            Level::SingleA => "Single-A",
            Level::Rookie => "Rookie",
            Level::Unknown => "Unknown",
        }
    }

    /// Display order: majors first, then down the ladder.
    pub const ALL: [Level; 6] = [
        Level::Mlb,
        Level::TripleA,
        Level::DoubleA,
        Level::SingleA,
        Level::Rookie,
        Level::Unknown,
    ];
}

/// One entry of the static tracked roster: the upstream id plus the Korean
/// display name, which the API does not carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedPlayer {
    pub mlb_id: u32,
    pub name_kr: &'static str,
}

/// Resolved view of a tracked player. Rebuilt on every resolution; the
/// roster's `name_kr` always overrides anything upstream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerInfo {
    pub mlb_id: u32,
    pub name_kr: String,
    pub name_en: String,
    pub team: String,
    pub team_id: u32,
    pub position: String,
    pub jersey_number: u8,
    pub level: Level,
    pub league: String,
    pub sport_id: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameStatus {
    #[default]
    Scheduled,
    Live,
    Final,
    Postponed,
    Cancelled,
}

impl GameStatus {
    /// Korean status label shown on schedule cards.
    pub fn label_kr(&self) -> &'static str {
        match self {
            GameStatus::Scheduled => "경기 예정",
            GameStatus::Live => "경기 중",
            GameStatus::Final => "경기 종료",
            GameStatus::Postponed => "연기",
            GameStatus::Cancelled => "취소",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameTeam {
    pub id: u32,
    pub name: String,
    pub score: Option<u32>,
}

/// One scheduled/played game. Dedup key across fetches is `game_pk`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Game {
    pub game_pk: u64,
    pub date: Option<DateTime<Utc>>,
    pub status: GameStatus,
    pub home: GameTeam,
    pub away: GameTeam,
    pub venue: String,
}

/// Korea Standard Time. Fixed UTC+9, no DST.
pub const KST: FixedOffset = FixedOffset::east_opt(9 * 3600).unwrap();

impl Game {
    pub fn is_live(&self) -> bool {
        self.status == GameStatus::Live
    }

    /// The stored instant shifted to KST for display. The underlying UTC
    /// value is never mutated.
    pub fn kst_time(&self) -> Option<DateTime<FixedOffset>> {
        self.date.map(|d| d.with_timezone(&KST))
    }

    /// "8/25 (월) 오전 8:05" style label, or "시간 미정" when the upstream
    /// date did not parse.
    pub fn kst_label(&self) -> String {
        let Some(kst) = self.kst_time() else {
            return "시간 미정".into();
        };
        use chrono::{Datelike, Timelike};
        let weekday = match kst.weekday() {
            chrono::Weekday::Mon => "월",
            chrono::Weekday::Tue => "화",
            chrono::Weekday::Wed => "수",
            chrono::Weekday::Thu => "목",
            chrono::Weekday::Fri => "금",
            chrono::Weekday::Sat => "토",
            chrono::Weekday::Sun => "일",
        };
        let (am_pm, hour12) = if kst.hour() < 12 {
            ("오전", if kst.hour() == 0 { 12 } else { kst.hour() })
        } else {
            ("오후", if kst.hour() == 12 { 12 } else { kst.hour() - 12 })
        };
        format!(
            "{}/{} ({}) {} {}:{:02}",
            kst.month(),
            kst.day(),
            weekday,
            am_pm,
            hour12,
            kst.minute()
        )
    }
}

// ---------------------------------------------------------------------------
// Game detail — per-player performance for one game
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BattingLine {
    pub plate_appearances: u32,
    pub at_bats: u32,
    pub hits: u32,
    pub runs: u32,
    pub rbi: u32,
    pub home_runs: u32,
    pub strikeouts: u32,
    pub walks: u32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PitchingLine {
    /// Upstream keeps innings as a string like "5.2" (5 and 2/3).
    pub innings_pitched: String,
    pub hits: u32,
    pub runs: u32,
    pub earned_runs: u32,
    pub strikeouts: u32,
    pub walks: u32,
    pub home_runs: u32,
}

/// One at-bat (or batter faced, for pitchers) from the play-by-play feed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InningEvent {
    pub inning: u32,
    /// "초" (top) or "말" (bottom).
    pub half_kr: &'static str,
    /// Translated outcome, e.g. "2루타".
    pub event_kr: String,
    pub description: String,
    pub rbi: u32,
    /// The opposing pitcher for a batter event, the batter for a pitcher event.
    pub opposing_player: String,
}

impl InningEvent {
    /// "7회 말" style label.
    pub fn inning_label(&self) -> String {
        format!("{}회 {}", self.inning, self.half_kr)
    }
}

/// Per-(game, player) summary assembled on demand when a game is opened.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerGamePerformance {
    pub mlb_id: u32,
    pub name_kr: String,
    pub name_en: String,
    pub team: String,
    pub position: String,
    pub batting_order: Option<u8>,
    pub played: bool,
    pub batting: Option<BattingLine>,
    pub pitching: Option<PitchingLine>,
    pub inning_events: Vec<InningEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn level_mapping_covers_documented_sport_ids() {
        assert_eq!(Level::from_sport_id(1), Level::Mlb);
        assert_eq!(Level::from_sport_id(11), Level::TripleA);
        assert_eq!(Level::from_sport_id(12), Level::DoubleA);
        assert_eq!(Level::from_sport_id(13), Level::SingleA);
        assert_eq!(Level::from_sport_id(14), Level::SingleA);
        assert_eq!(Level::from_sport_id(5), Level::Rookie);
        assert_eq!(Level::from_sport_id(15), Level::Rookie);
        assert_eq!(Level::from_sport_id(16), Level::Rookie);
    }

    #[test]
    fn level_mapping_defaults_to_unknown() {
        for sport_id in [0, 2, 17, 99, 12345] {
            assert_eq!(Level::from_sport_id(sport_id), Level::Unknown);
        }
    }

    #[test]
    fn kst_label_shifts_into_seoul_time() {
        // 2025-06-03 23:05 UTC is 2025-06-04 08:05 KST, a Wednesday.
        let game = Game {
            game_pk: 1,
            date: Some(Utc.with_ymd_and_hms(2025, 6, 3, 23, 5, 0).unwrap()),
            ..Default::default()
        };
        assert_eq!(game.kst_label(), "6/4 (수) 오전 8:05");
    }

    #[test]
    fn kst_label_handles_missing_date() {
        let game = Game::default();
        assert_eq!(game.kst_label(), "시간 미정");
    }

    #[test]
    fn status_labels_are_korean() {
        assert_eq!(GameStatus::Live.label_kr(), "경기 중");
        assert_eq!(GameStatus::Final.label_kr(), "경기 종료");
        assert_eq!(GameStatus::Scheduled.label_kr(), "경기 예정");
        assert_eq!(GameStatus::Postponed.label_kr(), "연기");
        assert_eq!(GameStatus::Cancelled.label_kr(), "취소");
    }

    #[test]
    fn inning_label_formats_half() {
        let ev = InningEvent { inning: 7, half_kr: "말", ..Default::default() };
        assert_eq!(ev.inning_label(), "7회 말");
    }
}
