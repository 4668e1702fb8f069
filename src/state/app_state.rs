use crate::app::MenuItem;
use mlb_api::resolver::group_by_level;
use mlb_api::schedule::ScheduleWindow;
use mlb_api::{Level, PlayerGamePerformance, PlayerInfo};

// ---------------------------------------------------------------------------
// Players tab state
// ---------------------------------------------------------------------------

/// Tracked roster grouped by competitive tier. Rebuilt wholesale on every
/// successful resolution pass; selection survives as long as it stays in
/// bounds.
#[derive(Debug, Default)]
pub struct PlayersState {
    pub grouped: Vec<(Level, Vec<PlayerInfo>)>,
    pub selected: usize,
    pub scroll_offset: u16,
}

impl PlayersState {
    pub fn load(&mut self, players: Vec<PlayerInfo>) {
        self.grouped = group_by_level(&players);
        let total = self.player_count();
        if self.selected >= total {
            self.selected = total.saturating_sub(1);
        }
    }

    pub fn player_count(&self) -> usize {
        self.grouped.iter().map(|(_, p)| p.len()).sum()
    }

    pub fn navigate_down(&mut self) {
        let max = self.player_count().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

// ---------------------------------------------------------------------------
// Schedule tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct ScheduleState {
    pub window: ScheduleWindow,
    pub selected: usize,
    pub scroll_offset: u16,
}

impl ScheduleState {
    pub fn clamp_selection(&mut self) {
        let total = self.window.games().len();
        if self.selected >= total {
            self.selected = total.saturating_sub(1);
        }
    }

    pub fn navigate_down(&mut self) {
        let max = self.window.games().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn navigate_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_game_pk(&self) -> Option<u64> {
        self.window.games().get(self.selected).map(|g| g.game_pk)
    }
}

// ---------------------------------------------------------------------------
// Game detail tab state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct GameDetailState {
    pub game_pk: Option<u64>,
    pub performances: Vec<PlayerGamePerformance>,
    pub scroll_offset: u16,
}

// ---------------------------------------------------------------------------
// Root app state
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub show_logs: bool,
    pub last_error: Option<String>,
    pub players: PlayersState,
    pub schedule: ScheduleState,
    pub game_detail: GameDetailState,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
