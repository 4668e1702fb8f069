use crate::state::app_settings::AppSettings;
use crate::state::app_state::AppState;
use mlb_api::schedule::Direction;
use mlb_api::{Game, PlayerGamePerformance, PlayerInfo};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Players,
    Schedule,
    GameDetail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new() -> Self {
        let settings = AppSettings::load();

        let app = Self {
            state: AppState::new(),
            settings,
        };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Network response handlers — called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_players_loaded(&mut self, players: Vec<PlayerInfo>) {
        self.state.last_error = None;
        self.state.players.load(players);
    }

    pub fn on_schedule_loaded(&mut self, direction: Direction, games: Vec<Game>) {
        self.state.last_error = None;
        self.state.schedule.window.finish(direction, games);
        self.state.schedule.clamp_selection();
    }

    pub fn on_game_detail_loaded(&mut self, game_pk: u64, performances: Vec<PlayerGamePerformance>) {
        self.state.last_error = None;
        let game_changed = self.state.game_detail.game_pk != Some(game_pk);
        self.state.game_detail.game_pk = Some(game_pk);
        self.state.game_detail.performances = performances;
        if game_changed {
            self.state.game_detail.scroll_offset = 0;
        }
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Schedule navigation — delegated to ScheduleState
    // -----------------------------------------------------------------------

    /// Returns the gamePk if the user pressed Enter on a game.
    /// Switches to the GameDetail tab as a side-effect.
    pub fn schedule_select_game(&mut self) -> Option<u64> {
        let game_pk = self.state.schedule.selected_game_pk()?;
        self.update_tab(MenuItem::GameDetail);
        Some(game_pk)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(game_pk: u64) -> Game {
        Game { game_pk, ..Default::default() }
    }

    #[test]
    fn selecting_a_game_switches_to_the_detail_tab() {
        let mut app = App::new();
        app.state.schedule.window.finish(Direction::Initial, vec![game(7)]);
        assert_eq!(app.schedule_select_game(), Some(7));
        assert_eq!(app.state.active_tab, MenuItem::GameDetail);
    }

    #[test]
    fn selecting_with_no_games_keeps_the_tab() {
        let mut app = App::new();
        assert_eq!(app.schedule_select_game(), None);
        assert_eq!(app.state.active_tab, MenuItem::Players);
    }

    #[test]
    fn detail_scroll_resets_only_when_the_game_changes() {
        let mut app = App::new();
        app.on_game_detail_loaded(1, Vec::new());
        app.state.game_detail.scroll_offset = 5;
        app.on_game_detail_loaded(1, Vec::new());
        assert_eq!(app.state.game_detail.scroll_offset, 5);
        app.on_game_detail_loaded(2, Vec::new());
        assert_eq!(app.state.game_detail.scroll_offset, 0);
    }

    #[test]
    fn help_returns_to_the_previous_tab() {
        let mut app = App::new();
        app.update_tab(MenuItem::Schedule);
        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Schedule);
    }
}
