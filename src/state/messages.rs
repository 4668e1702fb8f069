use crate::state::network::LoadingState;
use chrono::NaiveDate;
use crossterm::event::KeyEvent;
use mlb_api::schedule::Direction;
use mlb_api::{Game, PlayerGamePerformance, PlayerInfo};

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadPlayers,
    LoadSchedule {
        start: NaiveDate,
        end: NaiveDate,
        direction: Direction,
    },
    LoadGameDetail {
        game_pk: u64,
    },
}

#[derive(Debug)]
pub enum NetworkResponse {
    LoadingStateChanged { loading_state: LoadingState },
    PlayersLoaded { players: Vec<PlayerInfo> },
    ScheduleLoaded { direction: Direction, games: Vec<Game> },
    GameDetailLoaded { game_pk: u64, performances: Vec<PlayerGamePerformance> },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
}
