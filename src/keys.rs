use crate::app::{App, MenuItem};
use crate::state::messages::NetworkRequest;
use chrono::{NaiveDate, Utc};
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use mlb_api::KST;
use mlb_api::schedule::Direction;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// "Today" for windowing purposes is the Korean calendar day.
fn today_kst() -> NaiveDate {
    Utc::now().with_timezone(&KST).date_naive()
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) {
    let mut guard = app.lock().await;

    match (guard.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }

        // Tab switching
        (_, Char('1'), _) => guard.update_tab(MenuItem::Players),
        (_, Char('2'), _) => guard.update_tab(MenuItem::Schedule),
        (_, Char('3'), _) => guard.update_tab(MenuItem::GameDetail),
        (_, Char('?'), _) => guard.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => guard.exit_help(),

        // Manual refresh — the schedule reload rides on PlayersLoaded.
        (_, Char('r'), _) => {
            drop(guard);
            let _ = network_requests.send(NetworkRequest::LoadPlayers).await;
            return;
        }

        // Players navigation
        (MenuItem::Players, Char('j') | KeyCode::Down, _) => {
            guard.state.players.navigate_down();
        }
        (MenuItem::Players, Char('k') | KeyCode::Up, _) => {
            guard.state.players.navigate_up();
        }

        // Schedule navigation
        (MenuItem::Schedule, Char('j') | KeyCode::Down, _) => {
            guard.state.schedule.navigate_down();
        }
        (MenuItem::Schedule, Char('k') | KeyCode::Up, _) => {
            guard.state.schedule.navigate_up();
        }
        (MenuItem::Schedule, Char('['), _) => {
            // The window hands out a range at most once per outstanding fetch.
            if let Some((start, end)) =
                guard.state.schedule.window.begin(Direction::Past, today_kst())
            {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadSchedule { start, end, direction: Direction::Past })
                    .await;
                return;
            }
        }
        (MenuItem::Schedule, Char(']'), _) => {
            if let Some((start, end)) =
                guard.state.schedule.window.begin(Direction::Future, today_kst())
            {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadSchedule { start, end, direction: Direction::Future })
                    .await;
                return;
            }
        }
        (MenuItem::Schedule, KeyCode::Enter, _) => {
            if let Some(game_pk) = guard.schedule_select_game() {
                drop(guard);
                let _ = network_requests
                    .send(NetworkRequest::LoadGameDetail { game_pk })
                    .await;
                return;
            }
        }

        // Game detail navigation
        (MenuItem::GameDetail, Char('j') | KeyCode::Down, _) => {
            guard.state.game_detail.scroll_offset =
                guard.state.game_detail.scroll_offset.saturating_add(1);
        }
        (MenuItem::GameDetail, Char('k') | KeyCode::Up, _) => {
            guard.state.game_detail.scroll_offset =
                guard.state.game_detail.scroll_offset.saturating_sub(1);
        }
        (MenuItem::GameDetail, KeyCode::Esc, _) => guard.update_tab(MenuItem::Schedule),

        // Global
        (_, Char('f'), _) => guard.toggle_full_screen(),
        (_, Char('"'), _) => guard.toggle_show_logs(),

        _ => {}
    }
}
