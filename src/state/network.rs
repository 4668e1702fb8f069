use crate::state::messages::{NetworkRequest, NetworkResponse};
use chrono::NaiveDate;
use log::{debug, error};
use mlb_api::client::{ApiError, MlbApi};
use mlb_api::resolver::PlayerResolver;
use mlb_api::schedule::{Direction, ScheduleAggregator};
use mlb_api::{PlayerInfo, detail, roster};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::mpsc;

const SPINNER_CHARS: [char; 10] = ['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
pub const ERROR_CHAR: char = '!';

#[derive(Debug, Copy, Clone)]
pub struct LoadingState {
    pub is_loading: bool,
    pub spinner_char: char,
}

impl Default for LoadingState {
    fn default() -> Self {
        Self { is_loading: false, spinner_char: ' ' }
    }
}

/// Owns all upstream traffic. Requests arrive on a channel and are handled
/// one at a time; the UI never blocks on the network.
pub struct NetworkWorker {
    api: MlbApi,
    resolver: PlayerResolver,
    aggregator: ScheduleAggregator,
    /// Last successfully resolved roster, reused for schedule team ids.
    players: Vec<PlayerInfo>,
    requests: mpsc::Receiver<NetworkRequest>,
    responses: mpsc::Sender<NetworkResponse>,
    is_loading: Arc<AtomicBool>,
}

impl NetworkWorker {
    pub fn new(
        requests: mpsc::Receiver<NetworkRequest>,
        responses: mpsc::Sender<NetworkResponse>,
    ) -> Self {
        let api = MlbApi::new();
        Self {
            resolver: PlayerResolver::new(api.clone()),
            aggregator: ScheduleAggregator::new(api.clone()),
            api,
            players: Vec::new(),
            requests,
            responses,
            is_loading: Arc::new(AtomicBool::new(false)),
        }
    }

    pub async fn run(mut self) {
        while let Some(request) = self.requests.recv().await {
            self.start_loading_animation().await;

            let result = match request {
                NetworkRequest::LoadPlayers => self.handle_load_players().await,
                NetworkRequest::LoadSchedule { start, end, direction } => {
                    self.handle_load_schedule(start, end, direction).await
                }
                NetworkRequest::LoadGameDetail { game_pk } => {
                    self.handle_load_game_detail(game_pk).await
                }
            };

            debug!("network request complete");
            self.stop_loading_animation(result.is_ok()).await;

            let response = result.unwrap_or_else(|err| NetworkResponse::Error {
                message: err.to_string(),
            });

            if let Err(e) = self.responses.send(response).await {
                error!("Failed to send network response: {e}");
                break;
            }
        }
    }

    async fn handle_load_players(&mut self) -> Result<NetworkResponse, ApiError> {
        debug!("resolving tracked roster");
        let players = self.resolver.resolve_all(&roster::tracked_ids()).await;
        if players.is_empty() {
            return Err(ApiError::Other("no tracked player could be resolved".into()));
        }
        self.players = players.clone();
        Ok(NetworkResponse::PlayersLoaded { players })
    }

    async fn handle_load_schedule(
        &mut self,
        start: NaiveDate,
        end: NaiveDate,
        direction: Direction,
    ) -> Result<NetworkResponse, ApiError> {
        if self.players.is_empty() {
            debug!("schedule requested before the roster resolved, resolving now");
            self.players = self.resolver.resolve_all(&roster::tracked_ids()).await;
        }
        debug!("loading schedule window {start}..{end}");
        let games = self.aggregator.fetch_window(&self.players, start, end).await;
        Ok(NetworkResponse::ScheduleLoaded { direction, games })
    }

    async fn handle_load_game_detail(&self, game_pk: u64) -> Result<NetworkResponse, ApiError> {
        debug!("loading game detail for {game_pk}");
        let performances = detail::fetch_performances(&self.api, game_pk, &roster::tracked_ids()).await;
        Ok(NetworkResponse::GameDetailLoaded { game_pk, performances })
    }

    async fn start_loading_animation(&self) {
        self.is_loading.store(true, Ordering::Relaxed);

        let mut loading_state =
            LoadingState { is_loading: true, spinner_char: SPINNER_CHARS[0] };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged { loading_state })
            .await;

        let responses = self.responses.clone();
        let is_loading = self.is_loading.clone();

        tokio::spawn(async move {
            let mut spinner_index = 1;
            let mut interval = tokio::time::interval(Duration::from_millis(33));
            loop {
                interval.tick().await;
                if !is_loading.load(Ordering::Relaxed) {
                    break;
                }
                loading_state.spinner_char = SPINNER_CHARS[spinner_index];
                spinner_index = (spinner_index + 1) % SPINNER_CHARS.len();
                let _ = responses
                    .send(NetworkResponse::LoadingStateChanged { loading_state })
                    .await;
            }
        });
    }

    async fn stop_loading_animation(&self, is_ok: bool) {
        self.is_loading.store(false, Ordering::Relaxed);
        tokio::time::sleep(Duration::from_millis(15)).await;

        let spinner_char = if is_ok { ' ' } else { ERROR_CHAR };
        let _ = self
            .responses
            .send(NetworkResponse::LoadingStateChanged {
                loading_state: LoadingState { is_loading: false, spinner_char },
            })
            .await;
    }
}
