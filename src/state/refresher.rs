use crate::state::messages::NetworkRequest;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Periodic roster refresh, matching the resolver cache TTL so a tick always
/// re-resolves from upstream. The schedule reload rides on the PlayersLoaded
/// response, so one request here refreshes both tabs.
pub struct PeriodicRefresher {
    network_requests: mpsc::Sender<NetworkRequest>,
}

impl PeriodicRefresher {
    pub fn new(network_requests: mpsc::Sender<NetworkRequest>) -> Self {
        Self { network_requests }
    }

    pub async fn run(self) {
        let mut refresh_interval = interval(mlb_api::resolver::CACHE_TTL + Duration::from_secs(1));
        // Skip the immediate first tick so startup loading isn't double-triggered.
        refresh_interval.tick().await;

        loop {
            refresh_interval.tick().await;
            let _ = self
                .network_requests
                .send(NetworkRequest::LoadPlayers)
                .await;
        }
    }
}
