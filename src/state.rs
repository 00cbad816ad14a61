use axum::extract::FromRef;

use crate::fetcher::AudioFetcher;

#[derive(Clone)]
pub struct AppState {
    pub fetcher: AudioFetcher,
}

impl FromRef<AppState> for AudioFetcher {
    fn from_ref(state: &AppState) -> Self {
        state.fetcher.clone()
    }
}
