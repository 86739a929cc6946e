use crate::api_client::PromotionApi;
use crate::config::ConsoleConfig;
use crate::sessions::SessionStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: ConsoleConfig,
    pub sessions: SessionStore,
}

impl AppState {
    pub fn new(config: ConsoleConfig, api: Arc<dyn PromotionApi>) -> Self {
        let sessions = SessionStore::new(api, config.session_idle());
        Self { config, sessions }
    }
}
