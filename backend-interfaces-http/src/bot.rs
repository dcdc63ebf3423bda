pub mod commands;
pub mod dispatch;
pub mod session;
pub mod update;

use backend_application::AppState;

use crate::bot::session::SessionStore;

/// Router state: the shared application state plus the per-chat
/// awaiting-input sessions, which belong to this interface rather than the
/// process-wide application state.
#[derive(Clone)]
pub struct BotState {
    pub app: AppState,
    pub sessions: SessionStore,
}

impl BotState {
    pub fn new(app: AppState) -> Self {
        Self {
            app,
            sessions: SessionStore::default(),
        }
    }
}
