use crate::session::SessionState;
use crate::store::TaskStore;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<TaskStore>>,
    pub session: Arc<Mutex<SessionState>>,
}

impl AppState {
    pub fn new(store: TaskStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            session: Arc::new(Mutex::new(SessionState::new())),
        }
    }
}
