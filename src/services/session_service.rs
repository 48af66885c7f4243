use std::sync::Arc;

use crate::{
    errors::AppResult,
    models::domain::PlayerSession,
    repositories::SessionRepository,
    services::session_export::sessions_to_csv,
};

/// Read side of the session log, used by the teacher panel.
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
}

impl SessionService {
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_sessions(&self) -> AppResult<Vec<PlayerSession>> {
        self.repository.find_all().await
    }

    pub async fn export_csv(&self) -> AppResult<String> {
        let sessions = self.repository.find_all().await?;
        log::info!("Exporting {} sessions as CSV", sessions.len());
        Ok(sessions_to_csv(&sessions))
    }
}
