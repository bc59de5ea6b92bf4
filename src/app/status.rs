//! Server status polling.

use tracing::debug;
use uuid::Uuid;

use super::{describe_error, App, AppMessage};
use crate::models::StatusResponse;
use crate::state::ServerStatusView;

impl App {
    /// Request server status. Only the latest request's answer is applied.
    pub(crate) fn refresh_status(&mut self) {
        let request_id = Uuid::new_v4();
        self.status_request = Some(request_id);

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = client.status().await.map_err(|e| {
                debug!(code = e.error_code(), "Status request failed: {}", e);
                describe_error(&e)
            });
            let _ = tx.send(AppMessage::StatusLoaded { request_id, result });
        });
    }

    pub(crate) fn apply_status(
        &mut self,
        request_id: Uuid,
        result: Result<StatusResponse, String>,
    ) {
        if self.status_request != Some(request_id) {
            return;
        }
        self.status_request = None;
        self.session.server = match result {
            Ok(status) if status.is_online() => ServerStatusView::Online {
                files_count: status.files_count,
            },
            Ok(_) => ServerStatusView::Offline,
            Err(message) => ServerStatusView::Error(message),
        };
    }
}
