//! Server-side ingestion.

use tracing::{info, warn};
use uuid::Uuid;

use super::{describe_error, App, AppMessage};
use crate::state::{IngestState, NotificationLevel};

const INGEST_DONE: &str = "Ingestion complete";

impl App {
    pub(crate) fn start_ingest(&mut self) {
        if self.session.ingest.is_running() {
            self.session
                .notify(NotificationLevel::Warning, "Ingestion already running");
            return;
        }

        let request_id = Uuid::new_v4();
        self.ingest_request = Some(request_id);
        self.session.ingest = IngestState::Running;
        info!(%request_id, "Starting ingestion");

        let client = self.client.clone();
        let tx = self.message_tx.clone();
        tokio::spawn(async move {
            let result = match client.ingest().await {
                Ok(response) => Ok(response
                    .message
                    .unwrap_or_else(|| INGEST_DONE.to_string())),
                Err(e) => {
                    warn!(code = e.error_code(), "Ingestion failed: {}", e);
                    Err(describe_error(&e))
                }
            };
            let _ = tx.send(AppMessage::IngestFinished { request_id, result });
        });
    }

    pub(crate) fn finish_ingest(&mut self, request_id: Uuid, result: Result<String, String>) {
        if self.ingest_request != Some(request_id) {
            return;
        }
        self.ingest_request = None;
        match result {
            Ok(message) => {
                self.session.ingest = IngestState::Succeeded(message);
                self.session.notify(NotificationLevel::Success, INGEST_DONE);
            }
            Err(message) => {
                self.session.notify(
                    NotificationLevel::Error,
                    format!("Ingestion failed: {}", message),
                );
                self.session.ingest = IngestState::Failed(message);
            }
        }
        self.refresh_status();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::{app_with, pump_until};
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::events::{dispatch, UiEvent};
    use crate::state::{IngestState, NotificationLevel};

    const INGEST_URL: &str = "http://saturday.test/api/ingest";

    #[tokio::test]
    async fn test_ingest_success() {
        let mock = MockHttpClient::new();
        mock.set_response(
            INGEST_URL,
            MockResponse::json(200, json!({"status": "success", "message": "Ingested 3 files"})),
        );
        let mut app = app_with(&mock);
        let mut rx = app.message_rx.take().unwrap();

        dispatch(&mut app, UiEvent::Ingest);
        assert!(app.session.ingest.is_running());

        pump_until(&mut app, &mut rx, |app| !app.session.ingest.is_running()).await;

        assert_eq!(
            app.session.ingest,
            IngestState::Succeeded("Ingested 3 files".to_string())
        );
        assert!(app
            .session
            .notifications
            .iter()
            .any(|n| n.text == "Ingestion complete"));
        let requests = mock.requests_to("/api/ingest");
        assert_eq!(requests[0].method, "POST");
    }

    #[tokio::test]
    async fn test_ingest_guard_while_running() {
        let mock = MockHttpClient::new();
        mock.set_response(INGEST_URL, MockResponse::json(200, json!({"status": "success"})));
        let mut app = app_with(&mock);

        dispatch(&mut app, UiEvent::Ingest);
        dispatch(&mut app, UiEvent::Ingest);

        let warning = app.session.latest_notification().unwrap();
        assert_eq!(warning.level, NotificationLevel::Warning);
        assert_eq!(warning.text, "Ingestion already running");
    }

    #[tokio::test]
    async fn test_ingest_failure_status() {
        let mock = MockHttpClient::new();
        mock.set_response(
            INGEST_URL,
            MockResponse::json(200, json!({"status": "error", "message": "No documents found"})),
        );
        let mut app = app_with(&mock);
        let mut rx = app.message_rx.take().unwrap();

        dispatch(&mut app, UiEvent::Ingest);
        pump_until(&mut app, &mut rx, |app| !app.session.ingest.is_running()).await;

        assert_eq!(
            app.session.ingest,
            IngestState::Failed("No documents found".to_string())
        );
        assert!(app
            .session
            .notifications
            .iter()
            .any(|n| n.text == "Ingestion failed: No documents found"));
    }
}
