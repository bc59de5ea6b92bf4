//! File uploads.

use std::path::PathBuf;

use tracing::{info, warn};
use uuid::Uuid;

use super::{describe_error, App, AppMessage};
use crate::state::{NotificationLevel, UploadStatus};

impl App {
    /// Replace the upload list with `paths` and upload each file in its own
    /// task.
    pub(crate) fn start_uploads(&mut self, paths: Vec<PathBuf>) {
        if paths.is_empty() {
            self.session
                .notify(NotificationLevel::Warning, "No files selected");
            return;
        }

        let batch_id = Uuid::new_v4();
        self.upload_batch = Some(batch_id);
        self.session.begin_uploads(paths.clone());
        info!(%batch_id, files = paths.len(), "Uploading files");

        for (index, path) in paths.into_iter().enumerate() {
            self.session.mark_upload(index, UploadStatus::Uploading);
            let client = self.client.clone();
            let tx = self.message_tx.clone();
            tokio::spawn(async move {
                let result = match client.upload(&path).await {
                    Ok(response) => Ok(response.message.unwrap_or_default()),
                    Err(e) => {
                        warn!(code = e.error_code(), "Upload of {} failed: {}", path.display(), e);
                        Err(describe_error(&e))
                    }
                };
                let _ = tx.send(AppMessage::UploadFinished {
                    batch_id,
                    index,
                    result,
                });
            });
        }
    }

    pub(crate) fn finish_upload(
        &mut self,
        batch_id: Uuid,
        index: usize,
        result: Result<String, String>,
    ) {
        if self.upload_batch == Some(batch_id) {
            let name = self
                .session
                .uploads
                .get(index)
                .map(|entry| entry.name.clone())
                .unwrap_or_default();
            match result {
                Ok(_) => {
                    self.session.mark_upload(index, UploadStatus::Uploaded);
                    self.session
                        .notify(NotificationLevel::Success, format!("Uploaded {}", name));
                }
                Err(message) => {
                    self.session
                        .notify(NotificationLevel::Error, format!("Upload failed: {}", message));
                    self.session.mark_upload(index, UploadStatus::Failed(message));
                }
            }
        }
        // The server's file count changed either way
        self.refresh_status();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::path::PathBuf;

    use serde_json::json;

    use super::super::test_support::{app_with, pump_until};
    use crate::adapters::{MockHttpClient, MockResponse};
    use crate::events::{dispatch, UiEvent};
    use crate::state::{NotificationLevel, UploadStatus};

    const UPLOAD_URL: &str = "http://saturday.test/api/upload";
    const STATUS_URL: &str = "http://saturday.test/api/status";

    fn temp_file(dir: &tempfile::TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    fn finished(app: &super::App) -> bool {
        !app.session.uploads.is_empty()
            && app.session.uploads.iter().all(|e| e.status.is_finished())
    }

    #[tokio::test]
    async fn test_upload_success_and_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let good = temp_file(&dir, "notes.txt", "hello");
        let missing = dir.path().join("missing.pdf");

        let mock = MockHttpClient::new();
        mock.set_response(
            UPLOAD_URL,
            MockResponse::json(200, json!({"status": "success", "filename": "notes.txt"})),
        );
        mock.set_response(
            STATUS_URL,
            MockResponse::json(200, json!({"status": "online", "files_count": 1})),
        );
        let mut app = app_with(&mock);
        let mut rx = app.message_rx.take().unwrap();

        dispatch(&mut app, UiEvent::FilesDropped(vec![good, missing]));
        assert_eq!(app.session.uploads.len(), 2);
        assert!(app
            .session
            .uploads
            .iter()
            .all(|e| e.status == UploadStatus::Uploading));

        pump_until(&mut app, &mut rx, finished).await;

        assert_eq!(app.session.uploads[0].status, UploadStatus::Uploaded);
        assert!(matches!(app.session.uploads[1].status, UploadStatus::Failed(_)));
        assert_eq!(app.session.uploaded_names(), vec!["notes.txt"]);
        assert!(app
            .session
            .notifications
            .iter()
            .any(|n| n.level == NotificationLevel::Success && n.text == "Uploaded notes.txt"));

        let parts = mock.requests_to("/api/upload");
        assert_eq!(parts.len(), 1);
        let part = parts[0].part.as_ref().unwrap();
        assert_eq!(part.field, "file");
        assert_eq!(part.file_name, "notes.txt");
    }

    #[tokio::test]
    async fn test_rejected_upload_reports_server_message() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "image.png", "x");

        let mock = MockHttpClient::new();
        mock.set_response(
            UPLOAD_URL,
            MockResponse::json(400, json!({"detail": "Unsupported file type"})),
        );
        let mut app = app_with(&mock);
        let mut rx = app.message_rx.take().unwrap();

        dispatch(&mut app, UiEvent::FilesDropped(vec![path]));
        pump_until(&mut app, &mut rx, finished).await;

        assert_eq!(
            app.session.uploads[0].status,
            UploadStatus::Failed("Unsupported file type".to_string())
        );
        assert!(app
            .session
            .notifications
            .iter()
            .any(|n| n.text == "Upload failed: Unsupported file type"));
    }

    #[tokio::test]
    async fn test_upload_refreshes_status() {
        let dir = tempfile::tempdir().unwrap();
        let path = temp_file(&dir, "a.md", "# a");

        let mock = MockHttpClient::new();
        mock.set_response(UPLOAD_URL, MockResponse::json(200, json!({"status": "success"})));
        mock.set_response(
            STATUS_URL,
            MockResponse::json(200, json!({"status": "online", "files_count": 7})),
        );
        let mut app = app_with(&mock);
        let mut rx = app.message_rx.take().unwrap();

        dispatch(&mut app, UiEvent::FilesDropped(vec![path]));
        pump_until(&mut app, &mut rx, |app| {
            app.session.server.files_count() == Some(7)
        })
        .await;

        assert_eq!(app.session.server.files_count(), Some(7));
    }

    #[tokio::test]
    async fn test_new_selection_replaces_list_and_ignores_old_batch() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        app.session.begin_uploads(vec![PathBuf::from("old.txt")]);
        let stale = uuid::Uuid::new_v4();
        app.finish_upload(stale, 0, Ok(String::new()));
        assert_eq!(app.session.uploads[0].status, UploadStatus::Pending);
    }

    #[tokio::test]
    async fn test_empty_selection_warns() {
        let mock = MockHttpClient::new();
        let mut app = app_with(&mock);
        dispatch(&mut app, UiEvent::FilesDropped(Vec::new()));
        assert_eq!(
            app.session.latest_notification().unwrap().level,
            NotificationLevel::Warning
        );
        assert!(mock.get_requests().is_empty());
    }
}
