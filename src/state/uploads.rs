//! Upload list, ingestion and server status views.

use std::path::PathBuf;

/// Progress of one file upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadStatus {
    Pending,
    Uploading,
    Uploaded,
    Failed(String),
}

impl UploadStatus {
    /// Status label shown next to the file name.
    pub fn label(&self) -> &str {
        match self {
            UploadStatus::Pending => "Pending",
            UploadStatus::Uploading => "Uploading...",
            UploadStatus::Uploaded => "✓ Uploaded",
            UploadStatus::Failed(_) => "✗ Failed",
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, UploadStatus::Uploaded | UploadStatus::Failed(_))
    }
}

/// A file in the current upload selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadEntry {
    /// Display name (last path component)
    pub name: String,
    pub path: PathBuf,
    pub status: UploadStatus,
}

impl UploadEntry {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self {
            name,
            path,
            status: UploadStatus::Pending,
        }
    }
}

/// State of the remote ingestion job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum IngestState {
    #[default]
    Idle,
    Running,
    Succeeded(String),
    Failed(String),
}

impl IngestState {
    pub fn is_running(&self) -> bool {
        matches!(self, IngestState::Running)
    }
}

/// Last known server status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ServerStatusView {
    #[default]
    Unknown,
    Online { files_count: u64 },
    Offline,
    /// The status request itself failed
    Error(String),
}

impl ServerStatusView {
    pub fn label(&self) -> String {
        match self {
            ServerStatusView::Unknown => "Connecting...".to_string(),
            ServerStatusView::Online { .. } => "Online".to_string(),
            ServerStatusView::Offline => "Offline".to_string(),
            ServerStatusView::Error(_) => "Error".to_string(),
        }
    }

    pub fn files_count(&self) -> Option<u64> {
        match self {
            ServerStatusView::Online { files_count } => Some(*files_count),
            _ => None,
        }
    }
}
