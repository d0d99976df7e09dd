use reqwest::StatusCode;
use thiserror::Error;
use tokio::sync::mpsc::Sender;

use crate::{client::ApiClient, Result};

use super::{validate_file, CandidateFile};

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("File size must be less than 10MB")]
    TooLarge,
    #[error("Only PDF files are allowed")]
    NotPdf,
    #[error("No file selected")]
    NothingSelected,
    #[error("An upload is already in progress")]
    InProgress,
    #[error("Failed to upload resume: server returned {0}")]
    Failed(StatusCode),
}

#[derive(Debug)]
pub struct UploadProgress {
    pub position: u64,
    pub finish: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadState {
    Idle,
    Selected,
    Uploading,
}

type SuccessCallback = Box<dyn Fn(&str) + Send + Sync>;

/// Mediates between file selection and the upload endpoint. Holds at most
/// one candidate file and allows exactly one in-flight upload.
pub struct UploadFlow {
    state: UploadState,
    file: Option<CandidateFile>,
    error: Option<String>,
    on_upload_success: Option<SuccessCallback>,
}

impl Default for UploadFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadFlow {
    pub fn new() -> Self {
        Self {
            state: UploadState::Idle,
            file: None,
            error: None,
            on_upload_success: None,
        }
    }

    /// Called with the server-assigned id after a successful upload.
    pub fn on_upload_success(&mut self, callback: impl Fn(&str) + Send + Sync + 'static) {
        self.on_upload_success = Some(Box::new(callback));
    }

    pub fn state(&self) -> UploadState {
        self.state
    }

    pub fn selected_file(&self) -> Option<&CandidateFile> {
        self.file.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Validate and take a new candidate, replacing any prior selection.
    /// A rejected file only sets the error; the current selection stays.
    pub fn select(&mut self, file: CandidateFile) -> bool {
        if self.state == UploadState::Uploading {
            return false;
        }
        match validate_file(&file) {
            Ok(()) => {
                log::debug!("selected {} ({} bytes)", file.file_name, file.size);
                self.file = Some(file);
                self.error = None;
                self.state = UploadState::Selected;
                true
            }
            Err(e) => {
                self.error = Some(e.to_string());
                false
            }
        }
    }

    pub fn remove(&mut self) {
        if self.state == UploadState::Uploading {
            return;
        }
        self.file = None;
        self.state = UploadState::Idle;
    }

    /// Submit the selected file. On success the candidate is dropped, the
    /// success callback fires with the new id and the flow returns to Idle.
    /// On failure the file is retained so the user can retry.
    pub async fn upload(
        &mut self,
        client: &ApiClient,
        progress_tx: Sender<UploadProgress>,
    ) -> Result<String> {
        if self.state == UploadState::Uploading {
            return Err(UploadError::InProgress.into());
        }
        let file = match self.file.clone() {
            Some(file) => file,
            None => return Err(UploadError::NothingSelected.into()),
        };

        self.state = UploadState::Uploading;
        self.error = None;

        match client.upload(&file, progress_tx).await {
            Ok(response) => {
                self.file = None;
                self.state = UploadState::Idle;
                if let Some(callback) = &self.on_upload_success {
                    callback(&response.id);
                }
                Ok(response.id)
            }
            Err(e) => {
                log::error!("Failed to upload {}: {}", file.file_name, e);
                self.state = UploadState::Selected;
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use resumex_proto::MAX_FILE_SIZE;

    use super::{UploadFlow, UploadState};
    use crate::client::ApiClient;

    fn candidate(file_name: &str, size: u64) -> crate::upload::CandidateFile {
        crate::upload::CandidateFile {
            file_name: file_name.to_string(),
            size,
            path: PathBuf::from(file_name),
        }
    }

    #[test]
    pub fn test_valid_selection_enters_selected() {
        let mut flow = UploadFlow::new();
        assert!(flow.select(candidate("resume.pdf", 2048)));
        assert_eq!(UploadState::Selected, flow.state());
        assert!(flow.error().is_none());
        assert_eq!("resume.pdf", flow.selected_file().unwrap().file_name);
    }

    #[test]
    pub fn test_oversized_selection_only_sets_error() {
        let mut flow = UploadFlow::new();
        assert!(!flow.select(candidate("resume.pdf", MAX_FILE_SIZE + 1)));
        assert_eq!(UploadState::Idle, flow.state());
        assert!(flow.selected_file().is_none());
        assert_eq!(Some("File size must be less than 10MB"), flow.error());
    }

    #[test]
    pub fn test_non_pdf_selection_keeps_prior_file() {
        let mut flow = UploadFlow::new();
        assert!(flow.select(candidate("first.pdf", 1024)));
        assert!(!flow.select(candidate("notes.txt", 1024)));
        assert_eq!(UploadState::Selected, flow.state());
        assert_eq!("first.pdf", flow.selected_file().unwrap().file_name);
        assert_eq!(Some("Only PDF files are allowed"), flow.error());
    }

    #[test]
    pub fn test_new_selection_replaces_prior_and_clears_error() {
        let mut flow = UploadFlow::new();
        assert!(!flow.select(candidate("notes.txt", 1024)));
        assert!(flow.error().is_some());
        assert!(flow.select(candidate("second.pdf", 1024)));
        assert!(flow.error().is_none());
        assert_eq!("second.pdf", flow.selected_file().unwrap().file_name);
    }

    #[test]
    pub fn test_remove_returns_to_idle() {
        let mut flow = UploadFlow::new();
        assert!(flow.select(candidate("resume.pdf", 2048)));
        assert!(!flow.select(candidate("notes.txt", 1024)));
        flow.remove();
        assert_eq!(UploadState::Idle, flow.state());
        assert!(flow.selected_file().is_none());
    }

    #[tokio::test]
    pub async fn test_upload_without_selection_fails() {
        let mut flow = UploadFlow::new();
        let client = ApiClient::new("http://localhost:8000");
        let (progress_tx, _progress_rx) = tokio::sync::mpsc::channel(1);
        let result = flow.upload(&client, progress_tx).await;
        assert!(result.is_err());
        assert_eq!(UploadState::Idle, flow.state());
    }
}
