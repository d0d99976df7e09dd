use std::path::{Path, PathBuf};

use resumex_proto::{ALLOWED_EXTENSION, MAX_FILE_SIZE};

use crate::Result;

use super::UploadError;

/// The user's currently selected, not-yet-uploaded file.
#[derive(Debug, Clone)]
pub struct CandidateFile {
    pub file_name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl CandidateFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        fn get_file_name(path: &Path) -> Option<String> {
            Some(path.file_name()?.to_str()?.to_string())
        }

        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        let file_name = get_file_name(path).unwrap_or_default();
        Ok(Self {
            file_name,
            size,
            path: path.to_path_buf(),
        })
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .to_string()
    }
}

/// Client-side checks applied before a file may be selected. The size cap
/// is checked first, matching what the server enforces on its side.
pub fn validate_file(file: &CandidateFile) -> std::result::Result<(), UploadError> {
    if file.size > MAX_FILE_SIZE {
        return Err(UploadError::TooLarge);
    }
    if !file.file_name.to_lowercase().ends_with(ALLOWED_EXTENSION) {
        return Err(UploadError::NotPdf);
    }
    Ok(())
}
