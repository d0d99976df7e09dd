use serde::{Deserialize, Serialize};

/// Body of a successful `POST /upload`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UploadResponseDto {
    pub id: String,
}
