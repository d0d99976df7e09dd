use std::cmp::min;

use futures_util::StreamExt;
use once_cell::sync::Lazy;
use reqwest::{multipart, Body, Client, StatusCode};
use resumex_proto::{
    dto::{ResumeDto, UploadResponseDto},
    ApiRoute, UPLOAD_FIELD,
};
use thiserror::Error;
use tokio::{fs::File, sync::mpsc::Sender};
use tokio_util::io::ReaderStream;
use uuid::Uuid;

use crate::{
    upload::{CandidateFile, UploadError, UploadProgress},
    Result,
};

static CLIENT: Lazy<Client> = Lazy::new(|| {
    reqwest::ClientBuilder::new()
        .build()
        .expect("Failed to create reqwest client")
});

const REQUEST_ID_HEADER: &'static str = "X-Request-Id";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resume not found")]
    NotFound,
    #[error("Unexpected response status code: {0}")]
    Unknown(StatusCode),
}

/// Thin client over the resume API. All requests go through a shared
/// reqwest client and carry a generated request id the server can log.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl ToString) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    fn request_id() -> String {
        Uuid::new_v4().to_string()
    }

    pub async fn list_resumes(&self) -> Result<Vec<ResumeDto>> {
        let request_id = Self::request_id();
        log::debug!("GET /resumes [{}]", request_id);
        let response = CLIENT
            .get(ApiRoute::Resumes.target(&self.base_url))
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            status => Err(ApiError::Unknown(status).into()),
        }
    }

    pub async fn get_resume(&self, id: impl ToString) -> Result<ResumeDto> {
        let id = id.to_string();
        let request_id = Self::request_id();
        log::debug!("GET /resumes/{} [{}]", id, request_id);
        let response = CLIENT
            .get(ApiRoute::Resume(id).target(&self.base_url))
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => Ok(response.json().await?),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound.into()),
            status => Err(ApiError::Unknown(status).into()),
        }
    }

    pub async fn delete_resume(&self, id: impl ToString) -> Result<()> {
        let id = id.to_string();
        let request_id = Self::request_id();
        log::debug!("DELETE /resumes/{} [{}]", id, request_id);
        let response = CLIENT
            .delete(ApiRoute::Resume(id).target(&self.base_url))
            .header(REQUEST_ID_HEADER, request_id)
            .send()
            .await?;
        match response.status() {
            StatusCode::OK => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound.into()),
            status => Err(ApiError::Unknown(status).into()),
        }
    }

    /// Multipart POST of the candidate file, streamed from disk with
    /// progress reported over `progress_tx`.
    pub(crate) async fn upload(
        &self,
        file: &CandidateFile,
        progress_tx: Sender<UploadProgress>,
    ) -> Result<UploadResponseDto> {
        let file_size = file.size;
        let handle = File::open(&file.path).await?;
        let mut reader_stream = ReaderStream::new(handle);
        let mut uploaded = 0;

        let async_stream = async_stream::stream! {
            while let Some(chunk) = reader_stream.next().await {
                if let Ok(chunk) = &chunk {
                    let pos = min(uploaded + (chunk.len() as u64), file_size);
                    uploaded = pos;
                    let progress = UploadProgress {
                        position: pos,
                        finish: pos >= file_size,
                    };
                    progress_tx.send(progress).await.ok();
                }
                yield chunk;
            }
        };

        let part = multipart::Part::stream_with_length(Body::wrap_stream(async_stream), file_size)
            .file_name(file.file_name.clone())
            .mime_str(&file.content_type())?;
        let form = multipart::Form::new().part(UPLOAD_FIELD, part);

        let request_id = Self::request_id();
        log::debug!("POST /upload {} [{}]", file.file_name, request_id);
        let response = CLIENT
            .post(ApiRoute::Upload.target(&self.base_url))
            .header(REQUEST_ID_HEADER, request_id)
            .multipart(form)
            .send()
            .await?;
        match response.status() {
            status if status.is_success() => Ok(response.json().await?),
            // the server enforces the same limits as the client
            StatusCode::PAYLOAD_TOO_LARGE => Err(UploadError::TooLarge.into()),
            StatusCode::BAD_REQUEST => Err(UploadError::NotPdf.into()),
            status => Err(UploadError::Failed(status).into()),
        }
    }
}
