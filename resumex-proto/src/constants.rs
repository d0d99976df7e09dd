/// Largest file the server accepts, 10 MiB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

pub const ALLOWED_EXTENSION: &'static str = ".pdf";

pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

/// Multipart form field carrying the resume file.
pub const UPLOAD_FIELD: &'static str = "file";
