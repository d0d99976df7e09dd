mod resume_dto;
mod upload_dto;

pub use resume_dto::*;
pub use upload_dto::*;
