pub mod client;
mod error;
pub mod upload;

pub type Result<T> = std::result::Result<T, error::Error>;

pub use error::*;
