use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("brands file not found: {}", path.display())]
    BrandsFileMissing { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, LogoError>;
