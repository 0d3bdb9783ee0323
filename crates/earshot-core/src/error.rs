//! Model and classification error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors from model asset management, session loading, and inference
#[derive(Error, Debug)]
pub enum ModelError {
    #[error("Could not determine cache directory")]
    NoCacheDir,

    #[error("Model asset not found: {0}")]
    AssetNotFound(PathBuf),

    #[error("Download failed for {url}: {reason}")]
    DownloadFailed { url: String, reason: String },

    #[error("Failed to load model session: {0}")]
    SessionLoad(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Tensor conversion failed: {0}")]
    Tensor(String),

    #[error("Unexpected output shape: {0}")]
    OutputShape(String),

    #[error("Class map parse error at line {line}: {reason}")]
    ClassMapParse { line: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for model operations
pub type ModelResult<T> = std::result::Result<T, ModelError>;
