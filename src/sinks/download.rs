//! Image export. Saves a generated image reference to disk.
//!
//! The reference is opaque: fetch whatever the URL serves and write it
//! under the suggested filename. No retry, no fallback.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use reqwest::Client;
use tracing::info;

use crate::generation::ImageReference;

/// Errors from exporting an image.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image host returned status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where an export landed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub path: PathBuf,
    pub bytes: usize,
}

/// "Save the resource at this reference as this filename."
#[async_trait]
pub trait ImageExporter: Send + Sync {
    async fn export(&self, image: &ImageReference, filename: &str) -> Result<ExportReceipt, ExportError>;
}

/// Downloads over HTTP into a fixed directory.
#[derive(Debug, Clone)]
pub struct HttpExporter {
    http: Client,
    dir: PathBuf,
}

impl HttpExporter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            http: Client::new(),
            dir: dir.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl ImageExporter for HttpExporter {
    async fn export(&self, image: &ImageReference, filename: &str) -> Result<ExportReceipt, ExportError> {
        let response = self.http.get(&image.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::Status(status.as_u16()));
        }
        let body = response.bytes().await?;

        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, &body).await?;

        info!(url = %image.url, path = %path.display(), bytes = body.len(), "image exported");
        Ok(ExportReceipt {
            path,
            bytes: body.len(),
        })
    }
}
