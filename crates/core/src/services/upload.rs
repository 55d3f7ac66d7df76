//! Document submission.
//!
//! No bytes leave the machine: [`SimulatedUploader`] only issues receipts.
//! A real uploader plugs in behind the same trait.

use async_trait::async_trait;
use rf_protocol::form_models::{FileRef, FormData};
use rf_protocol::registration_models::ReceiptId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("{name} is {size_bytes} bytes, the limit is {limit_bytes} bytes")]
    TooLarge {
        name: String,
        size_bytes: u64,
        limit_bytes: u64,
    },
    #[error("{0} has an unsupported file type")]
    UnsupportedType(String),
}

/// Submits selected files together with the collected form.
#[async_trait]
pub trait Uploader: Send + Sync {
    async fn submit(&self, files: &[FileRef], form: &FormData) -> Result<ReceiptId, UploadError>;
}

/// Accepts every submission, optionally enforcing a per-file size limit.
#[derive(Debug, Clone, Default)]
pub struct SimulatedUploader {
    max_file_bytes: Option<u64>,
}

impl SimulatedUploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_file_bytes(mut self, limit: u64) -> Self {
        self.max_file_bytes = Some(limit);
        self
    }
}

#[async_trait]
impl Uploader for SimulatedUploader {
    async fn submit(&self, files: &[FileRef], _form: &FormData) -> Result<ReceiptId, UploadError> {
        if let Some(limit) = self.max_file_bytes {
            if let Some(file) = files.iter().find(|file| file.size_bytes > limit) {
                return Err(UploadError::TooLarge {
                    name: file.name.clone(),
                    size_bytes: file.size_bytes,
                    limit_bytes: limit,
                });
            }
        }
        let receipt = ReceiptId::new();
        tracing::debug!(%receipt, files = files.len(), "simulated upload accepted");
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_simulated_upload_issues_distinct_receipts() {
        let uploader = SimulatedUploader::new();
        let files = vec![FileRef::new("id.pdf", 10)];
        let first = uploader.submit(&files, &FormData::new()).await.unwrap();
        let second = uploader.submit(&files, &FormData::new()).await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_simulated_upload_enforces_limit() {
        let uploader = SimulatedUploader::new().with_max_file_bytes(100);
        let files = vec![FileRef::new("small.pdf", 10), FileRef::new("big.zip", 101)];

        let err = uploader.submit(&files, &FormData::new()).await.unwrap_err();
        assert_eq!(
            err,
            UploadError::TooLarge {
                name: "big.zip".to_string(),
                size_bytes: 101,
                limit_bytes: 100,
            }
        );
        assert!(err.to_string().contains("big.zip"));
    }
}
