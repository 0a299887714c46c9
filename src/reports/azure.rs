//! Azure Blob Storage implementation of `ReportSource`.
//!
//! This module provides an implementation of [`ReportSource`] that
//! authenticates with a connection string and enumerates the blobs of a
//! single container.

use async_trait::async_trait;
use azure_storage::ConnectionString;
use azure_storage_blobs::prelude::BlobServiceClient;
use futures::StreamExt;
use tracing::debug;

use crate::error::StorageError;

use super::{BlobRecord, ReportSource, CONNECTION_STRING_VAR};

/// Azure-backed implementation of [`ReportSource`].
///
/// The connection string is read from the process environment on every call
/// rather than at startup, so the gateway keeps serving its other endpoints
/// when the credential is absent and the listing endpoint reports the
/// misconfiguration itself.
///
/// # Example
///
/// ```ignore
/// use portfolio_gateway::reports::{AzureReportSource, ReportSource};
///
/// let source = AzureReportSource::new("reports");
/// let blobs = source.list_blobs().await?;
/// ```
#[derive(Debug, Clone)]
pub struct AzureReportSource {
    container: String,
}

impl AzureReportSource {
    /// Create a source that lists blobs from the given container.
    pub fn new(container: impl Into<String>) -> Self {
        Self {
            container: container.into(),
        }
    }

    /// Get the container name.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Build a service client from the connection string in the environment.
    fn service_client(&self) -> Result<BlobServiceClient, StorageError> {
        let raw = std::env::var(CONNECTION_STRING_VAR)
            .map_err(|_| StorageError::MissingEnv(CONNECTION_STRING_VAR))?;

        let parsed =
            ConnectionString::new(&raw).map_err(|e| StorageError::Service(e.to_string()))?;
        let account = parsed
            .account_name
            .ok_or_else(|| StorageError::Service("connection string has no AccountName".into()))?;
        let credentials = parsed
            .storage_credentials()
            .map_err(|e| StorageError::Service(e.to_string()))?;

        Ok(BlobServiceClient::new(account, credentials))
    }
}

#[async_trait]
impl ReportSource for AzureReportSource {
    async fn list_blobs(&self) -> Result<Vec<BlobRecord>, StorageError> {
        let client = self.service_client()?;
        let container = client.container_client(self.container.as_str());

        let mut records = Vec::new();
        let mut pages = container.list_blobs().into_stream();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|e| StorageError::Service(e.to_string()))?;
            for blob in page.blobs.blobs() {
                records.push(BlobRecord {
                    name: blob.name.clone(),
                    last_modified: blob.properties.last_modified,
                });
            }
        }

        debug!(
            container = %self.container,
            count = records.len(),
            "listed report blobs"
        );

        Ok(records)
    }
}
