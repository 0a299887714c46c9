//! Report listing domain.
//!
//! This module defines the report entities, the [`ReportSource`] trait that
//! abstracts over the object storage backend, and the pure helpers that turn
//! a raw blob listing into the report entries returned by the API.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          list-reports handler           │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           ReportSource Trait            │
//! │   (backend-agnostic blob enumeration)   │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           AzureReportSource             │
//! │  (connection-string auth, Azure blobs)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Tests substitute their own `ReportSource` implementation, so everything
//! above the trait runs without network access.

mod azure;

pub use azure::AzureReportSource;

use async_trait::async_trait;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::StorageError;

/// Environment variable holding the storage connection credential.
pub const CONNECTION_STRING_VAR: &str = "AZURE_STORAGE_CONNECTION_STRING";

/// Default container the report listing reads from.
pub const DEFAULT_REPORTS_CONTAINER: &str = "reports";

/// A single object returned by the storage listing.
#[derive(Debug, Clone)]
pub struct BlobRecord {
    /// Object name within the container.
    pub name: String,

    /// Last-modified timestamp reported by the service.
    pub last_modified: OffsetDateTime,
}

/// One entry in the report listing response.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// Blob name, e.g. "2024-q3-holdings.csv".
    pub report_title: String,

    /// Upload timestamp as an ISO-8601 string in UTC.
    pub upload_date: String,
}

/// A source of report blobs.
///
/// The production implementation is [`AzureReportSource`]; tests use mock
/// sources serving pre-configured records.
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Enumerate every blob in the configured container, in the service's
    /// native listing order.
    async fn list_blobs(&self) -> Result<Vec<BlobRecord>, StorageError>;
}

/// Check whether a blob name is a CSV report (case-insensitive).
pub fn is_csv_report(name: &str) -> bool {
    name.to_lowercase().ends_with(".csv")
}

/// Render a storage timestamp as an ISO-8601 string in UTC.
pub fn format_upload_date(timestamp: OffsetDateTime) -> String {
    let utc = timestamp.to_offset(UtcOffset::UTC);
    utc.format(&Rfc3339)
        .unwrap_or_else(|_| utc.unix_timestamp().to_string())
}

/// Build report entries from a raw blob listing.
///
/// Keeps only CSV blobs and preserves the listing order.
pub fn csv_report_entries(blobs: impl IntoIterator<Item = BlobRecord>) -> Vec<ReportEntry> {
    blobs
        .into_iter()
        .filter(|blob| is_csv_report(&blob.name))
        .map(|blob| ReportEntry {
            report_title: blob.name,
            upload_date: format_upload_date(blob.last_modified),
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
