//! Test utilities for integration tests.
//!
//! This module provides a mock report source and helpers for driving the
//! router without any network access.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use time::OffsetDateTime;

use portfolio_gateway::error::StorageError;
use portfolio_gateway::reports::{BlobRecord, ReportSource};

// =============================================================================
// Mock Report Source
// =============================================================================

/// A mock report source that serves pre-configured blob records.
///
/// Can be configured to fail with a fixed error to exercise the storage
/// error paths.
pub struct MockReportSource {
    blobs: Vec<BlobRecord>,
    failure: Option<StorageError>,
    call_count: Arc<AtomicUsize>,
}

impl MockReportSource {
    pub fn new() -> Self {
        Self {
            blobs: Vec::new(),
            failure: None,
            call_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Add a blob with the given name and last-modified unix timestamp.
    pub fn with_blob(mut self, name: impl Into<String>, last_modified_unix: i64) -> Self {
        self.blobs.push(BlobRecord {
            name: name.into(),
            last_modified: OffsetDateTime::from_unix_timestamp(last_modified_unix).unwrap(),
        });
        self
    }

    /// Make every listing call fail with the given error.
    pub fn with_failure(mut self, failure: StorageError) -> Self {
        self.failure = Some(failure);
        self
    }

    /// Handle on the listing call counter, usable after the source is moved
    /// into the router.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.call_count)
    }
}

impl Default for MockReportSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReportSource for MockReportSource {
    async fn list_blobs(&self) -> Result<Vec<BlobRecord>, StorageError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.blobs.clone()),
        }
    }
}
