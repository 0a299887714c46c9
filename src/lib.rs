//! # Portfolio Gateway
//!
//! A stateless HTTP API gateway for a demo wealth-management backend.
//!
//! This library provides stub endpoints for price lookups, client valuations,
//! and portfolio CRUD, plus one real integration: listing CSV report blobs
//! stored in an Azure Blob Storage container. Handlers are pure with respect
//! to process state; every request constructs its response from literals or
//! its own input, so no locking or cross-request coordination exists.
//!
//! ## Features
//!
//! - **Price endpoints**: Quote lookup with symbol normalization, plus
//!   acknowledged (non-persisted) update and delete operations
//! - **Valuation endpoint**: Fixed client valuation records
//! - **Portfolio CRUD**: Synthesized portfolios with positions derived from
//!   the portfolio identifier
//! - **Report listing**: CSV blobs from a storage container, filtered and
//!   timestamp-normalized to UTC ISO-8601
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`reports`] - Report entities, the storage source trait, and the Azure
//!   implementation
//! - [`server`] - Axum-based HTTP handlers and routes
//! - [`config`] - CLI and configuration types
//! - [`error`] - Storage error taxonomy
//!
//! ## Example
//!
//! ```rust,no_run
//! use portfolio_gateway::reports::AzureReportSource;
//! use portfolio_gateway::server::{create_router, RouterConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let source = AzureReportSource::new("reports");
//!     let router = create_router(source, RouterConfig::new());
//!
//!     let listener = tokio::net::TcpListener::bind("0.0.0.0:3000")
//!         .await
//!         .unwrap();
//!     axum::serve(listener, router).await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod reports;
pub mod server;

// Re-export commonly used types
pub use config::Config;
pub use error::StorageError;
pub use reports::{
    csv_report_entries, format_upload_date, is_csv_report, AzureReportSource, BlobRecord,
    ReportEntry, ReportSource, CONNECTION_STRING_VAR, DEFAULT_REPORTS_CONTAINER,
};
pub use server::{
    create_router, ApiError, AppState, ClientValuation, ErrorResponse, HealthResponse, Portfolio,
    Position, PriceQuote, ReportsResponse, RouterConfig, StatusResponse,
};
