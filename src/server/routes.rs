//! Router configuration for the portfolio gateway.
//!
//! This module defines the HTTP routes and applies middleware for CORS and
//! request tracing.
//!
//! # Route Structure
//!
//! ```text
//! /                                  - Greeting (plain text)
//! /health                            - Health check
//! /api/retrieve-price                - Price quote lookup
//! /api/update-price                  - Price update acknowledgement
//! /api/delete-price                  - Price deletion acknowledgement
//! /api/client-valuation              - Fixed valuation records
//! /api/portfolio                     - Portfolio creation
//! /api/portfolio/{portfolio_id}      - Portfolio read/update/delete
//! /api/list-reports                  - CSV report listing
//! ```
//!
//! # Example
//!
//! ```ignore
//! use portfolio_gateway::reports::AzureReportSource;
//! use portfolio_gateway::server::{create_router, RouterConfig};
//!
//! let source = AzureReportSource::new("reports");
//! let config = RouterConfig::new()
//!     .with_cors_origins(vec!["https://example.com".to_string()]);
//!
//! let router = create_router(source, config);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

use std::time::Duration;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{
    client_valuation_handler, create_portfolio_handler, delete_portfolio_handler,
    delete_price_handler, get_portfolio_handler, health_handler, home_handler,
    list_reports_handler, retrieve_price_handler, update_portfolio_handler, update_price_handler,
    AppState,
};
use crate::reports::ReportSource;

// =============================================================================
// Router Configuration
// =============================================================================

/// Configuration for the HTTP router.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Allowed CORS origins (None = allow any origin)
    pub cors_origins: Option<Vec<String>>,

    /// Whether to enable request tracing
    pub enable_tracing: bool,
}

impl RouterConfig {
    /// Create a new router configuration.
    ///
    /// By default:
    /// - CORS allows any origin
    /// - Tracing is enabled
    pub fn new() -> Self {
        Self {
            cors_origins: None, // Allow any origin by default
            enable_tracing: true,
        }
    }

    /// Set specific allowed CORS origins.
    ///
    /// Pass an empty vec to disallow all cross-origin requests.
    /// Pass None (or don't call this method) to allow any origin.
    pub fn with_cors_origins(mut self, origins: Vec<String>) -> Self {
        self.cors_origins = Some(origins);
        self
    }

    /// Allow any CORS origin.
    pub fn with_cors_any_origin(mut self) -> Self {
        self.cors_origins = None;
        self
    }

    /// Enable or disable request tracing.
    pub fn with_tracing(mut self, enabled: bool) -> Self {
        self.enable_tracing = enabled;
        self
    }
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Router Builder
// =============================================================================

/// Create the main application router.
///
/// This function builds the complete Axum router with:
/// - The greeting and health routes
/// - The price, valuation, and portfolio API routes
/// - The report listing route backed by the given source
/// - CORS configuration
/// - Request tracing (optional)
///
/// # Arguments
///
/// * `reports` - The report source used by `/api/list-reports`
/// * `config` - Router configuration
///
/// # Returns
///
/// A configured Axum router ready to be served.
pub fn create_router<R>(reports: R, config: RouterConfig) -> Router
where
    R: ReportSource + 'static,
{
    // Create application state
    let app_state = AppState::new(reports);

    // Build CORS layer
    let cors = build_cors_layer(&config);

    let router = Router::new()
        .route("/", get(home_handler))
        .route("/health", get(health_handler))
        .route("/api/retrieve-price", get(retrieve_price_handler))
        .route("/api/update-price", put(update_price_handler))
        .route("/api/delete-price", delete(delete_price_handler))
        .route("/api/client-valuation", get(client_valuation_handler))
        .route("/api/portfolio", post(create_portfolio_handler))
        .route(
            "/api/portfolio/{portfolio_id}",
            get(get_portfolio_handler)
                .put(update_portfolio_handler)
                .delete(delete_portfolio_handler),
        )
        .route("/api/list-reports", get(list_reports_handler::<R>))
        .with_state(app_state)
        .layer(cors);

    // Add tracing if enabled
    if config.enable_tracing {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

/// Build the CORS layer based on configuration.
fn build_cors_layer(config: &RouterConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(86400)); // 24 hours

    match &config.cors_origins {
        None => cors.allow_origin(Any),
        Some(origins) if origins.is_empty() => {
            // No origins allowed - this effectively disables CORS
            cors
        }
        Some(origins) => {
            // Parse origins into HeaderValues
            let parsed_origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            cors.allow_origin(parsed_origins)
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
