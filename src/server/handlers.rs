//! HTTP request handlers for the portfolio gateway API.
//!
//! This module contains the Axum handlers for the price, valuation, and
//! portfolio endpoints, plus the report listing backed by object storage.
//!
//! # Endpoints
//!
//! - `GET /` - Plain text greeting
//! - `GET /health` - Health check endpoint
//! - `GET /api/retrieve-price` - Price quote for a symbol
//! - `PUT /api/update-price` - Acknowledge a price update
//! - `DELETE /api/delete-price` - Acknowledge a price deletion
//! - `GET /api/client-valuation` - Fixed client valuation records
//! - `POST /api/portfolio` - Acknowledge portfolio creation
//! - `GET|PUT|DELETE /api/portfolio/{portfolio_id}` - Portfolio CRUD
//! - `GET /api/list-reports` - CSV report blobs in the storage container

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, warn};

use crate::error::StorageError;
use crate::reports::{csv_report_entries, ReportEntry, ReportSource};

/// Quoted price returned for every symbol lookup.
pub const SAMPLE_PRICE: f64 = 123.45;

// =============================================================================
// Application State
// =============================================================================

/// Shared application state containing the report source.
///
/// This is passed to all handlers via Axum's State extractor. The other
/// handlers are pure functions of their request, so the source is the only
/// shared piece.
pub struct AppState<R: ReportSource> {
    /// The source used by the report listing endpoint
    pub reports: Arc<R>,
}

impl<R: ReportSource> AppState<R> {
    /// Create a new application state with the given report source.
    pub fn new(reports: R) -> Self {
        Self {
            reports: Arc::new(reports),
        }
    }
}

impl<R: ReportSource> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            reports: Arc::clone(&self.reports),
        }
    }
}

// =============================================================================
// Request Parameters
// =============================================================================

/// Query parameters for the price endpoints.
#[derive(Debug, Deserialize)]
pub struct SymbolQuery {
    /// Ticker symbol, normalized to uppercase before use
    #[serde(default)]
    pub symbol: Option<String>,
}

impl SymbolQuery {
    /// The uppercased symbol, or an empty string when absent.
    fn normalized(&self) -> String {
        self.symbol.as_deref().unwrap_or_default().to_uppercase()
    }
}

// =============================================================================
// Response Types
// =============================================================================

/// JSON error response returned for all error conditions.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message
    pub error: String,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}

/// Acknowledgement returned by the mutating endpoints.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    /// Always "success" for a 2xx response
    pub status: String,

    /// Human-readable confirmation message
    pub message: String,
}

impl StatusResponse {
    /// Create a success acknowledgement with the given message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }
}

/// Price quote for a single symbol.
#[derive(Debug, Serialize)]
pub struct PriceQuote {
    /// Uppercased ticker symbol
    pub symbol: String,

    /// Quoted price
    pub price: f64,

    /// Display name synthesized from the symbol
    pub name: String,
}

/// Valuation summary for a single client.
#[derive(Debug, Clone, Serialize)]
pub struct ClientValuation {
    /// Client code, e.g. "C001"
    #[serde(rename = "ClientCode")]
    pub client_code: String,

    /// Client display name
    #[serde(rename = "ClientName")]
    pub client_name: String,

    /// Total valuation across the client's portfolios
    #[serde(rename = "TotalValuation")]
    pub total_valuation: f64,
}

/// A single holding within a portfolio.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    /// Position identifier, derived from the portfolio identifier
    #[serde(rename = "PositionID")]
    pub position_id: String,

    /// Ticker symbol of the holding
    #[serde(rename = "Ticker")]
    pub ticker: String,

    /// Number of units held
    #[serde(rename = "Quantity")]
    pub quantity: u32,
}

/// A portfolio with its positions.
#[derive(Debug, Serialize)]
pub struct Portfolio {
    /// Portfolio identifier
    #[serde(rename = "PortfolioID")]
    pub portfolio_id: String,

    /// Owning client code
    #[serde(rename = "ClientCode")]
    pub client_code: String,

    /// Industry classification
    #[serde(rename = "IndustryType")]
    pub industry_type: String,

    /// Ordered holdings
    #[serde(rename = "Positions")]
    pub positions: Vec<Position>,
}

/// Response from the report listing endpoint.
#[derive(Debug, Serialize)]
pub struct ReportsResponse {
    /// CSV report entries in the storage service's listing order
    pub reports: Vec<ReportEntry>,
}

// =============================================================================
// Error Mapping
// =============================================================================

/// Errors surfaced by the API handlers.
///
/// Every error is converted to a JSON body of the shape
/// `{"error": <message>}` with the matching HTTP status; none propagate past
/// the handler boundary.
#[derive(Debug)]
pub enum ApiError {
    /// A required request field was missing or empty (HTTP 400)
    Validation(String),

    /// The storage layer failed or is misconfigured (HTTP 500)
    Storage(StorageError),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

/// Convert ApiError to HTTP response.
///
/// Client errors are logged at WARN level, server errors at ERROR level.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Storage(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), "Server error: {}", message);
        } else {
            warn!(status = status.as_u16(), "Client error: {}", message);
        }

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

// =============================================================================
// Body Helpers
// =============================================================================

/// Extract a required field from a schema-free JSON body.
///
/// Strings must be non-empty; other non-null values are rendered through
/// their JSON form so they can be echoed in confirmation messages.
fn non_empty_field(data: &Value, key: &str) -> Option<String> {
    match data.get(key)? {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Render a JSON value the way it should appear inside a message string.
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Handle the root greeting.
///
/// # Endpoint
///
/// `GET /`
///
/// # Response
///
/// `200 OK` with a plain text greeting.
pub async fn home_handler() -> &'static str {
    "Hello! Portfolio gateway is running."
}

/// Handle health check requests.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0"
/// }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Handle price lookups.
///
/// # Endpoint
///
/// `GET /api/retrieve-price?symbol=AAPL`
///
/// # Query Parameters
///
/// - `symbol`: Ticker symbol (required, case-insensitive)
///
/// # Response
///
/// - `200 OK`: `{"symbol": "AAPL", "price": 123.45, "name": "Sample Name for AAPL"}`
/// - `400 Bad Request`: Missing or empty symbol
pub async fn retrieve_price_handler(
    Query(query): Query<SymbolQuery>,
) -> Result<Json<PriceQuote>, ApiError> {
    let symbol = query.normalized();
    if symbol.is_empty() {
        return Err(ApiError::Validation(
            "Symbol parameter is required".to_string(),
        ));
    }

    Ok(Json(PriceQuote {
        price: SAMPLE_PRICE,
        name: format!("Sample Name for {}", symbol),
        symbol,
    }))
}

/// Handle price updates.
///
/// The update is acknowledged but not persisted; the gateway holds no price
/// store.
///
/// # Endpoint
///
/// `PUT /api/update-price?symbol=AAPL` with body `{"price": 150}`
///
/// # Response
///
/// - `200 OK`: `{"status": "success", "message": "Price for AAPL updated to 150."}`
/// - `400 Bad Request`: Missing symbol, or body without a `price` key
pub async fn update_price_handler(
    Query(query): Query<SymbolQuery>,
    body: Option<Json<Value>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let symbol = query.normalized();
    let price = body.as_ref().and_then(|Json(data)| data.get("price"));

    match price {
        Some(price) if !symbol.is_empty() => Ok(Json(StatusResponse::success(format!(
            "Price for {} updated to {}.",
            symbol,
            display_value(price)
        )))),
        _ => Err(ApiError::Validation("Symbol and price required".to_string())),
    }
}

/// Handle price deletions.
///
/// # Endpoint
///
/// `DELETE /api/delete-price?symbol=AAPL`
///
/// # Response
///
/// - `200 OK`: `{"status": "success", "message": "Price for AAPL deleted."}`
/// - `400 Bad Request`: Missing or empty symbol
pub async fn delete_price_handler(
    Query(query): Query<SymbolQuery>,
) -> Result<Json<StatusResponse>, ApiError> {
    let symbol = query.normalized();
    if symbol.is_empty() {
        return Err(ApiError::Validation(
            "Symbol parameter is required".to_string(),
        ));
    }

    Ok(Json(StatusResponse::success(format!(
        "Price for {} deleted.",
        symbol
    ))))
}

/// Handle client valuation requests.
///
/// # Endpoint
///
/// `GET /api/client-valuation`
///
/// # Response
///
/// `200 OK` with a fixed, ordered array of two valuation records.
pub async fn client_valuation_handler() -> Json<Vec<ClientValuation>> {
    Json(vec![
        ClientValuation {
            client_code: "C001".to_string(),
            client_name: "John Doe".to_string(),
            total_valuation: 100000.00,
        },
        ClientValuation {
            client_code: "C002".to_string(),
            client_name: "Jane Smith".to_string(),
            total_valuation: 150000.00,
        },
    ])
}

/// Handle portfolio creation.
///
/// # Endpoint
///
/// `POST /api/portfolio` with body
/// `{"PortfolioID": ..., "ClientCode": ..., "IndustryType": ...}`
///
/// # Response
///
/// - `200 OK`: `{"status": "success", "message": "Portfolio P123 created."}`
/// - `400 Bad Request`: Any of the three fields missing or empty
pub async fn create_portfolio_handler(
    body: Option<Json<Value>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let data = body.map(|Json(data)| data).unwrap_or(Value::Null);

    let portfolio_id = non_empty_field(&data, "PortfolioID");
    let client_code = non_empty_field(&data, "ClientCode");
    let industry_type = non_empty_field(&data, "IndustryType");

    match (portfolio_id, client_code, industry_type) {
        (Some(portfolio_id), Some(_), Some(_)) => Ok(Json(StatusResponse::success(format!(
            "Portfolio {} created.",
            portfolio_id
        )))),
        _ => Err(ApiError::Validation(
            "Missing PortfolioID, ClientCode or IndustryType".to_string(),
        )),
    }
}

/// Handle portfolio lookups.
///
/// Returns a synthesized portfolio whose position identifiers embed the
/// requested portfolio identifier.
///
/// # Endpoint
///
/// `GET /api/portfolio/{portfolio_id}`
///
/// # Response
///
/// `200 OK` with the portfolio and its two positions.
pub async fn get_portfolio_handler(Path(portfolio_id): Path<String>) -> Json<Portfolio> {
    Json(Portfolio {
        client_code: "C001".to_string(),
        industry_type: "Technology".to_string(),
        positions: vec![
            Position {
                position_id: format!("{}_POS001", portfolio_id),
                ticker: "AAPL".to_string(),
                quantity: 50,
            },
            Position {
                position_id: format!("{}_POS002", portfolio_id),
                ticker: "MSFT".to_string(),
                quantity: 30,
            },
        ],
        portfolio_id,
    })
}

/// Handle portfolio updates.
///
/// The body is accepted but not inspected; there is no portfolio store to
/// apply it to.
///
/// # Endpoint
///
/// `PUT /api/portfolio/{portfolio_id}`
///
/// # Response
///
/// `200 OK` with a confirmation message.
pub async fn update_portfolio_handler(Path(portfolio_id): Path<String>) -> Json<StatusResponse> {
    Json(StatusResponse::success(format!(
        "Portfolio {} updated with new data.",
        portfolio_id
    )))
}

/// Handle portfolio deletions.
///
/// # Endpoint
///
/// `DELETE /api/portfolio/{portfolio_id}`
///
/// # Response
///
/// `200 OK` with a confirmation message. Repeated calls return the same
/// response; there is no state to diverge.
pub async fn delete_portfolio_handler(Path(portfolio_id): Path<String>) -> Json<StatusResponse> {
    Json(StatusResponse::success(format!(
        "Portfolio {} deleted.",
        portfolio_id
    )))
}

/// Handle report listing requests.
///
/// # Endpoint
///
/// `GET /api/list-reports`
///
/// # Response
///
/// `200 OK` with JSON body:
/// ```json
/// {
///   "reports": [
///     {"report_title": "q3-holdings.csv", "upload_date": "2024-10-01T08:30:00Z"}
///   ]
/// }
/// ```
///
/// Only blobs whose names end in `.csv` (case-insensitive) are included, in
/// the storage service's listing order.
///
/// # Errors
///
/// - `500 Internal Server Error`: Connection credential absent from the
///   environment, or any storage failure
pub async fn list_reports_handler<R: ReportSource>(
    State(state): State<AppState<R>>,
) -> Result<Json<ReportsResponse>, ApiError> {
    let blobs = state.reports.list_blobs().await?;

    Ok(Json(ReportsResponse {
        reports: csv_report_entries(blobs),
    }))
}

// =============================================================================
// Tests
// =============================================================================
