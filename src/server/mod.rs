//! Axum-based HTTP server layer.
//!
//! [`handlers`] contains the request handlers and their request/response
//! types; [`routes`] wires them into a router with CORS and tracing
//! middleware.

pub mod handlers;
pub mod routes;

pub use handlers::{
    client_valuation_handler, create_portfolio_handler, delete_portfolio_handler,
    delete_price_handler, get_portfolio_handler, health_handler, home_handler,
    list_reports_handler, retrieve_price_handler, update_portfolio_handler, update_price_handler,
    ApiError, AppState, ClientValuation, ErrorResponse, HealthResponse, Portfolio, Position,
    PriceQuote, ReportsResponse, StatusResponse, SymbolQuery, SAMPLE_PRICE,
};
pub use routes::{create_router, RouterConfig};
