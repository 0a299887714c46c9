//! Configuration management for the portfolio gateway.
//!
//! This module provides a flexible configuration system that supports:
//! - Command-line arguments via clap
//! - Environment variables with `GATEWAY_` prefix
//! - Sensible defaults for all optional settings
//!
//! # Environment Variables
//!
//! - `GATEWAY_HOST` - Server bind address (default: 0.0.0.0)
//! - `GATEWAY_PORT` - Server port (default: 3000)
//! - `GATEWAY_REPORTS_CONTAINER` - Blob container for report listings
//!   (default: reports)
//! - `GATEWAY_CORS_ORIGINS` - Allowed CORS origins, comma-separated
//!
//! The storage connection credential is not part of this configuration:
//! `AZURE_STORAGE_CONNECTION_STRING` is read from the process environment at
//! request time. A gateway started without it still serves every endpoint
//! except the report listing.

use clap::Parser;

use crate::reports::DEFAULT_REPORTS_CONTAINER;

// =============================================================================
// Default Values
// =============================================================================

/// Default server host.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

// =============================================================================
// CLI Arguments
// =============================================================================

/// Portfolio Gateway - a stateless HTTP API for prices, valuations, and
/// portfolios.
///
/// Serves stub price, valuation, and portfolio endpoints, plus a listing of
/// CSV report blobs stored in an Azure Blob Storage container.
#[derive(Parser, Debug, Clone)]
#[command(name = "portfolio-gateway")]
#[command(author, version, about, long_about = None)]
pub struct Config {
    // =========================================================================
    // Server Configuration
    // =========================================================================
    /// Host address to bind the server to.
    #[arg(long, default_value = DEFAULT_HOST, env = "GATEWAY_HOST")]
    pub host: String,

    /// Port to listen on.
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "GATEWAY_PORT")]
    pub port: u16,

    // =========================================================================
    // Storage Configuration
    // =========================================================================
    /// Blob container the report listing reads from.
    #[arg(long, default_value = DEFAULT_REPORTS_CONTAINER, env = "GATEWAY_REPORTS_CONTAINER")]
    pub reports_container: String,

    // =========================================================================
    // CORS Configuration
    // =========================================================================
    /// Allowed CORS origins (comma-separated).
    ///
    /// If not specified, allows any origin.
    #[arg(long, env = "GATEWAY_CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Option<Vec<String>>,

    // =========================================================================
    // Logging Configuration
    // =========================================================================
    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable request tracing.
    #[arg(long, default_value_t = false)]
    pub no_tracing: bool,
}

impl Config {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.reports_container.is_empty() {
            return Err(
                "Reports container name is required. Set --reports-container or \
                 GATEWAY_REPORTS_CONTAINER"
                    .to_string(),
            );
        }

        Ok(())
    }

    /// Get the server bind address as "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

// =============================================================================
// Tests
// =============================================================================
