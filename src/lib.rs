//! City Search Proxy Library
//!
//! This library implements a small proxy service in front of the Amadeus
//! Self-Service API. It accepts a free-text query, forwards it to Amadeus
//! using an OAuth 2.0 client-credentials token that is cached until it
//! expires, and returns a normalized list of matching cities.
//!
//! # Modules
//!
//! - `amadeus` - Amadeus REST client, token exchange and response interpretation
//! - `api` - HTTP endpoints, request validation and problem responses
//! - `cli` - Command-line interface implementations
//! - `config` - Configuration management and environment variables
//! - `management` - Process-wide access token cache
//! - `server` - Axum router and HTTP server lifecycle
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```no_run
//! use citysearch::{amadeus::AmadeusClient, config::ClientConfig};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     citysearch::config::load_env().await?;
//!     let client = AmadeusClient::new(ClientConfig::from_env()?)?;
//!     let cities = client.search_cities("Lon", None, &CancellationToken::new()).await?;
//!     println!("{} cities", cities.data.len());
//!     Ok(())
//! }
//! ```

pub mod amadeus;
pub mod api;
pub mod cli;
pub mod config;
pub mod management;
pub mod server;
pub mod types;
pub mod utils;

/// Prints an informational message with a blue bullet point.
///
/// Used for status updates in the CLI commands. Accepts the same arguments
/// as `println!`.
///
/// ```ignore
/// info!("Listening on http://{}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// ```ignore
/// success!("Server stopped");
/// ```
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message to stderr with a red exclamation mark and exits
/// the program with code 1.
///
/// Only for failures the CLI cannot recover from; the expansion diverges, so
/// it can stand in for a value in `match` arms.
///
/// ```ignore
/// let config = match ClientConfig::from_env() {
///     Ok(c) => c,
///     Err(e) => error!("Invalid configuration: {}", e),
/// };
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning to stderr with a yellow exclamation mark.
///
/// ```ignore
/// warning!("No cities found for '{}'", query);
/// ```
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
