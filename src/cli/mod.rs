//! # CLI Module
//!
//! Command implementations behind the `citysearch` binary. Each command
//! reads its configuration from the environment, reports progress through the
//! crate's `info!`/`success!`/`warning!` macros and terminates with `error!`
//! on unrecoverable failures.
//!
//! ## Commands
//!
//! - [`serve`] - Runs the HTTP service (`GET /search`, `GET /health`) until
//!   Ctrl-C, cancelling in-flight upstream calls on shutdown
//! - [`search`] - Runs a single city search through the same validation and
//!   Amadeus client and prints the matches as a table
//!
//! ## Usage Patterns
//!
//! ```bash
//! citysearch serve                        # listen on SERVER_ADDRESS
//! citysearch serve --addr 0.0.0.0:9000    # override the listen address
//! citysearch search Lon                   # one-off search
//! citysearch search Par --country FR      # restricted to a country
//! ```

mod search;
mod serve;

pub use search::search;
pub use serve::serve;
