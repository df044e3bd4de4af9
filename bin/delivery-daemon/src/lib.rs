//! HTTP front end for the delivery cost search.
//!
//! Loads the facility catalog and service settings, then serves the
//! minimum delivery cost endpoint on top of [`delivery_core::CostSearchEngine`].

pub mod config;
pub mod error;
pub mod server;

pub use config::{ConfigError, ServiceConfig};
pub use error::{ApiError, ErrorResponse};
pub use server::{router, start_server, AppState, CostResponse};
