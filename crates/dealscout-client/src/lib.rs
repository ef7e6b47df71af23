//! DealScout Client - typed HTTP access to the deal and goal search API
//!
//! This crate provides:
//! - HTTP client with bearer authentication and typed JSON responses
//! - API client with one method per backend endpoint
//! - Wire model types for search requests, list pages and AI analysis

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod http;
pub mod model;

pub use api::DealScoutApiClient;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use http::DealScoutHttpClient;
pub use model::*;
