//! Error types for the discovery engine

use dealscout_client::ClientError;

/// Criteria rejected before any request is built
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("minimum price {min} is greater than maximum price {max}")]
    InvertedPriceRange { min: f64, max: f64 },

    #[error("price must be a non-negative number, got {0}")]
    NegativePrice(f64),

    #[error("page size must be greater than zero")]
    ZeroPageSize,

    #[error("page {0} is out of range")]
    PageOutOfRange(u32),
}

/// Errors surfaced by discovery operations
#[derive(Debug, thiserror::Error)]
pub enum DiscoveryError {
    #[error("invalid criteria: {0}")]
    Validation(#[from] ValidationError),

    #[error("backend error: {0}")]
    Client(#[from] ClientError),

    #[error("settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("flag store error: {0}")]
    FlagStore(String),

    #[error("view is unmounted")]
    Unmounted,
}

pub type Result<T> = std::result::Result<T, DiscoveryError>;
