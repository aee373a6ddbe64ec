// Core modules
pub mod api;
pub mod config;
pub mod error;
pub mod indicators;
pub mod models;
pub mod presentation;
pub mod service;
pub mod strategy;

// Re-export commonly used types
pub use api::MarketDataProvider;
pub use error::SignalError;
pub use models::*;
pub use service::SignalService;
pub use strategy::Strategy;

// Error handling
pub type Result<T> = std::result::Result<T, SignalError>;
