//! Core business logic abstractions

pub mod config;
pub mod error;
pub mod log;
pub mod rates;
pub mod store;

// Re-export main types for cleaner imports
pub use config::AppConfig;
pub use error::{ConfigError, FetchError, PipelineError, TransformError, UploadError};
pub use rates::{MerchantRates, MerchantRatesProvider, RatesResponse};
pub use store::ObjectStore;
