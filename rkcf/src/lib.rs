pub mod cf;
pub mod config;
pub mod daemon;
pub mod error;
pub mod provider;

// re-export selected public API
pub use config::ProviderConfig;
pub use error::ProviderError;
pub use provider::{CfProvider, NodeSettings, Provider};
