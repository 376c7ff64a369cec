pub mod app_config;
pub mod config;
pub mod listing;
pub mod sources;

mod error;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use listing::Listing;
pub use sources::{load_sources, SourceConfig, SourcesFile};
