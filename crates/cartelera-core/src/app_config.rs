use std::path::PathBuf;

/// Runtime configuration for the crawler, loaded from environment variables.
///
/// Every knob has a default; a run with no environment set up at all uses
/// `./config/sources.yaml` and writes `./peliculas.csv`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Path to the YAML file listing the source sites to crawl.
    pub sources_path: PathBuf,
    /// Optional path to a YAML file overriding the built-in selector chains.
    pub selectors_path: Option<PathBuf>,
    /// Where the CSV export is written.
    pub output_path: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Bounds of the jittered pause between page requests.
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    /// Maximum number of item nodes the image-driven locator fallback may
    /// produce per page.
    pub fallback_image_cap: usize,
}
