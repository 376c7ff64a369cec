//! Crawl command handlers.
//!
//! Per-source and per-URL failures are logged and skipped rather than
//! propagated so one dead mirror does not abort the full run.

use std::path::Path;

use cartelera_core::{AppConfig, SourceConfig};
use cartelera_scraper::{
    crawl_urls, extract_listings, write_csv_file, CrawlOptions, PageClient, SelectorConfig,
};

/// Crawl every configured source (or just `source_filter`) and write the
/// accumulated records as CSV.
///
/// # Errors
///
/// Returns an error if configuration files cannot be loaded, the source
/// filter matches nothing, the HTTP client cannot be built, or the export
/// cannot be written. Per-URL fetch failures are not errors.
pub(crate) async fn run_crawl(
    config: &AppConfig,
    source_filter: Option<&str>,
    output: Option<&Path>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let sources_file = cartelera_core::load_sources(&config.sources_path)?;
    let sources = select_sources(sources_file.sources, source_filter)?;

    if dry_run {
        let url_count: usize = sources.iter().map(|s| s.urls.len()).sum();
        let names: Vec<&str> = sources.iter().map(|s| s.name.as_str()).collect();
        println!(
            "dry-run: would crawl {url_count} urls across {} sources: [{}]",
            sources.len(),
            names.join(", ")
        );
        return Ok(());
    }

    let selectors = load_selectors(config)?;
    let client = PageClient::new(config.request_timeout_secs, &config.user_agent)?;
    let options = CrawlOptions {
        delay_min_ms: config.delay_min_ms,
        delay_max_ms: config.delay_max_ms,
        fallback_image_cap: config.fallback_image_cap,
    };

    let mut all_listings = Vec::new();
    for source in &sources {
        tracing::info!(source = %source.name, urls = source.urls.len(), "crawling source");
        let listings = crawl_urls(&client, &source.urls, &selectors, &options).await;
        tracing::info!(source = %source.name, count = listings.len(), "source crawled");
        all_listings.extend(listings);
    }

    if all_listings.is_empty() {
        println!("no listings extracted; nothing to export");
        return Ok(());
    }

    let output = output.unwrap_or(&config.output_path);
    write_csv_file(output, &all_listings)?;
    println!(
        "saved {} listings to {}",
        all_listings.len(),
        output.display()
    );

    Ok(())
}

/// Fetch one page and print its extracted records as pretty JSON.
///
/// # Errors
///
/// Unlike a crawl run, a fetch failure here is an error: the whole point of
/// a probe is to see what one URL yields.
pub(crate) async fn run_probe(config: &AppConfig, url: &str) -> anyhow::Result<()> {
    let selectors = load_selectors(config)?;
    let client = PageClient::new(config.request_timeout_secs, &config.user_agent)?;

    let page = client.fetch_page(url).await?;
    let listings = extract_listings(&page, &selectors, url, config.fallback_image_cap);

    println!("{}", serde_json::to_string_pretty(&listings)?);
    Ok(())
}

/// Resolve the sources for a run: all of them, or the one named by `filter`
/// (matched case-insensitively).
fn select_sources(
    sources: Vec<SourceConfig>,
    filter: Option<&str>,
) -> anyhow::Result<Vec<SourceConfig>> {
    match filter {
        None => Ok(sources),
        Some(name) => {
            let selected: Vec<SourceConfig> = sources
                .into_iter()
                .filter(|s| s.name.eq_ignore_ascii_case(name))
                .collect();
            if selected.is_empty() {
                anyhow::bail!("source '{name}' not found in sources file");
            }
            Ok(selected)
        }
    }
}

fn load_selectors(config: &AppConfig) -> anyhow::Result<SelectorConfig> {
    match &config.selectors_path {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading selector overrides");
            Ok(SelectorConfig::load(path)?)
        }
        None => Ok(SelectorConfig::default()),
    }
}
