//! Sequential crawl loop: fetch → extract → accumulate, one URL at a time.
//!
//! Per-URL failures are logged and skipped rather than propagated so one
//! dead mirror does not abort a run. A jittered pause between requests keeps
//! the load on each source site low.

use std::time::Duration;

use rand::Rng;

use cartelera_core::Listing;

use crate::client::PageClient;
use crate::extract::extract_listings;
use crate::selectors::SelectorConfig;

/// Knobs for one crawl run, taken from [`cartelera_core::AppConfig`].
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Bounds of the jittered pause between page requests (no pause before
    /// the first request).
    pub delay_min_ms: u64,
    pub delay_max_ms: u64,
    /// Cap passed through to the locator's image fallback tier.
    pub fallback_image_cap: usize,
}

/// Crawls `urls` in order and returns every extracted listing.
///
/// A URL that fails to fetch contributes zero records; extraction itself
/// never fails (it degrades to empty results).
pub async fn crawl_urls(
    client: &PageClient,
    urls: &[String],
    selectors: &SelectorConfig,
    options: &CrawlOptions,
) -> Vec<Listing> {
    let mut all_listings = Vec::new();
    let mut is_first_page = true;

    for url in urls {
        if !is_first_page {
            let delay_ms = jitter_ms(options.delay_min_ms, options.delay_max_ms);
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
        is_first_page = false;

        let page = match client.fetch_page(url).await {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url, error = %e, "skipping page, fetch failed");
                continue;
            }
        };

        let listings = extract_listings(&page, selectors, url, options.fallback_image_cap);
        tracing::info!(url, count = listings.len(), "page crawled");
        all_listings.extend(listings);
    }

    all_listings
}

fn jitter_ms(min_ms: u64, max_ms: u64) -> u64 {
    if min_ms >= max_ms {
        min_ms
    } else {
        rand::rng().random_range(min_ms..=max_ms)
    }
}
