//! Page-level extraction: parse → locate → resolve → validity gate.

use scraper::Html;

use cartelera_core::Listing;

use crate::locate::locate;
use crate::resolve::resolve;
use crate::selectors::SelectorConfig;

/// Extracts all listing records from one page of already-fetched markup.
///
/// Pure function of its inputs: no shared state, no I/O. Malformed markup is
/// handled by the parser's best-effort tree and simply yields whatever (if
/// anything) still matches; an unparseable page behaves like a page with no
/// matching containers.
///
/// Item nodes whose resolved title is the title sentinel are dropped as
/// false-positive containers; this is the only validity gate.
#[must_use]
pub fn extract_listings(
    page: &str,
    config: &SelectorConfig,
    origin: &str,
    fallback_cap: usize,
) -> Vec<Listing> {
    let document = Html::parse_document(page);
    let items = locate(&document, config, fallback_cap);

    let mut listings = Vec::new();
    for item in items {
        let listing = resolve(item, config, origin);
        if listing.titulo == config.fields.titulo.sentinel {
            tracing::debug!(origin, "dropping item node with no resolvable title");
            continue;
        }
        listings.push(listing);
    }

    tracing::debug!(origin, count = listings.len(), "extracted listings");
    listings
}
