//! Container Locator.
//!
//! Tries the configured container candidates in priority order and returns
//! all matches of the first candidate that matches anything. When no
//! candidate matches, a poster-image heuristic scans `<img>` sources for
//! poster-like substrings and promotes each image's parent to an item node,
//! bounded by a caller-supplied cap.

use scraper::{ElementRef, Html, Selector};

use crate::selectors::SelectorConfig;

/// Finds the element nodes of `document` that most likely each represent one
/// listing item.
///
/// Candidates are evaluated strictly in order and the first one yielding at
/// least one match wins outright; later candidates are never consulted,
/// even if they would match more nodes. Matching both a specific and a
/// generic pattern on the same page would double-count most real layouts,
/// so tiers never merge.
///
/// `fallback_cap` bounds how many item nodes the image-driven fallback tier
/// may produce; it does not apply to the candidate tiers.
///
/// Returns nodes in document order. An empty result means "no listings on
/// this page" and is not an error.
#[must_use]
pub fn locate<'a>(
    document: &'a Html,
    config: &SelectorConfig,
    fallback_cap: usize,
) -> Vec<ElementRef<'a>> {
    for candidate in &config.containers {
        let css = candidate.css();
        let Ok(selector) = Selector::parse(&css) else {
            tracing::warn!(selector = %css, "skipping unparseable container selector");
            continue;
        };

        let matches: Vec<ElementRef<'a>> = document.select(&selector).collect();
        if !matches.is_empty() {
            tracing::debug!(
                selector = %css,
                count = matches.len(),
                "container candidate matched"
            );
            return matches;
        }
    }

    poster_image_fallback(document, config, fallback_cap)
}

/// Fallback tier: treat the parent of each poster-looking image as an item
/// node. Only engages when every configured candidate failed.
fn poster_image_fallback<'a>(
    document: &'a Html,
    config: &SelectorConfig,
    cap: usize,
) -> Vec<ElementRef<'a>> {
    let img_selector = Selector::parse("img").expect("valid selector");
    let mut containers = Vec::new();

    for img in document.select(&img_selector) {
        if containers.len() >= cap {
            break;
        }

        // Lazy-load attribute preferred over the eager src.
        let Some(src) = img
            .value()
            .attr("data-src")
            .filter(|s| !s.is_empty())
            .or_else(|| img.value().attr("src").filter(|s| !s.is_empty()))
        else {
            continue;
        };

        let lower = src.to_lowercase();
        if !config
            .poster_vocabulary
            .iter()
            .any(|word| lower.contains(&word.to_lowercase()))
        {
            continue;
        }

        let Some(parent) = img.parent().and_then(ElementRef::wrap) else {
            continue;
        };
        if matches!(parent.value().name(), "a" | "div") {
            containers.push(parent);
        }
    }

    if containers.is_empty() {
        tracing::debug!("no container candidate or poster image matched");
    } else {
        tracing::debug!(count = containers.len(), "poster-image fallback matched");
    }
    containers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::collapsed_text;

    fn config() -> SelectorConfig {
        SelectorConfig::default()
    }

    #[test]
    fn returns_all_matches_of_first_matching_candidate() {
        let html = r#"
            <div class="pelicula"><h2>Uno</h2></div>
            <div class="pelicula"><h2>Dos</h2></div>
        "#;
        let doc = Html::parse_document(html);
        let items = locate(&doc, &config(), 20);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn first_match_wins_over_later_tier_with_more_nodes() {
        // div.pelicula is tried before div.post; the single pelicula match
        // must suppress the three post matches entirely.
        let html = r#"
            <div class="pelicula"><h2>Real</h2></div>
            <div class="post"><h2>A</h2></div>
            <div class="post"><h2>B</h2></div>
            <div class="post"><h2>C</h2></div>
        "#;
        let doc = Html::parse_document(html);
        let items = locate(&doc, &config(), 20);
        assert_eq!(items.len(), 1);
        assert_eq!(collapsed_text(items[0]), "Real");
    }

    #[test]
    fn unmatched_page_returns_empty() {
        let html = r#"<main><p>Sin contenido de cine aquí.</p></main>"#;
        let doc = Html::parse_document(html);
        assert!(locate(&doc, &config(), 20).is_empty());
    }

    #[test]
    fn fallback_promotes_poster_image_parents() {
        let html = r#"
            <a href="/pelicula/matrix"><img src="/img/posters/matrix.jpg"></a>
            <div><img src="/static/banner-ad.png"></div>
        "#;
        let doc = Html::parse_document(html);
        let items = locate(&doc, &config(), 20);
        assert_eq!(items.len(), 1, "only the poster-like image qualifies");
        assert_eq!(items[0].value().name(), "a");
    }

    #[test]
    fn fallback_prefers_lazy_load_source_for_vocabulary_match() {
        // src alone would not match the vocabulary; data-src does and must
        // be the attribute inspected.
        let html = r#"<div><img data-src="/cdn/movie-42.webp" src="/cdn/blank.gif"></div>"#;
        let doc = Html::parse_document(html);
        let items = locate(&doc, &config(), 20);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].value().name(), "div");
    }

    #[test]
    fn fallback_ignores_images_with_non_container_parents() {
        let html = r#"<figure><img src="/posters/alien.jpg"></figure>"#;
        let doc = Html::parse_document(html);
        assert!(locate(&doc, &config(), 20).is_empty());
    }

    #[test]
    fn fallback_is_capped() {
        let imgs: String = (0..30)
            .map(|i| format!(r#"<div><img src="/poster-{i}.jpg"></div>"#))
            .collect();
        let doc = Html::parse_document(&imgs);
        let items = locate(&doc, &config(), 20);
        assert_eq!(items.len(), 20);

        let items = locate(&doc, &config(), 5);
        assert_eq!(items.len(), 5, "cap is a per-call bound");
    }

    #[test]
    fn candidate_tier_suppresses_fallback() {
        let html = r#"
            <div class="card"><h2>Título</h2></div>
            <div><img src="/poster.jpg"></div>
        "#;
        let doc = Html::parse_document(html);
        let items = locate(&doc, &config(), 20);
        assert_eq!(items.len(), 1);
        assert_eq!(collapsed_text(items[0]), "Título");
    }
}
