//! Text extraction helpers shared by the locator and resolver.

use scraper::ElementRef;

/// Returns the element's descendant text with leading/trailing whitespace
/// stripped and internal whitespace runs collapsed to single spaces.
///
/// No HTML entity decoding happens here (the parser already did that) and no
/// further normalization is applied.
pub(crate) fn collapsed_text(element: ElementRef<'_>) -> String {
    let joined: String = element.text().collect();
    joined.split_whitespace().collect::<Vec<_>>().join(" ")
}
