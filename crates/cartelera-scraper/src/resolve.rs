//! Field Resolver.
//!
//! Resolves each semantic field of an item node independently by walking the
//! field's configured candidate chain and taking the first non-empty value.
//! A structurally matched node whose extracted value is empty does not stop
//! the chain; only a non-empty value does. An exhausted chain yields the
//! field's sentinel, so a resolved record always has every field populated.

use scraper::{ElementRef, Selector};

use cartelera_core::Listing;

use crate::selectors::{FieldChain, FieldSelector, SelectorConfig};
use crate::text::collapsed_text;

/// Resolves one listing record from an item node.
///
/// Never fails: unresolvable fields carry their configured sentinel string.
/// The caller decides whether a record whose title is the title sentinel is
/// worth keeping (see [`crate::extract_listings`]).
#[must_use]
pub fn resolve(item: ElementRef<'_>, config: &SelectorConfig, origin: &str) -> Listing {
    let fields = &config.fields;
    Listing {
        titulo: resolve_field(item, &fields.titulo),
        calidad: resolve_field(item, &fields.calidad),
        genero: resolve_field(item, &fields.genero),
        anio: resolve_field(item, &fields.anio),
        duracion: resolve_field(item, &fields.duracion),
        rating: resolve_field(item, &fields.rating),
        idioma: resolve_field(item, &fields.idioma),
        link_streaming: resolve_field(item, &fields.link_streaming),
        imagen: resolve_field(item, &fields.imagen),
        sinopsis: resolve_field(item, &fields.sinopsis),
        url_origen: origin.to_string(),
    }
}

/// Walks `chain` over the item subtree; first non-empty value wins.
fn resolve_field(item: ElementRef<'_>, chain: &FieldChain) -> String {
    for candidate in &chain.candidates {
        let css = candidate.css();
        let Ok(selector) = Selector::parse(&css) else {
            tracing::warn!(selector = %css, "skipping unparseable field selector");
            continue;
        };

        for node in item.select(&selector) {
            if let Some(value) = candidate_value(node, candidate) {
                return value;
            }
            if candidate.first_match_only {
                break;
            }
        }
    }
    chain.sentinel.clone()
}

/// Extracts a candidate's value from one matched node, or `None` when the
/// node yields nothing usable and the chain should continue.
fn candidate_value(node: ElementRef<'_>, candidate: &FieldSelector) -> Option<String> {
    if candidate.attrs.is_empty() {
        let text = collapsed_text(node);
        if !text.is_empty() {
            return Some(text);
        }
        if candidate.image_alt_fallback {
            return embedded_image_alt(node);
        }
        return None;
    }

    for attr in &candidate.attrs {
        if let Some(raw) = node.value().attr(attr) {
            // Responsive source-set values list "url descriptor" pairs; only
            // the first URL token is wanted. Other attributes pass verbatim.
            let value = if attr.ends_with("srcset") {
                raw.split_whitespace().next().unwrap_or("")
            } else {
                raw
            };
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Accessible-text recovery for text-less link candidates: the alt attribute
/// of the first embedded image that has one.
fn embedded_image_alt(node: ElementRef<'_>) -> Option<String> {
    let img_selector = Selector::parse("img").expect("valid selector");
    node.select(&img_selector).find_map(|img| {
        img.value()
            .attr("alt")
            .map(str::trim)
            .filter(|alt| !alt.is_empty())
            .map(ToString::to_string)
    })
}

#[cfg(test)]
#[path = "resolve_test.rs"]
mod tests;
