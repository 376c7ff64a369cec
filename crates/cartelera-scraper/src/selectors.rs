//! Exterior-configurable selector data for the locator and resolver.
//!
//! Supporting a new site layout is a data change here (or in a YAML override
//! file, see [`SelectorConfig::load`]), never a code change in the engine:
//! the locator and resolver only know the generic first-non-empty-match
//! mechanism and walk whatever candidate lists this module hands them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ScraperError;

/// One candidate pattern for a listing-item container: a tag name plus an
/// optional class constraint, e.g. `(div, "pelicula")` or `(article, "movie")`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSelector {
    pub tag: String,
    #[serde(default)]
    pub class: Option<String>,
}

impl ContainerSelector {
    pub(crate) fn css(&self) -> String {
        match &self.class {
            Some(class) => format!("{}.{}", self.tag, class),
            None => self.tag.clone(),
        }
    }
}

/// One candidate in a field's fallback chain.
///
/// With an empty `attrs` list the candidate's value is the matched node's
/// collapsed text; otherwise the value is the first non-empty attribute in
/// `attrs` preference order (an attribute named `*srcset` contributes only
/// its first whitespace-delimited token).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSelector {
    pub tag: String,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub attrs: Vec<String>,
    /// Recover a value from an embedded `<img alt>` when the matched node
    /// itself has no text.
    #[serde(default)]
    pub image_alt_fallback: bool,
    /// Evaluate only the first structural match of this candidate instead of
    /// scanning all matches for a non-empty value.
    #[serde(default)]
    pub first_match_only: bool,
}

impl FieldSelector {
    pub(crate) fn css(&self) -> String {
        match &self.class {
            Some(class) => format!("{}.{}", self.tag, class),
            None => self.tag.clone(),
        }
    }
}

/// A field's ordered candidate list plus the sentinel used when the chain
/// exhausts without a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChain {
    pub sentinel: String,
    pub candidates: Vec<FieldSelector>,
}

/// The per-field chains, one per column of the output schema (minus
/// `url_origen`, which is supplied by the caller).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldChains {
    pub titulo: FieldChain,
    pub calidad: FieldChain,
    pub genero: FieldChain,
    pub anio: FieldChain,
    pub duracion: FieldChain,
    pub rating: FieldChain,
    pub idioma: FieldChain,
    pub link_streaming: FieldChain,
    pub imagen: FieldChain,
    pub sinopsis: FieldChain,
}

/// Complete selector configuration consumed by [`crate::locate`] and
/// [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Ordered container candidates, decreasing specificity. The first one
    /// with at least one match on a page wins outright.
    pub containers: Vec<ContainerSelector>,
    /// Substrings (matched case-insensitively) that mark an image source as
    /// a likely poster, for the locator's image-driven fallback tier.
    pub poster_vocabulary: Vec<String>,
    pub fields: FieldChains,
}

impl SelectorConfig {
    /// Load a selector configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::SelectorsFileIo`] if the file cannot be read
    /// and [`ScraperError::SelectorsFileParse`] if it is not valid YAML for
    /// this schema.
    pub fn load(path: &Path) -> Result<Self, ScraperError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| ScraperError::SelectorsFileIo {
                path: path.display().to_string(),
                source: e,
            })?;
        Ok(serde_yaml::from_str(&content)?)
    }
}

fn container(tag: &str, class: &str) -> ContainerSelector {
    ContainerSelector {
        tag: tag.to_string(),
        class: Some(class.to_string()),
    }
}

fn by_tag(tag: &str) -> FieldSelector {
    FieldSelector {
        tag: tag.to_string(),
        class: None,
        attrs: Vec::new(),
        image_alt_fallback: false,
        first_match_only: false,
    }
}

fn by_class(tag: &str, class: &str) -> FieldSelector {
    FieldSelector {
        class: Some(class.to_string()),
        ..by_tag(tag)
    }
}

fn attr_of(tag: &str, class: Option<&str>, attrs: &[&str]) -> FieldSelector {
    FieldSelector {
        class: class.map(ToString::to_string),
        attrs: attrs.iter().map(ToString::to_string).collect(),
        ..by_tag(tag)
    }
}

impl Default for SelectorConfig {
    /// The built-in chains, covering the supported latino streaming site
    /// families (Cuevana, RepelisPlus, PelisPlus, Gnula, Cinetux, TMDB, and
    /// generic WordPress themes).
    fn default() -> Self {
        SelectorConfig {
            containers: vec![
                container("div", "pelicula"),
                container("div", "movie"),
                container("div", "film"),
                container("article", "movie"),
                container("div", "card"),
                container("div", "item"),
                container("div", "movie-item"),
                container("li", "movie"),
                container("div", "post"),
                // RepelisPlus obfuscated class name
                container("div", "ksaj"),
                container("div", "result"),
                container("div", "video"),
                container("div", "entry"),
                container("div", "content-item"),
            ],
            poster_vocabulary: vec![
                "poster".to_string(),
                "movie".to_string(),
                "peli".to_string(),
            ],
            fields: FieldChains {
                titulo: FieldChain {
                    sentinel: "Sin título".to_string(),
                    candidates: vec![
                        by_tag("h2"),
                        by_tag("h3"),
                        by_tag("h4"),
                        by_class("span", "title"),
                        by_class("h3", "title"),
                        by_class("a", "title"),
                        by_class("div", "Title"),
                        by_class("h2", "title"),
                        by_class("h4", "title"),
                        by_class("h1", "title"),
                        // Absolute last resort: the first link in the item,
                        // recovering the title from a poster's alt text when
                        // the link itself has no text.
                        FieldSelector {
                            image_alt_fallback: true,
                            first_match_only: true,
                            ..by_tag("a")
                        },
                    ],
                },
                calidad: FieldChain {
                    sentinel: "No especificada".to_string(),
                    candidates: vec![
                        by_class("span", "quality"),
                        by_class("span", "calidad"),
                        by_class("div", "quality"),
                        by_class("span", "hd"),
                        by_class("div", "hd"),
                    ],
                },
                genero: FieldChain {
                    sentinel: "No especificado".to_string(),
                    candidates: vec![
                        by_class("span", "genre"),
                        by_class("div", "genero"),
                        by_class("div", "Genre"),
                        by_class("span", "genres"),
                        by_class("p", "genre"),
                        by_class("span", "category"),
                    ],
                },
                anio: FieldChain {
                    sentinel: "No especificado".to_string(),
                    candidates: vec![
                        by_class("span", "year"),
                        by_class("span", "date"),
                        by_class("span", "release_date"),
                        by_class("div", "year"),
                        by_class("span", "anio"),
                    ],
                },
                duracion: FieldChain {
                    sentinel: "No especificada".to_string(),
                    candidates: vec![
                        by_class("span", "duration"),
                        by_class("div", "duracion"),
                        by_class("span", "runtime"),
                        by_tag("time"),
                        by_class("div", "Duration"),
                    ],
                },
                rating: FieldChain {
                    sentinel: "No especificado".to_string(),
                    candidates: vec![
                        by_class("span", "rating"),
                        by_class("div", "clasificacion"),
                        by_class("div", "user_score_chart"),
                        by_class("span", "vote_average"),
                        by_class("div", "Rating"),
                        by_class("div", "vote"),
                        by_class("span", "imdb"),
                        by_class("div", "score"),
                        by_class("span", "stars"),
                    ],
                },
                idioma: FieldChain {
                    sentinel: "No especificado".to_string(),
                    candidates: vec![
                        by_class("span", "language"),
                        by_class("span", "audio"),
                        by_class("div", "idioma"),
                        by_class("span", "latino"),
                        by_class("span", "espanol"),
                        // Some sites fold the audio language into the
                        // quality badge.
                        by_class("div", "quality"),
                    ],
                },
                link_streaming: FieldChain {
                    sentinel: "No disponible".to_string(),
                    candidates: vec![
                        attr_of("a", None, &["href"]),
                        attr_of("a", Some("image"), &["href"]),
                        attr_of("a", Some("title"), &["href"]),
                        attr_of("a", Some("play-button"), &["href"]),
                    ],
                },
                imagen: FieldChain {
                    sentinel: "No disponible".to_string(),
                    candidates: vec![attr_of("img", None, &["data-src", "src", "data-srcset"])],
                },
                sinopsis: FieldChain {
                    sentinel: "Sin sinopsis".to_string(),
                    candidates: vec![
                        by_class("p", "synopsis"),
                        by_class("div", "sinopsis"),
                        by_class("p", "overview"),
                        by_class("div", "overview"),
                        by_class("div", "description"),
                        by_class("p", "description"),
                    ],
                },
            },
        }
    }
}
