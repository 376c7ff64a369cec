//! The listing record produced by the extraction engine.

use serde::{Deserialize, Serialize};

/// One extracted movie listing.
///
/// Every field is always present: when the resolver could not find a value
/// for a field it holds that field's sentinel string (e.g. `"No disponible"`)
/// instead of being absent. This keeps the CSV schema fixed regardless of
/// which fields a given site exposes.
///
/// Field names are Spanish because the downstream consumers of the CSV key
/// off the original column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub titulo: String,
    pub calidad: String,
    pub genero: String,
    pub anio: String,
    pub duracion: String,
    pub rating: String,
    pub idioma: String,
    /// Detail or stream URL, taken verbatim from the markup (no base-URL
    /// joining at this layer).
    pub link_streaming: String,
    /// Poster image URL.
    pub imagen: String,
    pub sinopsis: String,
    /// URL of the page the record was extracted from.
    pub url_origen: String,
}
