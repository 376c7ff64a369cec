//! CSV export of the fixed listing schema.

use std::io::Write;
use std::path::Path;

use cartelera_core::Listing;

use crate::error::ScraperError;

/// Column order of the export, matching the field order of
/// [`cartelera_core::Listing`].
const CSV_HEADERS: [&str; 11] = [
    "titulo",
    "calidad",
    "genero",
    "anio",
    "duracion",
    "rating",
    "idioma",
    "link_streaming",
    "imagen",
    "sinopsis",
    "url_origen",
];

/// Serializes `listings` as CSV: one header row, then one row per record.
///
/// The header row is written even when `listings` is empty so downstream
/// tabular consumers always see the schema.
///
/// # Errors
///
/// Returns [`ScraperError::Csv`] on serialization failure or
/// [`ScraperError::Io`] if the writer fails.
pub fn write_csv<W: Write>(writer: W, listings: &[Listing]) -> Result<(), ScraperError> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_HEADERS)?;
    for listing in listings {
        csv_writer.serialize(listing)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Creates `path` and writes the CSV export into it.
///
/// # Errors
///
/// Returns [`ScraperError::ExportIo`] if the file cannot be created, plus
/// anything [`write_csv`] can return.
pub fn write_csv_file(path: &Path, listings: &[Listing]) -> Result<(), ScraperError> {
    let file = std::fs::File::create(path).map_err(|e| ScraperError::ExportIo {
        path: path.display().to_string(),
        source: e,
    })?;
    write_csv(std::io::BufWriter::new(file), listings)
}
