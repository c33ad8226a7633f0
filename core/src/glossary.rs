/// Glossary loading from two-column CSV/TSV or TMX sources
use csv::ReaderBuilder;

use crate::encoding;
use crate::error::{DecodeError, ParseError};
use crate::formats::{self, FileFormat};
use crate::model::GlossaryTerm;

/// Load glossary terms from raw bytes, dispatching on the filename
/// extension. Order is preserved for determinism.
pub fn load_glossary(file_name: &str, bytes: &[u8]) -> Result<Vec<GlossaryTerm>, ParseError> {
    let format = FileFormat::from_name(file_name).ok_or_else(|| ParseError::UnsupportedFormat {
        file: file_name.to_string(),
    })?;
    let text = encoding::decode_text(bytes).ok_or_else(|| ParseError::Encoding {
        file: file_name.to_string(),
    })?;
    let terms = match format {
        FileFormat::Csv => tabular_terms(&text, b','),
        FileFormat::Tsv => tabular_terms(&text, b'\t'),
        FileFormat::Tmx => tmx_terms(&text),
        _ => Err(DecodeError::syntax(
            "glossaries must be CSV, TSV or TMX",
        )),
    }
    .map_err(|source| ParseError::Decode {
        file: file_name.to_string(),
        source,
    })?;
    log::debug!("loaded {} glossary terms from {}", terms.len(), file_name);
    Ok(terms)
}

fn tabular_terms(content: &str, delimiter: u8) -> Result<Vec<GlossaryTerm>, DecodeError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut terms = Vec::new();
    for (number, record) in reader.records().enumerate() {
        let record = record?;
        if number == 0 && is_glossary_header(record.iter()) {
            continue;
        }
        let source = record.get(0).unwrap_or_default().trim();
        let target = record.get(1).unwrap_or_default().trim();
        if source.is_empty() || target.is_empty() {
            log::warn!("skipping glossary row {} without two filled cells", number + 1);
            continue;
        }
        terms.push(GlossaryTerm {
            source: source.to_string(),
            target: target.to_string(),
            context: record
                .get(2)
                .map(str::trim)
                .filter(|cell| !cell.is_empty())
                .map(str::to_string),
        });
    }
    Ok(terms)
}

/// A first row naming `source` or `term` (case-insensitively) is a header.
fn is_glossary_header<'a>(cells: impl Iterator<Item = &'a str>) -> bool {
    cells.into_iter().any(|cell| {
        let cell = cell.trim().to_lowercase();
        cell.contains("source") || cell.contains("term")
    })
}

/// TMX glossaries reuse the bundle decoder's language assignment; every
/// entry with both sides filled becomes a term.
fn tmx_terms(content: &str) -> Result<Vec<GlossaryTerm>, DecodeError> {
    use crate::formats::Decoder;

    let bundle = formats::tmx::TmxDecoder.decode(content)?;
    Ok(bundle
        .units
        .into_iter()
        .filter(|unit| !unit.source.trim().is_empty() && !unit.target.trim().is_empty())
        .map(|unit| GlossaryTerm {
            source: unit.source.trim().to_string(),
            target: unit.target.trim().to_string(),
            context: None,
        })
        .collect())
}
