/// CSV / TSV bundle decoder
/// Columns are `key, source, target?` with an optional header row
use csv::ReaderBuilder;

use super::{DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

pub struct TabularDecoder {
    delimiter: u8,
}

impl TabularDecoder {
    pub fn csv() -> Self {
        Self { delimiter: b',' }
    }

    pub fn tsv() -> Self {
        Self { delimiter: b'\t' }
    }
}

impl Decoder for TabularDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(content.as_bytes());

        let mut bundle = DecodedBundle::default();
        for (number, record) in reader.records().enumerate() {
            let record = record?;
            if number == 0 && is_header_row(record.iter()) {
                continue;
            }
            if record.len() < 2 {
                log::warn!("skipping row {} with fewer than two columns", number + 1);
                continue;
            }
            let key = record[0].trim();
            bundle.units.push(UnitSeed {
                key: if key.is_empty() {
                    format!("row_{}", number + 1)
                } else {
                    key.to_string()
                },
                source: record[1].to_string(),
                target: record.get(2).unwrap_or_default().to_string(),
                line: Some(number + 1),
                ..UnitSeed::default()
            });
        }
        Ok(bundle)
    }
}

/// A first row naming `key` or `source` (case-insensitively) is a header.
pub(crate) fn is_header_row<'a>(cells: impl Iterator<Item = &'a str>) -> bool {
    cells.into_iter().any(|cell| {
        let cell = cell.trim().to_lowercase();
        cell.contains("key") || cell.contains("source")
    })
}
