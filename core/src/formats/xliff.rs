/// XLIFF / SDLXLIFF decoder
/// Elements are matched by local name so SDL's namespaced dialect decodes too
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{attr_value, flatten_text, DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

pub struct XliffDecoder;

impl Decoder for XliffDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut bundle = DecodedBundle::default();
        let mut current: Option<UnitSeed> = None;
        let mut seen_file = false;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"file" if !seen_file => {
                        seen_file = true;
                        bundle.source_lang = attr_value(&e, b"source-language")?;
                        bundle.target_lang = attr_value(&e, b"target-language")?;
                    }
                    b"trans-unit" => {
                        let mut seed = UnitSeed::default();
                        seed.key = attr_value(&e, b"id")?.unwrap_or_default();
                        current = Some(seed);
                    }
                    b"source" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some(seed) = current.as_mut() {
                            seed.source = text;
                        }
                    }
                    b"target" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some(seed) = current.as_mut() {
                            seed.target = text;
                        }
                    }
                    b"note" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some(seed) = current.as_mut() {
                            if seed.notes.is_none() && !text.is_empty() {
                                seed.notes = Some(text);
                            }
                        }
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"file" if !seen_file => {
                        seen_file = true;
                        bundle.source_lang = attr_value(&e, b"source-language")?;
                        bundle.target_lang = attr_value(&e, b"target-language")?;
                    }
                    b"trans-unit" => {
                        let mut seed = UnitSeed::default();
                        seed.key = attr_value(&e, b"id")?.unwrap_or_default();
                        bundle.units.push(seed);
                    }
                    // <source/> and <target/> simply leave that side empty.
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"trans-unit" {
                        if let Some(seed) = current.take() {
                            bundle.units.push(seed);
                        }
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(bundle)
    }
}
