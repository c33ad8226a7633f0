/// .NET RESX decoder
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{attr_value, flatten_text, DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

pub struct ResxDecoder;

impl Decoder for ResxDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut bundle = DecodedBundle::default();
        let mut current: Option<UnitSeed> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"data" => {
                        current = attr_value(&e, b"name")?.map(|name| UnitSeed {
                            key: name,
                            ..UnitSeed::default()
                        });
                        if current.is_none() {
                            log::warn!("skipping <data> element without a name attribute");
                        }
                    }
                    b"value" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some(seed) = current.as_mut() {
                            seed.source = text;
                        }
                    }
                    b"comment" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some(seed) = current.as_mut() {
                            if !text.is_empty() {
                                seed.notes = Some(text);
                            }
                        }
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"data" {
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

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<root>
  <resheader name="resmimetype"><value>text/microsoft-resx</value></resheader>
  <data name="BtnSave" xml:space="preserve">
    <value>Save</value>
    <comment>Toolbar button</comment>
  </data>
  <data name="BtnCancel" xml:space="preserve">
    <value>Cancel</value>
  </data>
</root>"#;

    #[test]
    fn decodes_data_elements() {
        let bundle = ResxDecoder.decode(SAMPLE).unwrap();
        assert_eq!(bundle.units.len(), 2);
        assert_eq!(bundle.units[0].key, "BtnSave");
        assert_eq!(bundle.units[0].source, "Save");
        assert_eq!(bundle.units[0].target, "");
        assert_eq!(bundle.units[0].notes.as_deref(), Some("Toolbar button"));
        assert!(bundle.units[1].notes.is_none());
    }

    #[test]
    fn resheader_values_are_not_units() {
        let bundle = ResxDecoder.decode(SAMPLE).unwrap();
        assert!(bundle.units.iter().all(|u| u.source != "text/microsoft-resx"));
    }

    #[test]
    fn malformed_resx_fails() {
        assert!(ResxDecoder.decode("<root><data name=\"a\"><value>x</root>").is_err());
    }
}
