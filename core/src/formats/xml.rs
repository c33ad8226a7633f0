/// Android-style resource XML decoder
/// One unit per <string>, one per <string-array> item (keyed `name[i]`)
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{attr_value, flatten_text, DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

pub struct AndroidXmlDecoder;

impl Decoder for AndroidXmlDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut bundle = DecodedBundle::default();
        // Name of the string-array currently open, with its item counter.
        let mut array: Option<(String, usize)> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"string" => {
                        let name = attr_value(&e, b"name")?;
                        let text = flatten_text(&mut reader)?;
                        if let Some(name) = name {
                            bundle.units.push(UnitSeed {
                                key: name,
                                source: text,
                                ..UnitSeed::default()
                            });
                        } else {
                            log::warn!("skipping <string> element without a name attribute");
                        }
                    }
                    b"string-array" => {
                        if let Some(name) = attr_value(&e, b"name")? {
                            array = Some((name, 0));
                        }
                    }
                    b"item" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some((name, next)) = array.as_mut() {
                            bundle.units.push(UnitSeed {
                                key: format!("{}[{}]", name, next),
                                source: text,
                                ..UnitSeed::default()
                            });
                            *next += 1;
                        }
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"string" => {
                        if let Some(name) = attr_value(&e, b"name")? {
                            bundle.units.push(UnitSeed {
                                key: name,
                                ..UnitSeed::default()
                            });
                        }
                    }
                    b"item" => {
                        if let Some((name, next)) = array.as_mut() {
                            bundle.units.push(UnitSeed {
                                key: format!("{}[{}]", name, next),
                                ..UnitSeed::default()
                            });
                            *next += 1;
                        }
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"string-array" {
                        array = None;
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

    #[test]
    fn decodes_strings_and_arrays() {
        let xml = r#"<?xml version="1.0" encoding="utf-8"?>
<resources>
    <string name="app_name">Demo</string>
    <string name="welcome">Welcome, <b>friend</b>!</string>
    <string-array name="weekdays">
        <item>Monday</item>
        <item>Tuesday</item>
    </string-array>
    <string name="bye">Bye</string>
</resources>"#;
        let bundle = AndroidXmlDecoder.decode(xml).unwrap();
        let keys: Vec<&str> = bundle.units.iter().map(|u| u.key.as_str()).collect();
        assert_eq!(
            keys,
            vec!["app_name", "welcome", "weekdays[0]", "weekdays[1]", "bye"]
        );
        assert_eq!(bundle.units[1].source, "Welcome, friend!");
        assert!(bundle.units.iter().all(|u| u.target.is_empty()));
    }

    #[test]
    fn decodes_entities_in_content() {
        let xml = r#"<resources><string name="amp">Fish &amp; Chips</string></resources>"#;
        let bundle = AndroidXmlDecoder.decode(xml).unwrap();
        assert_eq!(bundle.units[0].source, "Fish & Chips");
    }

    #[test]
    fn items_outside_arrays_are_ignored() {
        let xml = r#"<resources><item>stray</item><string name="k">V</string></resources>"#;
        let bundle = AndroidXmlDecoder.decode(xml).unwrap();
        assert_eq!(bundle.units.len(), 1);
        assert_eq!(bundle.units[0].key, "k");
    }

    #[test]
    fn malformed_xml_fails() {
        assert!(AndroidXmlDecoder
            .decode("<resources><string name=\"a\">x</resources>")
            .is_err());
    }
}
