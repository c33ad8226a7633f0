/// TMX translation-memory decoder
/// An English-tagged tuv wins the source slot, the first one otherwise
use quick_xml::events::Event;
use quick_xml::Reader;

use super::{attr_value, flatten_text, DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

struct Variant {
    lang: String,
    text: String,
}

pub struct TmxDecoder;

impl Decoder for TmxDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut reader = Reader::from_str(content);
        reader.trim_text(false);

        let mut bundle = DecodedBundle::default();
        let mut tu_count = 0usize;
        // (key, collected variants) of the <tu> being read.
        let mut current: Option<(String, Vec<Variant>)> = None;
        let mut current_lang = String::new();

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"header" => {
                        if let Some(srclang) = attr_value(&e, b"srclang")? {
                            bundle.source_lang = Some(srclang);
                        }
                    }
                    b"tu" => {
                        tu_count += 1;
                        let key = attr_value(&e, b"id")?
                            .unwrap_or_else(|| format!("tu_{}", tu_count));
                        current = Some((key, Vec::new()));
                    }
                    b"tuv" => {
                        current_lang = attr_value(&e, b"lang")?.unwrap_or_default();
                    }
                    b"seg" => {
                        let text = flatten_text(&mut reader)?;
                        if let Some((_, variants)) = current.as_mut() {
                            variants.push(Variant {
                                lang: std::mem::take(&mut current_lang),
                                text,
                            });
                        }
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"header" => {
                        if let Some(srclang) = attr_value(&e, b"srclang")? {
                            bundle.source_lang = Some(srclang);
                        }
                    }
                    b"seg" => {
                        if let Some((_, variants)) = current.as_mut() {
                            variants.push(Variant {
                                lang: std::mem::take(&mut current_lang),
                                text: String::new(),
                            });
                        }
                    }
                    _ => {}
                },
                Event::End(e) => {
                    if e.local_name().as_ref() == b"tu" {
                        if let Some((key, variants)) = current.take() {
                            bundle.units.push(assign_sides(key, variants));
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

/// Pick source and target variants: an English-tagged variant wins the
/// source slot, otherwise the first in document order; the first variant
/// left over becomes the target.
fn assign_sides(key: String, variants: Vec<Variant>) -> UnitSeed {
    let source_pos = variants
        .iter()
        .position(|v| is_english(&v.lang))
        .unwrap_or(0);
    let source = variants.get(source_pos).map(|v| v.text.clone()).unwrap_or_default();
    let target = variants
        .iter()
        .enumerate()
        .find(|(i, _)| *i != source_pos)
        .map(|(_, v)| v.text.clone())
        .unwrap_or_default();
    UnitSeed {
        key,
        source,
        target,
        ..UnitSeed::default()
    }
}

fn is_english(lang: &str) -> bool {
    lang.get(..2)
        .map(|prefix| prefix.eq_ignore_ascii_case("en"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<tmx version="1.4">
  <header srclang="en-US" datatype="plaintext"/>
  <body>
    <tu id="greeting">
      <tuv xml:lang="en"><seg>Hello</seg></tuv>
      <tuv xml:lang="fr"><seg>Bonjour</seg></tuv>
    </tu>
    <tu>
      <tuv xml:lang="fr"><seg>Au revoir</seg></tuv>
      <tuv xml:lang="en-GB"><seg>Goodbye</seg></tuv>
    </tu>
    <tu id="lonely">
      <tuv xml:lang="en"><seg>Only source</seg></tuv>
    </tu>
  </body>
</tmx>"#;

    #[test]
    fn decodes_tus_with_language_assignment() {
        let bundle = TmxDecoder.decode(SAMPLE).unwrap();
        assert_eq!(bundle.source_lang.as_deref(), Some("en-US"));
        assert_eq!(bundle.units.len(), 3);

        assert_eq!(bundle.units[0].key, "greeting");
        assert_eq!(bundle.units[0].source, "Hello");
        assert_eq!(bundle.units[0].target, "Bonjour");

        // The English variant wins the source slot even when it is not
        // first; the other side becomes the target.
        assert_eq!(bundle.units[1].key, "tu_2");
        assert_eq!(bundle.units[1].source, "Goodbye");
        assert_eq!(bundle.units[1].target, "Au revoir");

        assert_eq!(bundle.units[2].source, "Only source");
        assert_eq!(bundle.units[2].target, "");
    }

    #[test]
    fn first_variant_is_source_when_no_english_tag() {
        let tmx = r#"<tmx><body><tu>
            <tuv xml:lang="de"><seg>Hallo</seg></tuv>
            <tuv xml:lang="fr"><seg>Bonjour</seg></tuv>
        </tu></body></tmx>"#;
        let bundle = TmxDecoder.decode(tmx).unwrap();
        assert_eq!(bundle.units[0].source, "Hallo");
        assert_eq!(bundle.units[0].target, "Bonjour");
    }

    #[test]
    fn malformed_tmx_fails() {
        assert!(TmxDecoder.decode("<tmx><body><tu><tuv></tu></body></tmx>").is_err());
    }
}
