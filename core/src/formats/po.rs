/// Gettext PO / POT decoder
/// Line-oriented state machine over the msgctxt/msgid/msgstr latches
use super::{DecodedBundle, Decoder, UnitSeed};
use crate::error::DecodeError;

/// Separator between msgctxt and msgid in unit keys, as used by gettext
/// itself for contextualized message ids.
const CONTEXT_SEP: char = '\u{0004}';

#[derive(Clone, Copy, PartialEq)]
enum Latch {
    None,
    Msgctxt,
    Msgid,
    Msgstr,
}

#[derive(Default)]
struct Entry {
    msgctxt: Option<String>,
    msgid: String,
    msgstr: String,
    seen_msgstr: bool,
    line: Option<usize>,
}

impl Entry {
    fn into_seed(self, notes: Vec<String>) -> Option<UnitSeed> {
        if self.msgid.is_empty() {
            return None;
        }
        let key = match &self.msgctxt {
            Some(ctxt) => format!("{}{}{}", ctxt, CONTEXT_SEP, self.msgid),
            None => self.msgid.clone(),
        };
        Some(UnitSeed {
            key,
            source: self.msgid,
            target: self.msgstr,
            context: self.msgctxt,
            notes: if notes.is_empty() {
                None
            } else {
                Some(notes.join(" "))
            },
            line: self.line,
        })
    }
}

pub struct PoDecoder;

impl Decoder for PoDecoder {
    fn decode(&self, content: &str) -> Result<DecodedBundle, DecodeError> {
        let mut bundle = DecodedBundle::default();
        let mut entry = Entry::default();
        let mut latch = Latch::None;
        // Notes for the entry being assembled and for the one after it;
        // `#.` comments that follow a msgstr belong to the next entry.
        let mut notes: Vec<String> = Vec::new();
        let mut next_notes: Vec<String> = Vec::new();

        for (number, raw_line) in content.lines().enumerate() {
            let line = raw_line.trim();

            if let Some(comment) = line.strip_prefix("#.") {
                let comment = comment.trim();
                if !comment.is_empty() {
                    if entry.seen_msgstr {
                        next_notes.push(comment.to_string());
                    } else {
                        notes.push(comment.to_string());
                    }
                }
                continue;
            }
            if line.starts_with('#') || line.is_empty() {
                latch = Latch::None;
                continue;
            }

            if let Some(rest) = line.strip_prefix("msgctxt") {
                if entry.seen_msgstr {
                    bundle.units.extend(
                        std::mem::take(&mut entry).into_seed(std::mem::take(&mut notes)),
                    );
                    notes = std::mem::take(&mut next_notes);
                }
                entry.msgctxt = Some(quoted_value(rest));
                latch = Latch::Msgctxt;
            } else if line.starts_with("msgid_plural") {
                // Plural forms are not modeled; drop the line and its
                // continuations.
                latch = Latch::None;
            } else if let Some(rest) = line.strip_prefix("msgid") {
                if entry.seen_msgstr {
                    bundle.units.extend(
                        std::mem::take(&mut entry).into_seed(std::mem::take(&mut notes)),
                    );
                    notes = std::mem::take(&mut next_notes);
                }
                entry.msgid = quoted_value(rest);
                entry.line = Some(number + 1);
                latch = Latch::Msgid;
            } else if let Some(rest) = line.strip_prefix("msgstr") {
                if entry.seen_msgstr {
                    // msgstr[1] and later plural forms: keep the first.
                    latch = Latch::None;
                } else {
                    let rest = rest.trim_start_matches(|c| c == '[' || char::is_numeric(c) || c == ']');
                    entry.msgstr = quoted_value(rest);
                    entry.seen_msgstr = true;
                    latch = Latch::Msgstr;
                }
            } else if line.starts_with('"') {
                let piece = quoted_value(line);
                match latch {
                    Latch::Msgctxt => {
                        if let Some(ctxt) = entry.msgctxt.as_mut() {
                            ctxt.push_str(&piece);
                        }
                    }
                    Latch::Msgid => entry.msgid.push_str(&piece),
                    Latch::Msgstr => entry.msgstr.push_str(&piece),
                    Latch::None => {}
                }
            } else {
                latch = Latch::None;
            }
        }

        if entry.seen_msgstr {
            bundle.units.extend(entry.into_seed(notes));
        }

        Ok(bundle)
    }
}

/// Extract the content of the first quoted literal on the line and decode
/// the `\n`, `\"` and `\\` escapes.
fn quoted_value(rest: &str) -> String {
    let rest = rest.trim();
    let Some(start) = rest.find('"') else {
        return String::new();
    };
    let Some(end) = rest.rfind('"').filter(|end| *end > start) else {
        return String::new();
    };
    decode_escapes(&rest[start + 1..end])
}

fn decode_escapes(literal: &str) -> String {
    let mut out = String::with_capacity(literal.len());
    let mut chars = literal.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}
