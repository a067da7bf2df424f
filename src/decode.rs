//! Inline-annotated text -> document.
//!
//! Decoding strips any label-definition blocks, then scans the text left
//! to right for `[<span text>][<label>]` pairs, replacing each with the
//! bare span text so the recorded offsets refer to the fully
//! de-annotated output. The second bracket is one opaque label token:
//! compound payloads written by the encoder (id, relation fields) are
//! not sub-parsed, so ids and relations do not round-trip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dict::EntityTypeDictionary;
use crate::model::{Config, Denotation, Document};

/// Two adjacent bracketed runs: annotated span text followed by a label.
static DENOTATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[([^\]]+)\]\[([^\]]+)\]").unwrap());

/// Decodes inline-annotated text into a document.
///
/// The recovered denotations are ordered left to right and carry offsets
/// in characters. Labels resolve through the dictionary extracted from
/// the text's definition blocks, falling back to the raw label when
/// unregistered.
pub fn decode(source: &str) -> Document {
    let (dict, stripped) = EntityTypeDictionary::from_source(source);
    let mut text = stripped.trim().to_string();

    let mut denotations = Vec::new();
    let mut pos = 0;
    while let Some(caps) = DENOTATION.captures_at(&text, pos) {
        let matched = caps.get(0).unwrap();
        let (start, stop) = (matched.start(), matched.end());
        // A backslash before the opening bracket escapes the markup; the
        // bracket pair stays verbatim in the text.
        if start > 0 && text.as_bytes()[start - 1] == b'\\' {
            pos = start + 1;
            continue;
        }

        let span_text = caps[1].to_string();
        let obj = dict.resolve(&caps[2]).to_string();

        let begin = text[..start].chars().count();
        let end = begin + span_text.chars().count();
        denotations.push(Denotation::new(begin, end, obj));

        // De-annotate before continuing so later offsets are computed
        // against the output text.
        text.replace_range(start..stop, &span_text);
        pos = start + span_text.len();
    }

    let config = if dict.entries().is_empty() {
        None
    } else {
        Some(Config {
            entity_types: dict.entries().to_vec(),
        })
    };

    Document {
        text: Some(text),
        denotations,
        relations: Vec::new(),
        config,
    }
}
