//! Document -> inline-annotated text.
//!
//! Each surviving denotation is rewritten as `[<span text>][<payload>]`
//! where the payload joins id, display label, and the first matching
//! relation's predicate and object. When the document configures labeled
//! entity types, a reference-style definition block is appended after a
//! blank line.

use crate::dict::EntityTypeDictionary;
use crate::error::AnnomarkError;
use crate::model::{Document, Relation};
use crate::resolve::{resolve_denotations, ResolvedDenotation};

/// Encodes a document into inline-annotated text.
///
/// Conflicting or malformed denotations are silently dropped; the only
/// hard failure is a missing `text` field.
pub fn encode(doc: &Document) -> Result<String, AnnomarkError> {
    let text = doc.text.as_deref().ok_or(AnnomarkError::MissingText)?;
    let dict = EntityTypeDictionary::from_config(doc.entity_types());

    let chars: Vec<char> = text.chars().collect();
    let mut resolved = resolve_denotations(&doc.denotations, chars.len());
    // Accepted spans never overlap, so a left-to-right walk with a cursor
    // keeps every untouched offset intact.
    resolved.sort_by_key(|d| d.begin);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for denotation in &resolved {
        out.extend(&chars[cursor..denotation.begin]);
        out.push('[');
        out.extend(&chars[denotation.begin..denotation.end]);
        out.push_str("][");
        out.push_str(&annotation_payload(denotation, &doc.relations, &dict));
        out.push(']');
        cursor = denotation.end;
    }
    out.extend(&chars[cursor..]);

    let definitions = label_definitions(&dict);
    if let Some(block) = definitions {
        out.push_str("\n\n");
        out.push_str(&block);
    }

    Ok(out)
}

/// Builds the bracketed payload for one denotation: `id, obj, pred, obj2`
/// with absent fields dropped.
fn annotation_payload(
    denotation: &ResolvedDenotation,
    relations: &[Relation],
    dict: &EntityTypeDictionary,
) -> String {
    let relation = denotation
        .id
        .as_deref()
        .and_then(|id| relations.iter().find(|r| r.subj == id));

    let display_obj = if dict.has_labels() {
        dict.label_for(&denotation.obj).unwrap_or(&denotation.obj)
    } else {
        &denotation.obj
    };

    let fields = [
        denotation.id.as_deref(),
        Some(display_obj),
        relation.map(|r| r.pred.as_str()),
        relation.map(|r| r.obj.as_str()),
    ];

    fields.into_iter().flatten().collect::<Vec<_>>().join(", ")
}

/// The reference-style definition block, one `[<label>]: <id>` line per
/// labeled entry, or `None` when no entry has a label.
fn label_definitions(dict: &EntityTypeDictionary) -> Option<String> {
    if !dict.has_labels() {
        return None;
    }
    let lines: Vec<String> = dict
        .labeled_entries()
        .map(|e| format!("[{}]: {}", e.label.as_deref().unwrap_or_default(), e.id))
        .collect();
    Some(lines.join("\n"))
}
