//! Entity-type dictionary: a bidirectional mapping between short labels
//! and full entity-type identifiers.
//!
//! The dictionary is built once per conversion and never mutated after
//! construction. It comes from one of two sources:
//!
//! - the document's entity-type configuration (encode direction), or
//! - reference-style definition blocks embedded in the source text
//!   (decode direction), one `[<label>]: <identifier>` line per entry.
//!
//! Lookup never fails: an unregistered label resolves to itself.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::EntityTypeEntry;

/// A single definition line: `[<label>]: <identifier>`, with an optional
/// quoted title that is ignored.
static ENTITY_TYPE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^[ \t]*\[([^\]]+)\]:[ \t]+(\S+)(?:[ \t]+(?:"[^"]*"|'[^']*'))?[ \t\r]*$"#).unwrap()
});

/// An immutable label <-> identifier mapping.
#[derive(Clone, Debug, Default)]
pub struct EntityTypeDictionary {
    /// Known pairs in first-seen order.
    entries: Vec<EntityTypeEntry>,
    /// label -> index into `entries`, labeled entries only.
    by_label: HashMap<String, usize>,
}

impl EntityTypeDictionary {
    /// Builds a dictionary from a document's entity-type configuration.
    ///
    /// Entries without a label are kept but excluded from lookups, so an
    /// object whose type has no label encodes with its raw identifier.
    pub fn from_config(entity_types: &[EntityTypeEntry]) -> Self {
        let mut dict = Self::default();
        for entry in entity_types {
            dict.insert(entry.clone());
        }
        dict
    }

    /// Extracts definition blocks from source text.
    ///
    /// Returns the dictionary plus the text with the blocks removed. A
    /// block is a contiguous run of definition lines sitting at the start
    /// of the text or after a blank line. A start-anchored block leaves no
    /// residue; a block introduced by a blank-line separator collapses to
    /// a single blank line, preserving the paragraph structure around it.
    ///
    /// The first definition of a label wins; later redefinitions are
    /// ignored, as are lines whose label and identifier are identical.
    pub fn from_source(text: &str) -> (Self, String) {
        let mut dict = Self::default();
        let lines: Vec<&str> = text.split_inclusive('\n').collect();

        fn is_blank(line: &str) -> bool {
            line.trim().is_empty()
        }
        fn def_captures(line: &str) -> Option<regex::Captures<'_>> {
            ENTITY_TYPE_LINE.captures(line.trim_end_matches('\n'))
        }

        // keep[i] == false drops line i; separator[i] inserts a blank line
        // before line i when rebuilding.
        let mut keep = vec![true; lines.len()];
        let mut separator = vec![false; lines.len()];

        let mut i = 0;
        let mut seen_content = false;
        while i < lines.len() {
            let line = lines[i];
            if is_blank(line) {
                i += 1;
                continue;
            }
            // A definition line anchored at the start or after a blank line
            // opens a block; mid-paragraph definition lines stay verbatim.
            let anchored = i == 0 || is_blank(lines[i - 1]);
            if !anchored || def_captures(line).is_none() {
                seen_content = true;
                i += 1;
                continue;
            }

            // The block spans definition lines plus any blank lines up to
            // the next content line (or the end of the text); all of it is
            // consumed.
            let start = i;
            let mut end = i;
            while end < lines.len() {
                if let Some(caps) = def_captures(lines[end]) {
                    let (label, id) = (&caps[1], &caps[2]);
                    // A label aliasing itself is not a real definition.
                    if label != id {
                        dict.insert(EntityTypeEntry::new(id, label));
                    }
                    end += 1;
                } else if is_blank(lines[end]) {
                    end += 1;
                } else {
                    break;
                }
            }
            for k in start..end {
                keep[k] = false;
            }
            if seen_content {
                // Collapse the separating blank lines to a single one.
                let mut sep = start;
                while sep > 0 && is_blank(lines[sep - 1]) {
                    sep -= 1;
                    keep[sep] = false;
                }
                separator[start] = true;
            } else {
                // Start-anchored: swallow any leading blank lines too.
                for k in 0..start {
                    keep[k] = false;
                }
            }
            i = end;
        }

        let mut stripped = String::with_capacity(text.len());
        for (k, line) in lines.iter().enumerate() {
            if separator[k] {
                stripped.push('\n');
            }
            if keep[k] {
                stripped.push_str(line);
            }
        }

        (dict, stripped)
    }

    fn insert(&mut self, entry: EntityTypeEntry) {
        if let Some(label) = entry.label.clone() {
            if self.by_label.contains_key(&label) {
                return;
            }
            self.by_label.insert(label, self.entries.len());
        }
        self.entries.push(entry);
    }

    /// Resolves a label to its registered identifier, falling back to the
    /// label itself when unregistered.
    pub fn resolve<'a>(&'a self, label: &'a str) -> &'a str {
        self.by_label
            .get(label)
            .map(|&i| self.entries[i].id.as_str())
            .unwrap_or(label)
    }

    /// Reverse lookup: the display label registered for an identifier.
    pub fn label_for(&self, id: &str) -> Option<&str> {
        self.labeled_entries()
            .find(|e| e.id == id)
            .and_then(|e| e.label.as_deref())
    }

    /// All known pairs in first-seen order.
    pub fn entries(&self) -> &[EntityTypeEntry] {
        &self.entries
    }

    /// Entries carrying a display label, in first-seen order.
    pub fn labeled_entries(&self) -> impl Iterator<Item = &EntityTypeEntry> {
        self.entries.iter().filter(|e| e.label.is_some())
    }

    /// True when at least one entry has a display label.
    pub fn has_labels(&self) -> bool {
        !self.by_label.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_registered_label() {
        let dict = EntityTypeDictionary::from_config(&[EntityTypeEntry::new(
            "https://example.com/Person",
            "Person",
        )]);
        assert_eq!(dict.resolve("Person"), "https://example.com/Person");
    }

    #[test]
    fn unregistered_label_falls_back_to_itself() {
        let dict = EntityTypeDictionary::default();
        assert_eq!(dict.resolve("Person"), "Person");
    }

    #[test]
    fn unlabeled_entries_are_excluded_from_lookup() {
        let dict = EntityTypeDictionary::from_config(&[EntityTypeEntry::unlabeled("Person")]);
        assert!(!dict.has_labels());
        assert_eq!(dict.label_for("Person"), None);
        assert_eq!(dict.entries().len(), 1);
    }

    #[test]
    fn extracts_block_at_start_of_text() {
        let source = "[Person]: https://example.com/Person\n\nElon Musk is a person.";
        let (dict, stripped) = EntityTypeDictionary::from_source(source);
        assert_eq!(dict.resolve("Person"), "https://example.com/Person");
        assert_eq!(stripped.trim(), "Elon Musk is a person.");
    }

    #[test]
    fn extracts_block_between_blank_lines() {
        let source = "Elon Musk is a person.\n\n[Person]: https://example.com/Person\n\nPayPal is a company.";
        let (dict, stripped) = EntityTypeDictionary::from_source(source);
        assert_eq!(dict.resolve("Person"), "https://example.com/Person");
        assert_eq!(
            stripped,
            "Elon Musk is a person.\n\nPayPal is a company."
        );
    }

    #[test]
    fn trailing_block_leaves_single_blank_separator() {
        let source = "Some text.\n\n[Person]: https://example.com/Person";
        let (dict, stripped) = EntityTypeDictionary::from_source(source);
        assert_eq!(dict.entries().len(), 1);
        assert_eq!(stripped.trim(), "Some text.");
    }

    #[test]
    fn mid_paragraph_definition_line_is_not_extracted() {
        let source = "Some text.\n[Person]: https://example.com/Person\nMore text.";
        let (dict, stripped) = EntityTypeDictionary::from_source(source);
        assert!(dict.entries().is_empty());
        assert_eq!(stripped, source);
    }

    #[test]
    fn first_definition_of_a_label_wins() {
        let source = "[Person]: https://example.com/Person\n[Person]: https://example.com/Human\n\ntext";
        let (dict, _) = EntityTypeDictionary::from_source(source);
        assert_eq!(dict.resolve("Person"), "https://example.com/Person");
        assert_eq!(dict.entries().len(), 1);
    }

    #[test]
    fn self_aliasing_definition_is_skipped() {
        let source = "[Person]: Person\n\ntext";
        let (dict, _) = EntityTypeDictionary::from_source(source);
        assert!(dict.entries().is_empty());
    }

    #[test]
    fn quoted_title_is_ignored() {
        let source = "[Person]: https://example.com/Person \"A human being\"\n\ntext";
        let (dict, _) = EntityTypeDictionary::from_source(source);
        assert_eq!(dict.resolve("Person"), "https://example.com/Person");
    }

    #[test]
    fn multiple_blocks_accumulate_in_document_order() {
        let source = "[Person]: https://example.com/Person\n\nmiddle text\n\n[Org]: https://example.com/Org\n\nend";
        let (dict, stripped) = EntityTypeDictionary::from_source(source);
        assert_eq!(dict.entries().len(), 2);
        assert_eq!(dict.entries()[0].label.as_deref(), Some("Person"));
        assert_eq!(dict.entries()[1].label.as_deref(), Some("Org"));
        assert_eq!(stripped.trim(), "middle text\n\nend");
    }
}
