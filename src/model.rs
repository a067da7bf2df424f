//! Core document model for annomark.
//!
//! This module defines the canonical representation of an annotation
//! document: plain text, labeled spans (denotations), directed relations
//! between them, and an optional entity-type configuration. The encoder
//! consumes this model and the decoder produces it.
//!
//! All span offsets are **character** offsets into `text`, not byte
//! offsets. The wire format counts characters, so a document annotated
//! against non-ASCII text keeps the same offsets across implementations.

use serde::{Deserialize, Serialize};

/// A complete annotation document.
///
/// This is the central data structure both conversion directions work
/// through. Construction is permissive: `text` may be absent and spans may
/// be malformed, so that validation can reject individual denotations
/// rather than fail during parsing.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The raw document text. Required for encoding; its absence is a
    /// usage error reported by [`crate::encode::encode`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Labeled spans over the text, in input order. Order matters: span
    /// conflicts are resolved with first-come precedence.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub denotations: Vec<Denotation>,

    /// Directed labeled edges between denotations, referenced by id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub relations: Vec<Relation>,

    /// Optional entity-type configuration (label <-> identifier pairs).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Config>,
}

impl Document {
    /// Returns the configured entity types, or an empty slice if the
    /// document carries no config.
    pub fn entity_types(&self) -> &[EntityTypeEntry] {
        self.config
            .as_ref()
            .map(|c| c.entity_types.as_slice())
            .unwrap_or(&[])
    }
}

/// A labeled span over the document text.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Denotation {
    /// Optional identifier, used to attach relations during encoding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The annotated character range.
    pub span: RawSpan,

    /// Either a bare label or a full entity-type identifier.
    pub obj: String,
}

impl Denotation {
    /// Creates a denotation without an id.
    pub fn new(begin: usize, end: usize, obj: impl Into<String>) -> Self {
        Self {
            id: None,
            span: RawSpan::new(begin, end),
            obj: obj.into(),
        }
    }

    /// Creates a denotation with an id.
    pub fn with_id(
        id: impl Into<String>,
        begin: usize,
        end: usize,
        obj: impl Into<String>,
    ) -> Self {
        Self {
            id: Some(id.into()),
            span: RawSpan::new(begin, end),
            obj: obj.into(),
        }
    }
}

/// A half-open character range `[begin, end)` as it appears in input
/// documents.
///
/// Bounds are kept permissive so that malformed values (floats, strings,
/// negatives) survive parsing and are rejected during span resolution
/// instead of failing the whole document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSpan {
    pub begin: Bound,
    pub end: Bound,
}

impl RawSpan {
    /// Creates a span from concrete character offsets.
    pub fn new(begin: usize, end: usize) -> Self {
        Self {
            begin: Bound::Int(begin as i64),
            end: Bound::Int(end as i64),
        }
    }
}

/// A single span bound.
///
/// Only integer-typed values are usable as offsets. Everything else
/// (floats, even integral ones, strings, null) deserializes into the
/// `Other` variant and fails validation, matching the strict integer
/// type check of the wire format.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Bound {
    Int(i64),
    Other(serde_json::Value),
}

impl Bound {
    /// The bound as a signed integer, or `None` for non-integer values.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Bound::Int(v) => Some(*v),
            Bound::Other(_) => None,
        }
    }
}

/// A directed labeled edge between two denotations.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Id of the subject denotation.
    pub subj: String,

    /// Predicate label.
    pub pred: String,

    /// Id of the object denotation.
    pub obj: String,
}

/// Entity-type configuration attached to a document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Known entity types in first-seen order. The wire name keeps the
    /// space of the original format.
    #[serde(rename = "entity types", default)]
    pub entity_types: Vec<EntityTypeEntry>,
}

/// A (full identifier, human label) pair.
///
/// Entries without a label are legal but excluded from the reverse
/// lookup used during encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EntityTypeEntry {
    /// Full entity-type identifier (often a URL).
    pub id: String,

    /// Optional short display label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl EntityTypeEntry {
    /// Creates a labeled entry.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
        }
    }

    /// Creates an entry with no display label.
    pub fn unlabeled(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }
}
