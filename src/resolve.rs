//! Span validation and conflict resolution for the encode direction.
//!
//! Raw denotations may be malformed, duplicated, nested, or crossing.
//! This module reduces them to an ordered set of valid, mutually
//! compatible spans. Resolution is deterministic and input-order
//! sensitive: the contract is first-come precedence, not a
//! maximum-cardinality subset.

use crate::model::Denotation;

/// A denotation whose span has survived validation, with concrete
/// character offsets.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedDenotation {
    pub begin: usize,
    pub end: usize,
    pub id: Option<String>,
    pub obj: String,
}

/// How a candidate span relates to an already-accepted one.
#[derive(Clone, Copy, Debug, PartialEq)]
enum SpanRelation {
    Identical,
    InsideAccepted,
    ContainsAccepted,
    Crossing,
    Disjoint,
}

fn classify(cand: (usize, usize), accepted: (usize, usize)) -> SpanRelation {
    let (cb, ce) = cand;
    let (ab, ae) = accepted;

    if cb == ab && ce == ae {
        SpanRelation::Identical
    } else if ab <= cb && ce <= ae {
        SpanRelation::InsideAccepted
    } else if cb <= ab && ae <= ce {
        SpanRelation::ContainsAccepted
    } else if ce <= ab || ae <= cb {
        SpanRelation::Disjoint
    } else {
        SpanRelation::Crossing
    }
}

/// Reduces raw denotations to the ordered subset that can be encoded.
///
/// Validation drops a denotation outright when a bound is not an integer
/// value, `begin < 0`, `begin >= end`, or `end` exceeds the text length
/// (in characters).
///
/// Conflicts among the survivors are resolved in input order:
/// - an exact duplicate of an accepted span is rejected;
/// - nesting keeps the outer span, retracting an already-accepted inner
///   one if the outer arrives later;
/// - crossing rejects both the candidate and the accepted span it
///   crosses;
/// - disjoint or exactly adjacent spans coexist.
pub fn resolve_denotations(denotations: &[Denotation], text_len: usize) -> Vec<ResolvedDenotation> {
    let mut accepted: Vec<ResolvedDenotation> = Vec::new();

    'candidates: for denotation in denotations {
        let (begin, end) = match valid_span(denotation, text_len) {
            Some(span) => span,
            None => continue,
        };

        let mut retract: Vec<usize> = Vec::new();
        let mut crossed = false;
        for (i, a) in accepted.iter().enumerate() {
            match classify((begin, end), (a.begin, a.end)) {
                SpanRelation::Identical | SpanRelation::InsideAccepted => continue 'candidates,
                SpanRelation::ContainsAccepted => retract.push(i),
                SpanRelation::Crossing => {
                    retract.push(i);
                    crossed = true;
                }
                SpanRelation::Disjoint => {}
            }
        }

        for &i in retract.iter().rev() {
            accepted.remove(i);
        }
        if !crossed {
            accepted.push(ResolvedDenotation {
                begin,
                end,
                id: denotation.id.clone(),
                obj: denotation.obj.clone(),
            });
        }
    }

    accepted
}

fn valid_span(denotation: &Denotation, text_len: usize) -> Option<(usize, usize)> {
    let begin = denotation.span.begin.as_int()?;
    let end = denotation.span.end.as_int()?;
    if begin < 0 || begin >= end || end as usize > text_len {
        return None;
    }
    Some((begin as usize, end as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bound, RawSpan};

    const LEN: usize = 42;

    fn d(begin: usize, end: usize) -> Denotation {
        Denotation::new(begin, end, "Person")
    }

    fn spans(resolved: &[ResolvedDenotation]) -> Vec<(usize, usize)> {
        resolved.iter().map(|r| (r.begin, r.end)).collect()
    }

    #[test]
    fn keeps_valid_disjoint_spans() {
        let resolved = resolve_denotations(&[d(0, 9), d(29, 41)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9), (29, 41)]);
    }

    #[test]
    fn adjacent_spans_coexist() {
        let resolved = resolve_denotations(&[d(0, 9), d(9, 12)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9), (9, 12)]);
    }

    #[test]
    fn duplicate_span_keeps_the_first() {
        let first = Denotation::with_id("T1", 0, 9, "Person");
        let second = Denotation::with_id("T2", 0, 9, "Organization");
        let resolved = resolve_denotations(&[first, second], LEN);
        assert_eq!(resolved.len(), 1);
        assert_eq!(resolved[0].id.as_deref(), Some("T1"));
    }

    #[test]
    fn inner_span_after_outer_is_rejected() {
        let resolved = resolve_denotations(&[d(0, 9), d(2, 6)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9)]);
    }

    #[test]
    fn outer_span_retracts_accepted_inner() {
        let resolved = resolve_denotations(&[d(2, 6), d(0, 9)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9)]);
    }

    #[test]
    fn shared_begin_keeps_outer() {
        let resolved = resolve_denotations(&[d(0, 4), d(0, 9)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9)]);
    }

    #[test]
    fn shared_end_keeps_outer() {
        let resolved = resolve_denotations(&[d(6, 9), d(0, 9)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9)]);
    }

    #[test]
    fn crossing_spans_reject_both() {
        let resolved = resolve_denotations(&[d(0, 9), d(8, 11)], LEN);
        assert!(resolved.is_empty());
    }

    #[test]
    fn negative_begin_is_dropped() {
        let bad = Denotation {
            id: None,
            span: RawSpan {
                begin: Bound::Int(-1),
                end: Bound::Int(9),
            },
            obj: "Person".into(),
        };
        assert!(resolve_denotations(&[bad], LEN).is_empty());
    }

    #[test]
    fn inverted_span_is_dropped() {
        assert!(resolve_denotations(&[d(4, 0)], LEN).is_empty());
        assert!(resolve_denotations(&[d(4, 4)], LEN).is_empty());
    }

    #[test]
    fn out_of_bounds_span_is_dropped() {
        assert!(resolve_denotations(&[d(100, 200)], LEN).is_empty());
        assert!(resolve_denotations(&[d(40, 43)], LEN).is_empty());
    }

    #[test]
    fn non_integer_bounds_are_dropped() {
        let fractional = Denotation {
            id: None,
            span: serde_json::from_str(r#"{"begin": 0.1, "end": 9.6}"#).unwrap(),
            obj: "Person".into(),
        };
        let stringly = Denotation {
            id: None,
            span: serde_json::from_str(r#"{"begin": "0", "end": "9"}"#).unwrap(),
            obj: "Organization".into(),
        };
        assert!(resolve_denotations(&[fractional, stringly], LEN).is_empty());
    }

    #[test]
    fn invalid_candidate_does_not_disturb_accepted_spans() {
        let resolved = resolve_denotations(&[d(0, 9), d(4, 0), d(29, 41)], LEN);
        assert_eq!(spans(&resolved), vec![(0, 9), (29, 41)]);
    }
}
