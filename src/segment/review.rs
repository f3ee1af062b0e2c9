use anyhow::{bail, Result};
use tracing::debug;

use super::types::{EntitySpan, ReviewState};
use super::TARGET_SEGMENT;

/// One manual-review operation on an ordered span list.
#[derive(Debug, Clone)]
pub enum SpanEdit {
    /// Replace the text of the span at `index`, keeping its provenance.
    Replace { index: usize, text: String },
    /// Remove the span at `index`.
    Remove { index: usize },
    /// Insert a reviewer-supplied span before `index`.
    Insert { index: usize, text: String },
    /// Freeze the span at `index` for matching.
    Accept { index: usize },
}

/// Apply reviewer edits in order. Indices refer to the list as it stands when
/// each edit is applied. An out-of-range index or empty replacement text is
/// rejected before any further edits run.
pub fn apply_edits(spans: &mut Vec<EntitySpan>, edits: &[SpanEdit]) -> Result<()> {
    for edit in edits {
        match edit {
            SpanEdit::Replace { index, text } => {
                if text.trim().is_empty() {
                    bail!("replacement text for span {} is empty", index);
                }
                let span = span_at_mut(spans, *index)?;
                debug!(
                    target: TARGET_SEGMENT,
                    "Review edit: '{}' -> '{}'", span.text, text
                );
                span.text = text.trim().to_string();
                span.state = ReviewState::Reviewed;
            }
            SpanEdit::Remove { index } => {
                if *index >= spans.len() {
                    bail!("cannot remove span {}: only {} spans", index, spans.len());
                }
                let removed = spans.remove(*index);
                debug!(target: TARGET_SEGMENT, "Review edit: removed '{}'", removed.text);
            }
            SpanEdit::Insert { index, text } => {
                if text.trim().is_empty() {
                    bail!("inserted span text is empty");
                }
                if *index > spans.len() {
                    bail!("cannot insert at {}: only {} spans", index, spans.len());
                }
                spans.insert(*index, EntitySpan::manual(text.trim()));
            }
            SpanEdit::Accept { index } => {
                span_at_mut(spans, *index)?.accept();
            }
        }
    }
    Ok(())
}

fn span_at_mut(spans: &mut [EntitySpan], index: usize) -> Result<&mut EntitySpan> {
    let len = spans.len();
    match spans.get_mut(index) {
        Some(span) => Ok(span),
        None => bail!("span index {} out of range: only {} spans", index, len),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spans() -> Vec<EntitySpan> {
        vec![
            EntitySpan::new("Abundance Institute", Some(1), 0, 19),
            EntitySpan::new("George W Bush Foundation", Some(1), 20, 44),
        ]
    }

    #[test]
    fn test_replace_keeps_provenance() {
        let mut spans = sample_spans();
        apply_edits(
            &mut spans,
            &[SpanEdit::Replace {
                index: 1,
                text: "George W. Bush Foundation".to_string(),
            }],
        )
        .unwrap();
        assert_eq!(spans[1].text, "George W. Bush Foundation");
        assert_eq!(spans[1].page, Some(1));
        assert_eq!(spans[1].start_offset, 20);
        assert_eq!(spans[1].state, ReviewState::Reviewed);
    }

    #[test]
    fn test_remove_and_insert() {
        let mut spans = sample_spans();
        apply_edits(
            &mut spans,
            &[
                SpanEdit::Remove { index: 0 },
                SpanEdit::Insert {
                    index: 1,
                    text: "Open Ran Policy Coalition".to_string(),
                },
            ],
        )
        .unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "George W Bush Foundation");
        assert_eq!(spans[1].text, "Open Ran Policy Coalition");
        assert_eq!(spans[1].state, ReviewState::Reviewed);
    }

    #[test]
    fn test_accept_freezes_span() {
        let mut spans = sample_spans();
        apply_edits(&mut spans, &[SpanEdit::Accept { index: 0 }]).unwrap();
        assert!(spans[0].is_accepted());
        assert!(!spans[1].is_accepted());
    }

    #[test]
    fn test_out_of_range_index_is_rejected() {
        let mut spans = sample_spans();
        assert!(apply_edits(&mut spans, &[SpanEdit::Remove { index: 7 }]).is_err());
        assert!(apply_edits(
            &mut spans,
            &[SpanEdit::Replace {
                index: 2,
                text: "X Foundation".to_string()
            }]
        )
        .is_err());
    }

    #[test]
    fn test_empty_replacement_is_rejected() {
        let mut spans = sample_spans();
        let result = apply_edits(
            &mut spans,
            &[SpanEdit::Replace {
                index: 0,
                text: "   ".to_string(),
            }],
        );
        assert!(result.is_err());
        assert_eq!(spans[0].text, "Abundance Institute");
    }
}
