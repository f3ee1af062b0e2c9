use tracing::debug;

use super::types::{EntitySpan, TextBlock};
use super::TARGET_SEGMENT;
use crate::lexicon::TypeLexicon;

/// Partition one block of run-on text into candidate entity names.
///
/// The cursor repeatedly jumps to the earliest type phrase; everything from
/// the cursor to the end of that phrase becomes one span, provided the text
/// after the phrase starts with an uppercase letter (or the block ends there).
/// A phrase followed by lowercase text is internal to the current name and is
/// skipped over. Names without any recognized type token cannot be separated
/// and come out as one combined span for manual review.
pub fn detect_spans(block: &TextBlock, lexicon: &TypeLexicon) -> Vec<EntitySpan> {
    let text = block.text.as_str();
    let mut spans = Vec::new();
    let mut cursor = 0usize;
    let mut search_from = 0usize;

    while let Some((_, end)) = lexicon.find_type_phrase(text, search_from) {
        let rest = text[end..].trim_start();
        let at_boundary = rest.is_empty()
            || rest.chars().next().is_some_and(|c| c.is_uppercase())
            || !rest.chars().any(|c| c.is_alphabetic());
        if !at_boundary {
            search_from = end;
            continue;
        }

        if let Some(span) = make_span(text, cursor, end, block.page) {
            debug!(target: TARGET_SEGMENT, "Detected span '{}'", span.text);
            spans.push(span);
        }
        cursor = end;
        search_from = end;
    }

    // Trailing remainder survives only if it still names something.
    let rest = &text[cursor..];
    if rest.chars().any(|c| c.is_uppercase()) {
        if let Some(span) = make_span(text, cursor, text.len(), block.page) {
            debug!(target: TARGET_SEGMENT, "Detected trailing span '{}'", span.text);
            spans.push(span);
        }
    }

    spans
}

/// Re-run detection with an extended pattern set over spans the reviewer has
/// not yet accepted; accepted spans pass through untouched.
pub fn expand_spans(spans: Vec<EntitySpan>, lexicon: &TypeLexicon) -> Vec<EntitySpan> {
    let mut out = Vec::with_capacity(spans.len());
    for span in spans {
        if span.is_accepted() {
            out.push(span);
            continue;
        }
        let block = TextBlock::new(&span.text, span.page);
        let detected = detect_spans(&block, lexicon);
        if detected.len() > 1 {
            debug!(
                target: TARGET_SEGMENT,
                "Extended pass split '{}' into {} spans", span.text, detected.len()
            );
            for mut sub in detected {
                sub.start_offset += span.start_offset;
                sub.end_offset += span.start_offset;
                out.push(sub);
            }
        } else {
            out.push(span);
        }
    }
    out
}

/// Build a span over `text[start..end]` with surrounding whitespace excluded.
fn make_span(text: &str, start: usize, end: usize, page: Option<u32>) -> Option<EntitySpan> {
    let slice = &text[start..end];
    let start = start + (slice.len() - slice.trim_start().len());
    let end = end - (slice.len() - slice.trim_end().len());
    if start >= end {
        return None;
    }
    Some(EntitySpan::new(&text[start..end], page, start, end))
}
