use tracing::debug;

use super::types::{RawLine, TextBlock};
use super::TARGET_SEGMENT;
use crate::lexicon::TypeLexicon;

/// How many leading tokens of the next line are inspected when deciding
/// whether it starts a new, independently complete name.
const LOOKAHEAD_TOKENS: usize = 5;

/// Merge adjacent lines that were split mid-name by the extractor.
///
/// Single greedy pass: a line that does not end on a type token is joined
/// with its successor unless that successor independently starts a complete
/// name. A line that is nothing but a type phrase ("Foundation", "Chamber of
/// Commerce") attaches backward instead of opening a new block. Ambiguous
/// cases default to not merging.
pub fn recombine_lines(lines: &[RawLine], lexicon: &TypeLexicon) -> Vec<TextBlock> {
    let mut blocks: Vec<TextBlock> = Vec::new();
    let mut current: Option<TextBlock> = None;

    for line in lines {
        let text = line.text.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(block) = current.as_mut() {
            if !lexicon.ends_with_type_phrase(&block.text)
                && !starts_independent_name(text, lexicon)
            {
                debug!(
                    target: TARGET_SEGMENT,
                    "Merging line {} '{}' into '{}'", line.sequence, text, block.text
                );
                block.text.push(' ');
                block.text.push_str(text);
                continue;
            }
            blocks.push(current.take().unwrap());
        }

        // An orphaned type fragment completes the previous block rather than
        // starting a new one.
        if lexicon.is_type_phrase(text) {
            if let Some(last) = blocks.last_mut() {
                debug!(
                    target: TARGET_SEGMENT,
                    "Attaching orphaned type fragment '{}' to '{}'", text, last.text
                );
                last.text.push(' ');
                last.text.push_str(text);
                continue;
            }
        }

        current = Some(TextBlock::new(text, Some(line.page)));
    }

    if let Some(block) = current.take() {
        blocks.push(block);
    }

    blocks
}

/// Heuristic for "this line opens a fresh name": a capitalized non-type word
/// followed by a type phrase within a short lookahead window.
fn starts_independent_name(text: &str, lexicon: &TypeLexicon) -> bool {
    let first = match text.split_whitespace().next() {
        Some(token) => token,
        None => return false,
    };
    if !first.chars().next().is_some_and(|c| c.is_uppercase()) {
        return false;
    }
    if lexicon.is_type_token(first) {
        return false;
    }

    let window_end = prefix_end(text, LOOKAHEAD_TOKENS + 1);
    match lexicon.find_type_phrase(text, 0) {
        Some((start, _)) => start > 0 && start <= window_end,
        None => false,
    }
}

/// Byte offset just past the first `tokens` whitespace-separated tokens.
fn prefix_end(text: &str, tokens: usize) -> usize {
    let mut seen = 0;
    let mut in_token = false;
    for (i, c) in text.char_indices() {
        if c.is_whitespace() {
            in_token = false;
        } else if !in_token {
            in_token = true;
            seen += 1;
            if seen > tokens {
                return i;
            }
        }
    }
    text.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(texts: &[&str]) -> Vec<RawLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| RawLine::new(t, 1, i as u32))
            .collect()
    }

    #[test]
    fn test_merges_name_split_across_lines() {
        let lexicon = TypeLexicon::base();
        let blocks = recombine_lines(&lines(&["Dallas Regional", "Chamber of Commerce"]), lexicon);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Dallas Regional Chamber of Commerce");
        assert_eq!(blocks[0].page, Some(1));
    }

    #[test]
    fn test_complete_lines_stay_separate() {
        let lexicon = TypeLexicon::base();
        let blocks = recombine_lines(
            &lines(&["Heritage Foundation", "Cato Institute"]),
            lexicon,
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Heritage Foundation");
        assert_eq!(blocks[1].text, "Cato Institute");
    }

    #[test]
    fn test_next_line_starting_new_name_is_not_merged() {
        let lexicon = TypeLexicon::base();
        // "Dallas Regional" is incomplete, but the next line clearly starts
        // its own name, so the tie resolves to not merging.
        let blocks = recombine_lines(
            &lines(&["Dallas Regional", "Heritage Foundation"]),
            lexicon,
        );
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].text, "Dallas Regional");
    }

    #[test]
    fn test_orphaned_fragment_attaches_backward() {
        let lexicon = TypeLexicon::base();
        let blocks = recombine_lines(
            &lines(&["Bill & Melinda Gates Foundation", "Institute"]),
            lexicon,
        );
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Bill & Melinda Gates Foundation Institute");
    }

    #[test]
    fn test_suffix_continuation_line() {
        let lexicon = TypeLexicon::base();
        let blocks = recombine_lines(&lines(&["Volkswagen", "AG"]), lexicon);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Volkswagen AG");
    }

    #[test]
    fn test_empty_and_blank_lines_are_skipped() {
        let lexicon = TypeLexicon::base();
        let blocks = recombine_lines(&lines(&["", "  ", "Cato Institute"]), lexicon);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].text, "Cato Institute");
    }

    #[test]
    fn test_no_lines_yields_no_blocks() {
        let lexicon = TypeLexicon::base();
        assert!(recombine_lines(&[], lexicon).is_empty());
    }

    #[test]
    fn test_block_keeps_page_of_first_line() {
        let lexicon = TypeLexicon::base();
        let input = vec![
            RawLine::new("Dallas Regional", 3, 0),
            RawLine::new("Chamber of Commerce", 4, 1),
        ];
        let blocks = recombine_lines(&input, lexicon);
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].page, Some(3));
    }
}
