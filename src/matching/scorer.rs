use strsim::normalized_levenshtein;
use tracing::debug;

use super::normalizer::{NameNormalizer, NormalizedName};
use super::types::{DirectoryRecord, MatchResult};
use super::TARGET_MATCH;
use crate::lexicon::TypeLexicon;
use crate::segment::types::EntitySpan;

// Composite weights, summing to 1.0
const RATIO_WEIGHT: f64 = 0.4;
const PARTIAL_WEIGHT: f64 = 0.3;
const TOKEN_SORT_WEIGHT: f64 = 0.3;

/// Whole-string similarity on a 0-100 scale, edit-distance based.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 100.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best similarity of the shorter string against any equal-length window of
/// the longer one. Handles one name being a prefix or suffix of the other.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let (short, long) = if a_chars.len() <= b_chars.len() {
        (&a_chars, &b_chars)
    } else {
        (&b_chars, &a_chars)
    };

    if short.is_empty() {
        return ratio(a, b);
    }

    let needle: String = short.iter().collect();
    let mut best = 0.0f64;
    for start in 0..=(long.len() - short.len()) {
        let window: String = long[start..start + short.len()].iter().collect();
        let score = ratio(&needle, &window);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

/// Similarity of the two strings with their tokens sorted, which makes the
/// comparison insensitive to word order.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    ratio(&sorted_tokens(a), &sorted_tokens(b))
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

/// Weighted blend of the three sub-scores, clamped to [0, 100].
pub fn composite_score(a: &str, b: &str) -> f64 {
    let score = RATIO_WEIGHT * ratio(a, b)
        + PARTIAL_WEIGHT * partial_ratio(a, b)
        + TOKEN_SORT_WEIGHT * token_sort_ratio(a, b);
    score.clamp(0.0, 100.0)
}

/// Scores directory candidates against a query span and selects the best one
/// against a configured acceptance threshold.
pub struct MatchScorer<'a> {
    normalizer: NameNormalizer<'a>,
    threshold: f64,
}

impl<'a> MatchScorer<'a> {
    pub fn new(lexicon: &'a TypeLexicon, threshold: f64) -> Self {
        MatchScorer {
            normalizer: NameNormalizer::new(lexicon),
            threshold,
        }
    }

    pub fn normalize(&self, raw: &str) -> NormalizedName {
        self.normalizer.normalize(raw)
    }

    /// Produce the single MatchResult for one query span. Zero candidates is
    /// a normal no-match outcome, never an error. Ties on score go to the
    /// candidate with the shortest raw name.
    pub fn score(&self, span: &EntitySpan, candidates: &[DirectoryRecord]) -> MatchResult {
        let query = self.normalizer.normalize(&span.text);

        let mut best: Option<(&DirectoryRecord, f64)> = None;
        for record in candidates {
            let candidate = self.normalizer.normalize(&record.name);
            let score = composite_score(&query.canonical, &candidate.canonical);
            debug!(
                target: TARGET_MATCH,
                "Candidate '{}' scored {:.2} against '{}'", record.name, score, span.text
            );
            let better = match best {
                None => true,
                Some((current, current_score)) => {
                    score > current_score
                        || (score == current_score && record.name.len() < current.name.len())
                }
            };
            if better {
                best = Some((record, score));
            }
        }

        match best {
            Some((record, score)) => MatchResult {
                query: span.clone(),
                best_record: Some(record.clone()),
                accepted: score >= self.threshold,
                score,
            },
            None => MatchResult {
                query: span.clone(),
                best_record: None,
                score: 0.0,
                accepted: false,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer(threshold: f64) -> MatchScorer<'static> {
        MatchScorer::new(TypeLexicon::base(), threshold)
    }

    fn record(name: &str) -> DirectoryRecord {
        DirectoryRecord {
            name: name.to_string(),
            jurisdiction: None,
            identifier: None,
            status: None,
            source: "test".to_string(),
        }
    }

    #[test]
    fn test_identical_strings_score_100() {
        assert_eq!(ratio("heritage", "heritage"), 100.0);
        assert_eq!(composite_score("george w bush", "george w bush"), 100.0);
    }

    #[test]
    fn test_scores_stay_in_bounds() {
        for (a, b) in [
            ("", ""),
            ("a", ""),
            ("abc", "xyz"),
            ("abundance institute", "abundance inst"),
            ("x", "a very much longer string of tokens"),
        ] {
            let score = composite_score(a, b);
            assert!((0.0..=100.0).contains(&score), "{a} vs {b} -> {score}");
        }
    }

    #[test]
    fn test_partial_ratio_rewards_containment() {
        let whole = ratio("abundance", "abundance institute");
        let partial = partial_ratio("abundance", "abundance institute");
        assert_eq!(partial, 100.0);
        assert!(partial > whole);
    }

    #[test]
    fn test_token_sort_handles_reordered_words() {
        let score = token_sort_ratio("bush foundation george w", "george w bush foundation");
        assert_eq!(score, 100.0);
        assert!(ratio("bush foundation george w", "george w bush foundation") < 100.0);
    }

    #[test]
    fn test_self_match_is_accepted() {
        let scorer = scorer(80.0);
        let span = EntitySpan::new("Heritage Foundation", Some(1), 0, 19);
        let result = scorer.score(&span, &[record("Heritage Foundation")]);
        assert_eq!(result.score, 100.0);
        assert!(result.accepted);
    }

    #[test]
    fn test_best_candidate_wins() {
        let scorer = scorer(80.0);
        let span = EntitySpan::new("Cato Institute", Some(1), 0, 14);
        let result = scorer.score(
            &span,
            &[record("Catopia Limited"), record("Cato Institute"), record("NATO")],
        );
        assert_eq!(result.best_record.unwrap().name, "Cato Institute");
        assert!(result.accepted);
    }

    #[test]
    fn test_tie_breaks_to_shortest_raw_name() {
        let scorer = scorer(80.0);
        let span = EntitySpan::new("Acme", None, 0, 4);
        // Both candidates normalize to "acme", scoring identically.
        let result = scorer.score(&span, &[record("Acme Incorporated"), record("Acme Inc")]);
        assert_eq!(result.best_record.unwrap().name, "Acme Inc");
    }

    #[test]
    fn test_zero_candidates_is_a_normal_outcome() {
        let scorer = scorer(80.0);
        let span = EntitySpan::new("Unknown Entity", None, 0, 14);
        let result = scorer.score(&span, &[]);
        assert!(result.best_record.is_none());
        assert_eq!(result.score, 0.0);
        assert!(!result.accepted);
    }

    #[test]
    fn test_threshold_monotonicity() {
        let span = EntitySpan::new("Abundance Institute", None, 0, 19);
        let candidates = [
            record("Abundance Institute"),
            record("Abundance Inst"),
            record("Something Else Entirely"),
        ];
        let mut previous = usize::MAX;
        for threshold in [0.0, 50.0, 80.0, 95.0, 100.1] {
            let scorer = MatchScorer::new(TypeLexicon::base(), threshold);
            let accepted = candidates
                .iter()
                .map(|c| scorer.score(&span, std::slice::from_ref(c)))
                .filter(|r| r.accepted)
                .count();
            assert!(accepted <= previous);
            previous = accepted;
        }
    }

    #[test]
    fn test_suffix_differences_do_not_hurt_score() {
        // The directory returns the registered name with its suffix; the
        // normalizer strips it on both sides before comparison.
        let scorer = scorer(80.0);
        let span = EntitySpan::new("Amazon.com", None, 0, 10);
        let result = scorer.score(&span, &[record("Amazon.com, Inc.")]);
        assert_eq!(result.score, 100.0);
    }
}
