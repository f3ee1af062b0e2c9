use std::collections::HashMap;
use tokio::time::{sleep, Duration};
use tracing::{debug, info};

use crate::config::RunConfig;
use crate::directory::DirectoryClient;
use crate::lexicon::TypeLexicon;
use crate::matching::scorer::MatchScorer;
use crate::matching::types::{DirectoryRecord, MatchResult};
use crate::segment::boundary::{detect_spans, expand_spans};
use crate::segment::recombine::recombine_lines;
use crate::segment::types::{EntitySpan, RawLine, TextBlock};
use crate::segment::TARGET_SEGMENT;
use crate::matching::TARGET_MATCH;

/// Split pasted input into blocks on newlines, commas, semicolons and pipes.
pub fn parse_pasted(text: &str) -> Vec<TextBlock> {
    text.split(['\n', ',', ';', '|'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| TextBlock::new(s, None))
        .collect()
}

/// Segment extracted lines: recombine mid-name splits, then detect entity
/// boundaries per block. Optionally follows up with the extended-pattern
/// pass over everything not yet accepted.
pub fn segment_lines(lines: &[RawLine], extended: bool) -> Vec<EntitySpan> {
    let blocks = recombine_lines(lines, TypeLexicon::base());
    debug!(
        target: TARGET_SEGMENT,
        "Recombined {} lines into {} blocks", lines.len(), blocks.len()
    );
    segment_blocks(&blocks, extended)
}

/// Boundary detection over pre-split blocks.
pub fn segment_blocks(blocks: &[TextBlock], extended: bool) -> Vec<EntitySpan> {
    let mut spans: Vec<EntitySpan> = blocks
        .iter()
        .flat_map(|block| detect_spans(block, TypeLexicon::base()))
        .collect();
    if extended {
        spans = expand_spans(spans, TypeLexicon::extended());
    }
    info!(
        target: TARGET_SEGMENT,
        "Detected {} entity spans in {} blocks", spans.len(), blocks.len()
    );
    spans
}

/// Resolve every span against the directory, in input order. Lookups are
/// deduplicated per canonical form through an in-memory cache scoped to this
/// call; a minimum delay separates consecutive remote calls, while cache hits
/// and local backends never sleep. Every span yields exactly one MatchResult.
pub async fn match_spans(
    spans: &[EntitySpan],
    config: &RunConfig,
    client: &DirectoryClient,
) -> Vec<MatchResult> {
    let lexicon = TypeLexicon::base();
    let scorer = MatchScorer::new(lexicon, config.threshold);
    let delay = Duration::from_secs_f64(config.min_call_delay);

    let mut cache: HashMap<String, Vec<DirectoryRecord>> = HashMap::new();
    let mut results = Vec::with_capacity(spans.len());
    let mut lookups = 0usize;

    for span in spans {
        let canonical = scorer.normalize(&span.text).canonical;
        let candidates = match cache.get(&canonical) {
            Some(cached) => {
                debug!(
                    target: TARGET_MATCH,
                    "Cache hit for '{}' (canonical '{}')", span.text, canonical
                );
                cached.clone()
            }
            None => {
                if lookups > 0 && !delay.is_zero() && client.is_remote() {
                    sleep(delay).await;
                }
                let records = client.lookup(span.text.trim()).await;
                lookups += 1;
                cache.insert(canonical, records.clone());
                records
            }
        };
        results.push(scorer.score(span, &candidates));
    }

    let accepted = results.iter().filter(|r| r.accepted).count();
    info!(
        target: TARGET_MATCH,
        "Matched {} spans with {} directory lookups, {} accepted",
        results.len(),
        lookups,
        accepted
    );
    results
}
