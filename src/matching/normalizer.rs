use serde::{Deserialize, Serialize};
use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use super::TARGET_MATCH;
use crate::lexicon::TypeLexicon;

/// Canonical comparison form of a name, derived once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedName {
    pub original: String,
    pub canonical: String,
    pub core_tokens: Vec<String>,
}

pub struct NameNormalizer<'a> {
    lexicon: &'a TypeLexicon,
}

impl<'a> NameNormalizer<'a> {
    pub fn new(lexicon: &'a TypeLexicon) -> Self {
        NameNormalizer { lexicon }
    }

    /// Case-fold, strip enclosing punctuation, collapse whitespace, then drop
    /// trailing suffix/type tokens. Internal dots and hyphens survive so
    /// "Amazon.com" stays one token. Idempotent over its own canonical form.
    pub fn normalize(&self, raw: &str) -> NormalizedName {
        let folded = fold(raw);
        let mut tokens: Vec<String> = folded
            .split_whitespace()
            .map(trim_token)
            .filter(|t| !t.is_empty())
            .collect();

        // Strip trailing suffixes while something else remains, so
        // "samsung electronics co ltd" reduces all the way to the core name.
        while tokens.len() > 1 && self.lexicon.is_type_token(tokens.last().unwrap()) {
            tokens.pop();
        }

        let canonical = tokens.join(" ");
        debug!(target: TARGET_MATCH, "Normalized '{}' to '{}'", raw, canonical);

        NormalizedName {
            original: raw.to_string(),
            core_tokens: tokens,
            canonical,
        }
    }
}

/// Apostrophe removal, NFKD fold to ASCII, lowercase, punctuation to spaces.
fn fold(raw: &str) -> String {
    let without_apostrophes = raw
        .replace("'s ", " ")
        .replace("'s", "")
        .replace("s' ", "s ")
        .replace(['\'', '\u{2019}'], "");

    without_apostrophes
        .nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase()
        .replace(
            |c: char| !(c.is_alphanumeric() || c.is_whitespace() || matches!(c, '.' | '&' | '-')),
            " ",
        )
}

/// Trim punctuation from token edges, keeping internal dots and hyphens.
fn trim_token(token: &str) -> String {
    token
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(raw: &str) -> NormalizedName {
        NameNormalizer::new(TypeLexicon::base()).normalize(raw)
    }

    #[test]
    fn test_suffix_stripping() {
        let name = normalize("Amazon.com, Inc.");
        assert_eq!(name.canonical, "amazon.com");
        assert_eq!(name.core_tokens, vec!["amazon.com"]);
        assert_eq!(name.original, "Amazon.com, Inc.");
    }

    #[test]
    fn test_repeated_trailing_suffixes() {
        let name = normalize("Samsung Electronics Co., Ltd.");
        assert_eq!(name.canonical, "samsung electronics");
        assert_eq!(normalize("Acme Holding Companies").canonical, "acme holding");
    }

    #[test]
    fn test_whitespace_and_case_folding() {
        let name = normalize("  HERITAGE   Foundation ");
        assert_eq!(name.canonical, "heritage");
        assert_eq!(normalize("Blue-Origin").canonical, "blue-origin");
    }

    #[test]
    fn test_name_that_is_only_a_suffix_is_kept() {
        let name = normalize("Foundation");
        assert_eq!(name.canonical, "foundation");
        assert_eq!(name.core_tokens, vec!["foundation"]);
    }

    #[test]
    fn test_idempotence() {
        for raw in [
            "Amazon.com, Inc.",
            "Samsung Electronics Co., Ltd.",
            "Volkswagen AG",
            "Société Générale S.A.",
            "The ABC Group Holdings Limited",
            "Foundation",
            "McDonald's Corporation",
        ] {
            let once = normalize(raw);
            let twice = normalize(&once.canonical);
            assert_eq!(once.canonical, twice.canonical, "not idempotent for {raw}");
            assert_eq!(once.core_tokens, twice.core_tokens);
        }
    }

    #[test]
    fn test_accent_folding() {
        assert_eq!(normalize("Société Générale S.A.").canonical, "societe generale");
    }

    #[test]
    fn test_possessive_handling() {
        assert_eq!(normalize("McDonald's Corporation").canonical, "mcdonald");
        assert_eq!(normalize("SpaceX's Starlink").canonical, "spacex starlink");
    }

    #[test]
    fn test_empty_input() {
        let name = normalize("   ");
        assert!(name.canonical.is_empty());
        assert!(name.core_tokens.is_empty());
    }
}
