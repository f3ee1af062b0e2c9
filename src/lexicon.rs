use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Fixed multi-word organizational phrases. Ordered before the single-word
/// endings so "Chamber of Commerce" is never cut short at "Chamber".
const MULTI_WORD_PATTERNS: &[&str] = &[
    r"(?i:\bchamber\s+of\s+commerce)\b",
    r"(?i:\bchurch\s+of\s+christ)\b",
    r"(?i:\binaugural\s+committee)\b",
    r"(?i:\bbuilding\s+congress)\b",
    r"(?i:\bboard\s+of\s+trade)\b",
    // Institutional ending followed by a bounded connective tail, as in
    // "Institute for Policy Studies" or "Council on Foreign Relations".
    r"\b(?i:institute|institution|foundation|coalition|alliance|association|council|cent(?:er|re)|network|society|trust|fund|initiative)s?\s+(?i:for|of|on)\s+[A-Z][A-Za-z&]*(?:\s+[A-Z][A-Za-z&]*)?",
];

/// Bare institutional endings, attempted after the multi-word forms.
const SINGLE_WORD_PATTERNS: &[&str] = &[
    r"(?i:\b(?:institutes?|institutions?|foundations?|coalitions?|alliances?|associations?|councils?|cent(?:ers?|res?)|networks?|societ(?:y|ies)|trusts?|funds?|organi[sz]ations?|initiatives?|committees?|congress(?:es)?|relations))\b",
    r"(?i:\b(?:corporations?|incorporated|limited|compan(?:y|ies)))\b",
    // Corporate abbreviations stay case-sensitive so prose like "co" or "ag"
    // inside lowercase text never anchors a boundary.
    r"\b(?:Inc|Ltd|LLC|L\.L\.C|PLC|AG|GmbH|S\.A|N\.V|B\.V|Corp|Co)\b\.?",
];

/// Locale-specific suffix variants only consulted by the secondary
/// "detect more splits" pass.
const EXTENDED_PATTERNS: &[&str] = &[
    r"\b(?:S\.p\.A|S\.A\.R\.L|SARL|S\.A\.S|SpA|Srl|SA|NV|BV)\b\.?",
    r"\b(?:AB|A/S|A\.S|AS|Oyj|KG|mbH|e\.V)\b\.?",
    r"\b(?:Pte|Pty|Sdn\.?\s+Bhd|K\.K|Ltda)\b\.?",
];

/// Bare suffix and type tokens, compared lowercased with dots removed.
const SUFFIX_TOKENS: &[&str] = &[
    // Corporate suffixes
    "limited", "ltd", "llc", "inc", "incorporated", "corp", "corporation", "co", "company",
    "companies",
    "plc", "gmbh", "ag", "sa", "sarl", "sas", "spa", "srl", "nv", "bv", "ab", "as", "oyj",
    "kg", "mbh", "ev", "pte", "pty", "sdn", "bhd", "kk", "ltda",
    // Institutional endings
    "institute", "institutes", "institution", "institutions", "foundation", "foundations",
    "coalition", "coalitions", "alliance", "alliances", "association", "associations",
    "council", "councils", "center", "centers", "centre", "centres", "network", "networks",
    "society", "societies", "trust", "trusts", "fund", "funds", "organization",
    "organizations", "organisation", "organisations", "initiative", "initiatives",
    "committee", "committees", "congress", "congresses", "group", "groups",
];

lazy_static! {
    static ref BASE_LEXICON: TypeLexicon = TypeLexicon::compile(false);
    static ref EXTENDED_LEXICON: TypeLexicon = TypeLexicon::compile(true);
}

/// Static catalog of organizational-type tokens and phrases. Loaded once per
/// process and injected by shared reference into segmentation, recombination
/// and normalization; it holds no mutable state.
pub struct TypeLexicon {
    phrases: Vec<Regex>,
    suffix_tokens: HashSet<&'static str>,
    extended: bool,
}

impl TypeLexicon {
    /// Process-wide base lexicon.
    pub fn base() -> &'static TypeLexicon {
        &BASE_LEXICON
    }

    /// Superset lexicon with locale-specific suffixes for the secondary pass.
    pub fn extended() -> &'static TypeLexicon {
        &EXTENDED_LEXICON
    }

    fn compile(extended: bool) -> Self {
        let mut sources: Vec<&str> = Vec::new();
        sources.extend(MULTI_WORD_PATTERNS);
        sources.extend(SINGLE_WORD_PATTERNS);
        if extended {
            sources.extend(EXTENDED_PATTERNS);
        }

        let phrases = sources
            .iter()
            .map(|p| Regex::new(p).unwrap_or_else(|e| panic!("invalid lexicon pattern {p}: {e}")))
            .collect();

        TypeLexicon {
            phrases,
            suffix_tokens: SUFFIX_TOKENS.iter().copied().collect(),
            extended,
        }
    }

    pub fn is_extended(&self) -> bool {
        self.extended
    }

    /// Whether a single token is a recognized corporate suffix or
    /// organizational-type word. Tolerates punctuation ("Inc.", "L.L.C.").
    pub fn is_type_token(&self, token: &str) -> bool {
        let cleaned: String = token
            .trim_matches(|c: char| !c.is_alphanumeric())
            .chars()
            .filter(|c| *c != '.')
            .collect::<String>()
            .to_lowercase();
        !cleaned.is_empty() && self.suffix_tokens.contains(cleaned.as_str())
    }

    /// Extent of a type phrase anchored exactly at `start`, or None.
    /// Patterns are tried in declaration order, multi-word phrases first.
    pub fn match_type_phrase(&self, text: &str, start: usize) -> Option<usize> {
        for re in &self.phrases {
            if let Some(m) = re.find_at(text, start) {
                if m.start() == start {
                    return Some(m.end());
                }
            }
        }
        None
    }

    /// Earliest type phrase at or after `from`. Ties on start position go to
    /// the earlier-declared pattern, so multi-word phrases win over their own
    /// leading word.
    pub fn find_type_phrase(&self, text: &str, from: usize) -> Option<(usize, usize)> {
        let mut best: Option<(usize, usize)> = None;
        for re in &self.phrases {
            if let Some(m) = re.find_at(text, from) {
                match best {
                    Some((start, _)) if m.start() >= start => {}
                    _ => best = Some((m.start(), m.end())),
                }
            }
        }
        best
    }

    /// Whether the trimmed text is nothing but a type phrase or type token,
    /// e.g. an orphaned "Foundation" or "Chamber of Commerce" line.
    pub fn is_type_phrase(&self, text: &str) -> bool {
        let t = text.trim();
        if t.is_empty() {
            return false;
        }
        match self.match_type_phrase(t, 0) {
            Some(end) => t[end..].trim().is_empty(),
            None => false,
        }
    }

    /// Whether the line ends on a recognized suffix token or type phrase.
    pub fn ends_with_type_phrase(&self, text: &str) -> bool {
        let t = text.trim_end();
        if t.is_empty() {
            return false;
        }
        if let Some(last) = t.split_whitespace().last() {
            if self.is_type_token(last) {
                return true;
            }
        }
        self.phrases
            .iter()
            .any(|re| re.find_iter(t).any(|m| m.end() == t.len()))
    }
}
