//! Reference-fallback evidence.
//!
//! Without search credentials the retriever links into fixed, reputable
//! reference sites, parameterized by the claim text. Only the query
//! parameter varies per claim, so fallback evidence is not claim-specific
//! content — a known weak point in the scoring signal, kept as designed.

use shared_types::EvidenceSnippet;
use url::Url;

use super::domains;

/// Reference search pages and the query parameter each one expects
const REFERENCE_SITES: &[(&str, &str)] = &[
    ("https://scholar.google.com/scholar", "q"),
    ("https://www.britannica.com/search", "query"),
    ("https://en.wikipedia.org/wiki/Special:Search", "search"),
    ("https://www.who.int/search", "q"),
    ("https://www.nature.com/search", "q"),
    ("https://www.sciencedirect.com/search", "qs"),
];

const MAX_FALLBACK_SNIPPETS: usize = 3;

/// Synthesize up to three reference snippets for a claim.
pub fn reference_snippets(claim: &str) -> Vec<EvidenceSnippet> {
    reference_urls(claim)
        .into_iter()
        .filter(|url| domains::is_allowed(url.as_str()))
        .take(MAX_FALLBACK_SNIPPETS)
        .enumerate()
        .map(|(index, url)| EvidenceSnippet {
            title: format!("Reference {}: {}…", index + 1, truncate_chars(claim, 48)),
            snippet: format!(
                "Reference page relevant to: {}…",
                truncate_chars(claim, 120)
            ),
            url: url.into(),
            relevance_score: (60 + index * 10) as f32,
        })
        .collect()
}

/// Search/result URLs for a claim, one per reference site, with the claim
/// URL-encoded into the query string.
pub fn reference_urls(claim: &str) -> Vec<Url> {
    REFERENCE_SITES
        .iter()
        .filter_map(|(base, param)| Url::parse_with_params(base, &[(*param, claim)]).ok())
        .collect()
}

fn truncate_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_returns_three_allow_listed_snippets() {
        let snippets = reference_snippets("The Earth orbits the Sun");

        assert_eq!(snippets.len(), 3);
        for snippet in &snippets {
            assert!(domains::is_allowed(&snippet.url), "host not allowed: {}", snippet.url);
        }
    }

    #[test]
    fn test_relevance_steps_from_sixty() {
        let snippets = reference_snippets("The Earth orbits the Sun");
        let scores: Vec<f32> = snippets.iter().map(|s| s.relevance_score).collect();
        assert_eq!(scores, vec![60.0, 70.0, 80.0]);
    }

    #[test]
    fn test_urls_carry_the_encoded_claim() {
        let snippets = reference_snippets("vaccines cause autism");
        for snippet in &snippets {
            assert!(
                snippet.url.contains("vaccines%20cause%20autism")
                    || snippet.url.contains("vaccines+cause+autism"),
                "claim missing from query: {}",
                snippet.url
            );
        }
    }

    #[test]
    fn test_titles_embed_the_claim_head() {
        let claim = "a".repeat(100);
        let snippets = reference_snippets(&claim);
        assert!(snippets[0].title.starts_with("Reference 1: "));
        assert!(snippets[0].title.contains(&"a".repeat(48)));
        assert!(!snippets[0].title.contains(&"a".repeat(49)));
    }

    #[test]
    fn test_every_reference_url_parses() {
        let urls = reference_urls("any claim at all");
        assert_eq!(urls.len(), REFERENCE_SITES.len());
    }
}
