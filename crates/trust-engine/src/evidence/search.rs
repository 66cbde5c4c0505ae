//! Credentialed web-search evidence (Bing Web Search v7 response shape).

use reqwest::StatusCode;
use serde::Deserialize;
use shared_types::EvidenceSnippet;
use thiserror::Error;
use url::Url;

/// Top search results read per claim
const MAX_SEARCH_RESULTS: usize = 3;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("search endpoint is not a valid URL: {0}")]
    BadEndpoint(#[from] url::ParseError),

    #[error("search request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("search API returned {0}")]
    Status(StatusCode),
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(rename = "webPages")]
    web_pages: Option<WebPages>,
}

#[derive(Debug, Deserialize)]
struct WebPages {
    #[serde(default)]
    value: Vec<WebPage>,
}

#[derive(Debug, Deserialize)]
struct WebPage {
    name: Option<String>,
    url: String,
    snippet: Option<String>,
    description: Option<String>,
}

/// Issue one search request for the claim text. A single attempt; the
/// caller falls back to reference evidence on any error.
pub async fn search_web(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    claim: &str,
) -> Result<Vec<EvidenceSnippet>, SearchError> {
    let url = Url::parse_with_params(
        endpoint,
        &[("q", claim), ("textDecorations", "false"), ("textFormat", "Raw")],
    )?;

    let response = client
        .get(url)
        .header("Ocp-Apim-Subscription-Key", api_key)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(SearchError::Status(response.status()));
    }

    let body: SearchResponse = response.json().await?;
    Ok(map_results(body))
}

fn map_results(body: SearchResponse) -> Vec<EvidenceSnippet> {
    body.web_pages
        .map(|pages| pages.value)
        .unwrap_or_default()
        .into_iter()
        .take(MAX_SEARCH_RESULTS)
        .enumerate()
        .map(|(rank, page)| EvidenceSnippet {
            title: page.name.unwrap_or_else(|| format!("Result {}", rank + 1)),
            snippet: page
                .snippet
                .or(page.description)
                .unwrap_or_else(|| "Web result related to the claim".to_string()),
            url: page.url,
            relevance_score: (70 + rank * 10).min(100) as f32,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(json: &str) -> SearchResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_maps_top_three_results_with_ranked_relevance() {
        let body = parse(
            r#"{"webPages": {"value": [
                {"name": "A", "url": "https://en.wikipedia.org/a", "snippet": "first"},
                {"name": "B", "url": "https://en.wikipedia.org/b", "snippet": "second"},
                {"name": "C", "url": "https://en.wikipedia.org/c", "snippet": "third"},
                {"name": "D", "url": "https://en.wikipedia.org/d", "snippet": "fourth"}
            ]}}"#,
        );

        let snippets = map_results(body);
        assert_eq!(snippets.len(), 3);
        let scores: Vec<f32> = snippets.iter().map(|s| s.relevance_score).collect();
        assert_eq!(scores, vec![70.0, 80.0, 90.0]);
        assert_eq!(snippets[0].title, "A");
    }

    #[test]
    fn test_missing_fields_get_placeholders() {
        let body = parse(r#"{"webPages": {"value": [{"url": "https://www.who.int/x"}]}}"#);
        let snippets = map_results(body);

        assert_eq!(snippets[0].title, "Result 1");
        assert_eq!(snippets[0].snippet, "Web result related to the claim");
    }

    #[test]
    fn test_description_backfills_snippet() {
        let body = parse(
            r#"{"webPages": {"value": [
                {"name": "A", "url": "https://www.who.int/x", "description": "from description"}
            ]}}"#,
        );
        assert_eq!(map_results(body)[0].snippet, "from description");
    }

    #[test]
    fn test_empty_response_maps_to_no_snippets() {
        assert!(map_results(parse("{}")).is_empty());
        assert!(map_results(parse(r#"{"webPages": {"value": []}}"#)).is_empty());
    }
}
