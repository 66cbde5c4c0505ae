//! Reachability validation for evidence links.
//!
//! Probes run concurrently under one shared deadline for the whole pass.
//! A snippet whose probe fails, returns a non-success status, or is still
//! in flight at the deadline is silently dropped; validation is never a
//! pipeline error.

use std::time::Duration;

use futures::future::join_all;
use shared_types::EvidenceSnippet;
use tokio::time::{timeout_at, Instant};

/// Keep only snippets whose URLs answer a cheap probe within `budget`.
/// Output order matches input order.
pub async fn filter_reachable(
    client: &reqwest::Client,
    snippets: Vec<EvidenceSnippet>,
    budget: Duration,
) -> Vec<EvidenceSnippet> {
    if snippets.is_empty() {
        return snippets;
    }

    let deadline = Instant::now() + budget;
    let probes = snippets.into_iter().map(|snippet| {
        let client = client.clone();
        async move {
            match timeout_at(deadline, probe(&client, &snippet.url)).await {
                Ok(true) => Some(snippet),
                Ok(false) => {
                    tracing::debug!(url = %snippet.url, "dropping unreachable evidence link");
                    None
                }
                Err(_) => {
                    tracing::debug!(url = %snippet.url, "evidence probe hit validation deadline");
                    None
                }
            }
        }
    });

    join_all(probes).await.into_iter().flatten().collect()
}

/// HEAD-style existence check. Some hosts answer HEAD poorly, so a
/// non-success status gets one quick GET retry.
async fn probe(client: &reqwest::Client, url: &str) -> bool {
    let Ok(response) = client.head(url).send().await else {
        return false;
    };
    if response.status().is_success() {
        return true;
    }

    matches!(
        client.get(url).send().await,
        Ok(retry) if retry.status().is_success()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snippet(url: &str) -> EvidenceSnippet {
        EvidenceSnippet {
            title: "t".to_string(),
            snippet: "s".to_string(),
            url: url.to_string(),
            relevance_score: 60.0,
        }
    }

    #[tokio::test]
    async fn test_empty_input_skips_probing() {
        let client = reqwest::Client::new();
        let kept = filter_reachable(&client, vec![], Duration::from_millis(10)).await;
        assert!(kept.is_empty());
    }

    #[tokio::test]
    async fn test_unresolvable_host_is_dropped() {
        let client = reqwest::Client::new();
        let kept = filter_reachable(
            &client,
            vec![snippet("https://does-not-resolve.invalid/page")],
            Duration::from_millis(500),
        )
        .await;
        assert!(kept.is_empty());
    }

    #[tokio::test]
    async fn test_deadline_bounds_the_whole_pass() {
        let client = reqwest::Client::new();
        let snippets: Vec<_> = (0..4)
            .map(|i| snippet(&format!("https://does-not-resolve.invalid/{i}")))
            .collect();

        let started = std::time::Instant::now();
        let kept = filter_reachable(&client, snippets, Duration::from_millis(200)).await;
        assert!(kept.is_empty());
        // All four probes share one deadline rather than 200ms each
        assert!(started.elapsed() < Duration::from_millis(2000));
    }
}
