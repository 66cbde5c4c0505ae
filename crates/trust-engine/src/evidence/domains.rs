//! Source-domain policy: which hosts may be cited as evidence, and how
//! much weight their content carries during scoring.

use url::Url;

/// Hosts that may appear in evidence. Exact match only; anything else is
/// discarded regardless of content.
pub const ALLOWED_HOSTS: &[&str] = &[
    "scholar.google.com",
    "www.britannica.com",
    "en.wikipedia.org",
    "www.who.int",
    "www.nature.com",
    "www.sciencedirect.com",
];

/// Rejected even when nested (e.g. `foo.example.com`)
const DENIED_HOSTS: &[&str] = &["example.com", "localhost", "127.0.0.1"];

/// Reputation weights applied to snippet relevance during scoring
const DOMAIN_WEIGHTS: &[(&str, f64)] = &[
    ("scholar.google.com", 1.0),
    ("www.who.int", 0.95),
    ("www.nature.com", 0.9),
    ("www.sciencedirect.com", 0.9),
    ("www.britannica.com", 0.85),
    ("en.wikipedia.org", 0.8),
];

/// Weight for an allow-listed host without a curated entry
pub const DEFAULT_WEIGHT: f64 = 0.75;

/// Weight when the URL cannot be parsed at all
pub const UNPARSEABLE_WEIGHT: f64 = 0.7;

/// Whether a URL may be cited as evidence.
pub fn is_allowed(url: &str) -> bool {
    let Some(host) = host_of(url) else {
        return false;
    };

    if DENIED_HOSTS
        .iter()
        .any(|denied| host == *denied || host.ends_with(&format!(".{denied}")))
    {
        return false;
    }

    ALLOWED_HOSTS.iter().any(|allowed| host == *allowed)
}

/// Reputation weight for a snippet's host.
pub fn quality_weight(url: &str) -> f64 {
    match host_of(url) {
        Some(host) => DOMAIN_WEIGHTS
            .iter()
            .find(|(weighted, _)| *weighted == host)
            .map(|(_, weight)| *weight)
            .unwrap_or(DEFAULT_WEIGHT),
        None => UNPARSEABLE_WEIGHT,
    }
}

fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_lowercase)
}
