//! URL canonicalization for stable dedupe keys. Pure string/URL processing;
//! no network use.

use reqwest::Url;

use crate::error::{Result, TrellisError};

/// Query parameters that identify campaigns, not content.
const TRACKING_PARAMS: &[&str] = &[
    "utm_source",
    "utm_medium",
    "utm_campaign",
    "utm_term",
    "utm_content",
    "utm_name",
    "utm_id",
    "gclid",
    "gclsrc",
    "fbclid",
    "mc_cid",
    "mc_eid",
];

fn is_tracking_param(key: &str) -> bool {
    let key_lower = key.to_ascii_lowercase();
    TRACKING_PARAMS.contains(&key_lower.as_str())
}

/// Normalizes a URL for dedupe: lowercased scheme and host, tracking params
/// removed, surviving query pairs sorted by key (case-insensitive, stable),
/// fragment dropped, one trailing slash stripped except for the root path.
pub fn canonicalize_url(raw: &str) -> Result<String> {
    let url =
        Url::parse(raw).map_err(|err| TrellisError::InvalidUrl(format!("'{raw}': {err}")))?;
    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(TrellisError::InvalidUrl(format!(
                "'{raw}': unsupported scheme '{other}'"
            )));
        }
    }

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !is_tracking_param(key))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    pairs.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));

    let mut canonical = url;
    canonical.set_fragment(None);
    canonical.set_query(None);
    if !pairs.is_empty() {
        canonical
            .query_pairs_mut()
            .extend_pairs(pairs.iter().map(|(key, value)| (key, value)));
    }

    let path = canonical.path().to_string();
    if path != "/" && path.ends_with('/') {
        canonical.set_path(path.trim_end_matches('/'));
    }

    Ok(canonical.to_string())
}
