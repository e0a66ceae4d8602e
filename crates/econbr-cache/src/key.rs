use sha2::{Digest, Sha256};

/// Normalize a query for cache keying: lowercase, whitespace collapsed.
pub fn normalize_query(query: &str) -> String {
    query.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase()
}

/// Cache key for an answered query: `{agent}:{first 8 hex chars of sha256}`.
///
/// The agent prefix keeps answers from different specialists apart even when
/// the normalized text collides.
pub fn answer_cache_key(agent: &str, query: &str) -> String {
    let normalized = normalize_query(query);
    let digest = Sha256::digest(normalized.as_bytes());
    format!("{agent}:{}", &hex::encode(digest)[..8])
}
