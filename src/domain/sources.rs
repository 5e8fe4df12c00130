//! Citation deduplication for the source list.

use super::entities::{GroundingChunk, WebSource};
use std::collections::HashSet;

/// Distinct web sources keyed by URI, in order of first appearance.
/// Chunks without a web entry or with an empty URI are dropped.
pub fn unique_sources(chunks: &[GroundingChunk]) -> Vec<WebSource> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(chunks.len());
    let mut out = Vec::new();
    for web in chunks.iter().filter_map(|c| c.web.as_ref()) {
        if web.uri.is_empty() {
            continue;
        }
        if seen.insert(web.uri.as_str()) {
            out.push(web.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(uri: &str, title: &str) -> GroundingChunk {
        GroundingChunk {
            web: Some(WebSource {
                uri: uri.to_string(),
                title: title.to_string(),
            }),
        }
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let chunks = vec![
            chunk("https://b.example", "B"),
            chunk("https://a.example", "A"),
            chunk("https://b.example", "B again"),
            chunk("https://c.example", "C"),
            chunk("https://a.example", "A again"),
        ];
        let out = unique_sources(&chunks);
        let uris: Vec<&str> = out.iter().map(|s| s.uri.as_str()).collect();
        assert_eq!(
            uris,
            vec!["https://b.example", "https://a.example", "https://c.example"]
        );
        assert_eq!(out[0].title, "B");
    }

    #[test]
    fn test_dedup_drops_missing_uri() {
        let chunks = vec![
            GroundingChunk::default(),
            chunk("", "no uri"),
            chunk("https://a.example", "A"),
        ];
        assert_eq!(unique_sources(&chunks).len(), 1);
        assert!(unique_sources(&[]).is_empty());
    }
}
