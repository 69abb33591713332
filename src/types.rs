//! Response envelope types for search operations.
//!
//! Envelopes decode only their outer structure; hits, aggregations, and
//! backend errors stay as raw JSON fragments that callers bind to their own
//! shapes on demand via [`bind`].

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::value::RawValue;

use crate::errors::ClientError;

/// One page of a search or scroll response.
///
/// A populated `error` field means the backend reported a failure even though
/// the transport round trip succeeded; the connector surfaces that as
/// [`ClientError::BackendError`] instead of handing the envelope back.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResult {
    /// Backend-reported status field, 0 when the envelope carries none.
    #[serde(default)]
    pub status: u16,
    /// Hits envelope, absent on error responses.
    pub hits: Option<SearchHits>,
    /// Deferred aggregations payload, keyed by aggregation name.
    pub aggregations: Option<Box<RawValue>>,
    /// Deferred backend error payload.
    pub error: Option<Box<RawValue>>,
    /// Deferred scroll cursor, present on scroll responses.
    #[serde(rename = "_scroll_id")]
    pub scroll_id: Option<Box<RawValue>>,
}

impl SearchResult {
    /// The scroll cursor with its surrounding JSON quotes stripped, ready to
    /// forward on the next scroll request.
    ///
    /// The cursor is otherwise opaque and is forwarded byte for byte.
    pub fn scroll_cursor(&self) -> Option<&str> {
        self.scroll_id.as_deref().map(|raw| {
            let text = raw.get();
            text.strip_prefix('"')
                .and_then(|t| t.strip_suffix('"'))
                .unwrap_or(text)
        })
    }
}

/// The hits envelope of a search page.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHits {
    /// Total number of matching documents reported by the backend.
    #[serde(default)]
    pub total: i64,
    /// Deferred hit list; bind it to a caller-defined hit shape.
    pub hits: Option<Box<RawValue>>,
}

/// One bucket of a terms-style aggregation.
///
/// Every field is defaulted so partial bucket objects decode; sub-buckets
/// nest recursively through `buckets`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AggregationBucket {
    /// Bucket key.
    #[serde(default)]
    pub key: String,
    /// Number of documents in the bucket.
    #[serde(default)]
    pub doc_count: i64,
    /// Documents not covered by the returned buckets.
    #[serde(default)]
    pub sum_other_doc_count: i64,
    /// Nested sub-buckets, in backend order.
    #[serde(default)]
    pub buckets: Vec<AggregationBucket>,
}

/// Decode a deferred JSON fragment into a caller-provided shape.
///
/// This is the late-binding half of the envelope design: the connector never
/// learns what a hit or an aggregation looks like, callers decode the raw
/// fragments into whatever they need.
///
/// # Arguments
///
/// * `raw` - A fragment taken from a [`SearchResult`] or [`SearchHits`]
///
/// # Returns
///
/// * `Ok(T)` - The decoded value
/// * `Err(ClientError::DecodeError)` - If the fragment does not match `T`;
///   the error carries the fragment text
pub fn bind<T: DeserializeOwned>(raw: &RawValue) -> Result<T, ClientError> {
    serde_json::from_str(raw.get()).map_err(|e| ClientError::decode(e.to_string(), raw.get()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize)]
    struct ArticleHit {
        #[serde(rename = "_id")]
        id: String,
        #[serde(rename = "_source")]
        source: Article,
    }

    #[derive(Debug, Deserialize)]
    struct Article {
        title: String,
        views: i64,
    }

    fn sample_page() -> &'static str {
        r#"{
            "took": 3,
            "_scroll_id": "c2Nyb2xsLWN1cnNvcg==",
            "hits": {
                "total": 2,
                "hits": [
                    {"_id": "a", "_source": {"title": "first", "views": 10}},
                    {"_id": "b", "_source": {"title": "second", "views": 4}}
                ]
            },
            "aggregations": {
                "genres": {
                    "sum_other_doc_count": 12,
                    "buckets": [
                        {"key": "rock", "doc_count": 8, "buckets": [{"key": "live", "doc_count": 3}]},
                        {"key": "jazz", "doc_count": 6}
                    ]
                }
            }
        }"#
    }

    #[test]
    fn test_decode_search_page() {
        let result: SearchResult = serde_json::from_str(sample_page()).unwrap();

        assert_eq!(result.status, 0);
        assert!(result.error.is_none());
        assert_eq!(result.hits.as_ref().unwrap().total, 2);
        assert!(result.hits.as_ref().unwrap().hits.is_some());
        assert!(result.aggregations.is_some());
    }

    #[test]
    fn test_scroll_cursor_strips_quotes() {
        let result: SearchResult = serde_json::from_str(sample_page()).unwrap();
        assert_eq!(result.scroll_cursor(), Some("c2Nyb2xsLWN1cnNvcg=="));
    }

    #[test]
    fn test_scroll_cursor_absent() {
        let result: SearchResult =
            serde_json::from_str(r#"{"hits": {"total": 0, "hits": []}}"#).unwrap();
        assert_eq!(result.scroll_cursor(), None);
    }

    #[test]
    fn test_bind_hits_to_caller_shape() {
        let result: SearchResult = serde_json::from_str(sample_page()).unwrap();
        let raw = result.hits.unwrap().hits.unwrap();

        let hits: Vec<ArticleHit> = bind(&raw).unwrap();

        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].id, "a");
        assert_eq!(hits[0].source.title, "first");
        assert_eq!(hits[1].source.views, 4);
    }

    #[test]
    fn test_bind_aggregations() {
        let result: SearchResult = serde_json::from_str(sample_page()).unwrap();
        let raw = result.aggregations.unwrap();

        let aggregations: HashMap<String, AggregationBucket> = bind(&raw).unwrap();

        let genres = &aggregations["genres"];
        assert_eq!(genres.sum_other_doc_count, 12);
        assert_eq!(genres.buckets.len(), 2);
        assert_eq!(genres.buckets[0].key, "rock");
        assert_eq!(genres.buckets[0].doc_count, 8);
        assert_eq!(genres.buckets[0].buckets[0].key, "live");
        assert_eq!(genres.buckets[1].key, "jazz");
        assert_eq!(genres.buckets[1].buckets.len(), 0);
    }

    #[test]
    fn test_bind_type_mismatch_keeps_fragment() {
        let result: SearchResult = serde_json::from_str(sample_page()).unwrap();
        let raw = result.aggregations.unwrap();

        let bound: Result<Vec<i64>, ClientError> = bind(&raw);

        match bound {
            Err(ClientError::DecodeError { body, .. }) => assert!(body.contains("genres")),
            other => panic!("expected decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = r#"{"error": {"type": "index_not_found_exception"}, "status": 404}"#;
        let result: SearchResult = serde_json::from_str(body).unwrap();

        assert_eq!(result.status, 404);
        assert!(result.hits.is_none());
        let error = result.error.unwrap();
        assert!(error.get().contains("index_not_found_exception"));
    }

    #[test]
    fn test_decode_missing_total_defaults_to_zero() {
        let result: SearchResult = serde_json::from_str(r#"{"hits": {"hits": []}}"#).unwrap();
        assert_eq!(result.hits.unwrap().total, 0);
    }
}
