//! Result aggregation: backend hits → answer context + attribution

use std::collections::HashSet;

use crate::types::{DocumentType, SearchHit, Source};

/// Outcome of aggregating backend hits.
///
/// An empty hit list is a defined outcome, not a failure: callers surface
/// it as "nothing found" rather than a query error.
#[derive(Debug, Clone)]
pub enum Aggregation {
    /// Context text and attribution sources built from the hits
    Context(AggregatedResults),
    /// The query matched nothing
    NoResults,
}

/// Context and sources assembled from a hit list
#[derive(Debug, Clone)]
pub struct AggregatedResults {
    /// Hit contents joined by blank lines, in backend order; handed to the
    /// synthesizer verbatim
    pub context: String,
    /// One attribution entry per distinct originating document
    pub sources: Vec<Source>,
}

/// Assemble context and sources from backend hits.
///
/// Context keeps every hit in backend order, including multiple chunks of
/// the same document. Sources are de-duplicated per originating document,
/// keeping the first (highest-ranked) chunk's snippet.
pub fn aggregate(hits: &[SearchHit]) -> Aggregation {
    if hits.is_empty() {
        return Aggregation::NoResults;
    }

    let context = hits
        .iter()
        .map(|hit| hit.fields.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for hit in hits {
        let parent_id = parent_document_id(hit);
        if !seen.insert(parent_id.clone()) {
            continue;
        }

        let doc_type = document_type_of(hit);
        sources.push(Source {
            url: doc_type.viewer_url(&parent_id),
            id: parent_id,
            title: hit.fields.title.clone(),
            doc_type,
            snippet: hit.fields.content.lines().next().unwrap_or("").to_string(),
        });
    }

    Aggregation::Context(AggregatedResults { context, sources })
}

/// Recover the originating document id for a hit.
///
/// Records carry `parent_id` explicitly. Records written before that field
/// existed only have the composite `<parent>_<index>` key, for which the
/// trailing `_<digits>` segment is stripped; a parent id that itself ends
/// in `_<digits>` is ambiguous in that legacy form, which is why the
/// explicit field wins whenever present.
fn parent_document_id(hit: &SearchHit) -> String {
    if let Some(parent_id) = &hit.fields.parent_id {
        return parent_id.clone();
    }

    let composite = hit.fields.document_id.as_str();
    match composite.rsplit_once('_') {
        Some((parent, suffix))
            if !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()) =>
        {
            parent.to_string()
        }
        _ => composite.to_string(),
    }
}

/// Resolve the hit's content variant, falling back to the serialized
/// metadata for records missing the dedicated field
fn document_type_of(hit: &SearchHit) -> DocumentType {
    if let Some(doc_type) = hit.fields.document_type {
        return doc_type;
    }

    hit.fields
        .metadata
        .as_deref()
        .and_then(|raw| serde_json::from_str::<serde_json::Value>(raw).ok())
        .and_then(|meta| {
            meta.get("type")
                .and_then(|t| t.as_str())
                .and_then(DocumentType::from_str_opt)
        })
        .unwrap_or(DocumentType::Doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HitFields;

    fn hit(document_id: &str, doc_type: Option<DocumentType>, content: &str) -> SearchHit {
        SearchHit {
            id: format!("index:content/0/{}", document_id),
            relevance: Some(0.5),
            fields: HitFields {
                document_id: document_id.to_string(),
                title: "Quarterly plan".to_string(),
                document_type: doc_type,
                content: content.to_string(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_empty_hits_is_no_results() {
        assert!(matches!(aggregate(&[]), Aggregation::NoResults));
    }

    #[test]
    fn test_context_joins_hits_in_order() {
        let hits = vec![
            hit("a_0", Some(DocumentType::Doc), "first"),
            hit("b_0", Some(DocumentType::Doc), "second"),
        ];
        let results = match aggregate(&hits) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };
        assert_eq!(results.context, "first\n\nsecond");
    }

    #[test]
    fn test_sheet_attribution_from_composite_id() {
        let hits = vec![hit("abc123_2", Some(DocumentType::Sheet), "row data")];
        let results = match aggregate(&hits) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };

        let source = &results.sources[0];
        assert_eq!(source.id, "abc123");
        assert_eq!(source.url, "https://docs.google.com/spreadsheets/d/abc123");
    }

    #[test]
    fn test_explicit_parent_id_wins_over_composite_parsing() {
        let mut tricky = hit("report_2024_3", Some(DocumentType::Doc), "body");
        tricky.fields.parent_id = Some("report_2024".to_string());
        let results = match aggregate(&[tricky]) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };
        assert_eq!(results.sources[0].id, "report_2024");
    }

    #[test]
    fn test_composite_id_without_numeric_suffix_kept_whole() {
        let hits = vec![hit("plain_name", Some(DocumentType::Doc), "body")];
        let results = match aggregate(&hits) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };
        assert_eq!(results.sources[0].id, "plain_name");
    }

    #[test]
    fn test_snippet_is_first_line() {
        let hits = vec![hit(
            "abc_0",
            Some(DocumentType::Doc),
            "headline\nsecond line\nthird",
        )];
        let results = match aggregate(&hits) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };
        assert_eq!(results.sources[0].snippet, "headline");
    }

    #[test]
    fn test_sources_deduplicate_by_parent_document() {
        let hits = vec![
            hit("abc123_0", Some(DocumentType::Doc), "chunk zero"),
            hit("abc123_1", Some(DocumentType::Doc), "chunk one"),
            hit("xyz789_0", Some(DocumentType::Calendar), "event list"),
        ];
        let results = match aggregate(&hits) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };

        // Context keeps all three chunks, attribution collapses to two docs
        assert_eq!(results.context.matches("chunk").count(), 2);
        assert_eq!(results.sources.len(), 2);
        assert_eq!(results.sources[0].snippet, "chunk zero");
        assert_eq!(
            results.sources[1].url,
            "https://calendar.google.com/calendar"
        );
    }

    #[test]
    fn test_document_type_recovered_from_metadata() {
        let mut legacy = hit("abc123_2", None, "row data");
        legacy.fields.metadata =
            Some(r#"{"title":"Quarterly plan","type":"sheet"}"#.to_string());
        let results = match aggregate(&[legacy]) {
            Aggregation::Context(results) => results,
            Aggregation::NoResults => panic!("expected results"),
        };
        assert_eq!(results.sources[0].doc_type, DocumentType::Sheet);
        assert_eq!(
            results.sources[0].url,
            "https://docs.google.com/spreadsheets/d/abc123"
        );
    }
}
