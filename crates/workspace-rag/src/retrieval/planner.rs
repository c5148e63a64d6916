//! Query planning: natural-language question → structured backend query

use crate::error::{Error, Result};
use crate::types::{BackendQuery, Field, Predicate, VectorQuery};

/// Fields the keyword disjunction fans out over
const KEYWORD_FIELDS: [Field; 3] = [Field::Title, Field::TextSummary, Field::Content];

/// Plans backend queries from user questions.
///
/// The keyword baseline matches any token in any text field, trading
/// precision for recall; ranking is left to the backend. A query
/// embedding, when supplied, adds a nearest-neighbor clause alongside the
/// keyword disjunction.
#[derive(Debug, Clone)]
pub struct QueryPlanner {
    /// Dimensionality the backend's embedding field is indexed with
    dimensions: usize,
}

impl QueryPlanner {
    /// Create a planner for a backend indexed at `dimensions`
    pub fn new(dimensions: usize) -> Self {
        Self { dimensions }
    }

    /// Plan a keyword-only query
    pub fn plan(&self, query: &str, top_k: usize) -> Result<BackendQuery> {
        self.plan_with_embedding(query, top_k, None)
    }

    /// Plan a query, optionally augmented with a query embedding.
    ///
    /// The embedding's dimensionality must match the indexed field exactly
    /// or the backend would reject the request; mismatches fail here
    /// instead.
    pub fn plan_with_embedding(
        &self,
        query: &str,
        top_k: usize,
        embedding: Option<Vec<f32>>,
    ) -> Result<BackendQuery> {
        if top_k == 0 {
            return Err(Error::invalid_configuration(
                "topK must be a positive integer",
            ));
        }

        let tokens: Vec<&str> = query.split_whitespace().collect();

        let predicate = if tokens.is_empty() {
            None
        } else {
            Some(Predicate::Or(
                tokens.iter().map(|token| token_predicate(token)).collect(),
            ))
        };

        let vector = match embedding {
            Some(values) => {
                if values.len() != self.dimensions {
                    return Err(Error::DimensionMismatch {
                        expected: self.dimensions,
                        actual: values.len(),
                    });
                }
                Some(VectorQuery {
                    vector: values,
                    target_hits: top_k,
                })
            }
            None => None,
        };

        if predicate.is_none() && vector.is_none() {
            return Err(Error::invalid_configuration("query must not be empty"));
        }

        Ok(BackendQuery {
            predicate,
            vector,
            hits: top_k,
        })
    }
}

/// One token's disjunction over all keyword fields
fn token_predicate(token: &str) -> Predicate {
    Predicate::Or(
        KEYWORD_FIELDS
            .iter()
            .map(|field| Predicate::contains(*field, token))
            .collect(),
    )
}
