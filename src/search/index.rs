//! In-memory semantic index
//!
//! A local stand-in for the managed retrieval service: an inverted token
//! index over document titles and bodies, with thesaurus-expanded query
//! terms, attribute filters and facet counts.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::SearchResult;
use crate::preprocess::FieldDefinition;
use crate::types::{
    AttributeFilter, AttributeValue, BatchPutReport, FacetCount, FacetResult, FailedDocument,
    IndexDocument, QueryRequest, QueryResponse, QueryResultItem, ScoreConfidence,
};

use super::thesaurus::Thesaurus;

/// Retrieval backend the pipeline queries.
///
/// Writes take `&mut self`; callers share an index behind a lock.
pub trait SemanticIndex: Send + Sync {
    /// Configure document fields before ingestion
    fn update_schema(&mut self, fields: Vec<FieldDefinition>) -> SearchResult<()>;

    /// Add or replace a batch of documents
    fn put_documents(&mut self, batch: Vec<IndexDocument>) -> SearchResult<BatchPutReport>;

    /// Run a query
    fn query(&self, request: &QueryRequest) -> SearchResult<QueryResponse>;

    /// Number of indexed documents
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Inverted index over document text
#[derive(Debug, Default)]
pub struct InMemoryIndex {
    /// token (lowercased) → Set<document_id>
    inverted_index: HashMap<String, HashSet<String>>,

    /// document_id → document
    documents: HashMap<String, IndexDocument>,

    /// Configured fields
    fields: Vec<FieldDefinition>,

    /// Query-time synonym expansion
    thesaurus: Thesaurus,

    query_counter: AtomicU64,
}

impl InMemoryIndex {
    /// Create an empty index expanding queries with the built-in thesaurus
    pub fn new() -> Self {
        Self::with_thesaurus(Thesaurus::builtin())
    }

    /// Create an empty index with a custom thesaurus
    pub fn with_thesaurus(thesaurus: Thesaurus) -> Self {
        Self {
            thesaurus,
            ..Self::default()
        }
    }

    /// Get a document by id
    pub fn get_document(&self, id: &str) -> Option<&IndexDocument> {
        self.documents.get(id)
    }

    /// Remove a document from the index
    pub fn remove_document(&mut self, id: &str) {
        if let Some(doc) = self.documents.remove(id) {
            for token in document_tokens(&doc) {
                if let Some(set) = self.inverted_index.get_mut(&token) {
                    set.remove(id);
                    if set.is_empty() {
                        self.inverted_index.remove(&token);
                    }
                }
            }
        }
    }

    fn index_document(&mut self, doc: IndexDocument) {
        self.remove_document(&doc.id);

        for token in document_tokens(&doc) {
            self.inverted_index
                .entry(token)
                .or_default()
                .insert(doc.id.clone());
        }
        self.documents.insert(doc.id.clone(), doc);
    }

    fn is_facetable(&self, key: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.name == key && f.is_facetable())
    }

    /// Documents containing any expansion of `term`
    fn lookup_term(&self, term: &str) -> HashSet<&str> {
        let mut matches = HashSet::new();
        for expansion in self.thesaurus.expand_term(term) {
            for token in tokenize(&expansion) {
                if let Some(ids) = self.inverted_index.get(&token) {
                    matches.extend(ids.iter().map(String::as_str));
                }
            }
        }
        matches
    }
}

impl SemanticIndex for InMemoryIndex {
    fn update_schema(&mut self, fields: Vec<FieldDefinition>) -> SearchResult<()> {
        tracing::info!("Index schema updated with {} fields", fields.len());
        self.fields = fields;
        Ok(())
    }

    fn put_documents(&mut self, batch: Vec<IndexDocument>) -> SearchResult<BatchPutReport> {
        let mut report = BatchPutReport::default();

        for doc in batch {
            if doc.id.trim().is_empty() {
                report.failed.push(FailedDocument {
                    id: doc.id,
                    reason: "document id is empty".to_string(),
                });
                continue;
            }
            if doc.title.trim().is_empty() && doc.body.trim().is_empty() {
                report.failed.push(FailedDocument {
                    id: doc.id,
                    reason: "document has no text".to_string(),
                });
                continue;
            }
            self.index_document(doc);
            report.accepted += 1;
        }

        Ok(report)
    }

    fn query(&self, request: &QueryRequest) -> SearchResult<QueryResponse> {
        let query_id = format!("q-{}", self.query_counter.fetch_add(1, Ordering::SeqCst) + 1);

        let mut terms = tokenize(&request.query_text);
        let mut seen = HashSet::new();
        terms.retain(|t| seen.insert(t.clone()));

        if terms.is_empty() {
            return Ok(QueryResponse {
                query_id,
                ..QueryResponse::default()
            });
        }

        let mut hits: HashMap<&str, usize> = HashMap::new();
        for term in &terms {
            for id in self.lookup_term(term) {
                *hits.entry(id).or_insert(0) += 1;
            }
        }

        let mut scored: Vec<(&IndexDocument, f64)> = hits
            .into_iter()
            .filter_map(|(id, matched)| self.documents.get(id).map(|d| (d, matched)))
            .filter(|(doc, _)| {
                request
                    .attribute_filter
                    .as_ref()
                    .map(|f| matches_filter(doc, f))
                    .unwrap_or(true)
            })
            .map(|(doc, matched)| (doc, matched as f64 / terms.len() as f64))
            .collect();

        scored.sort_by(|(a, sa), (b, sb)| sb.total_cmp(sa).then_with(|| a.id.cmp(&b.id)));

        let facets = request
            .facets
            .iter()
            .filter(|f| self.is_facetable(&f.key))
            .map(|f| facet_counts(&f.key, f.max_results, scored.iter().map(|(d, _)| *d)))
            .collect();

        let total = scored.len();
        let skip = request.page_number.saturating_sub(1) * request.page_size;
        let items = scored
            .into_iter()
            .skip(skip)
            .take(request.page_size)
            .enumerate()
            .map(|(rank, (doc, score))| QueryResultItem {
                id: format!("{}-{}", query_id, skip + rank + 1),
                document_id: Some(doc.id.clone()),
                title: doc.title.clone(),
                score,
                confidence: ScoreConfidence::from_score(score),
            })
            .collect();

        Ok(QueryResponse {
            query_id,
            items,
            facets,
            total,
        })
    }

    fn len(&self) -> usize {
        self.documents.len()
    }
}

/// Evaluate a filter tree against a document's attributes
pub fn matches_filter(doc: &IndexDocument, filter: &AttributeFilter) -> bool {
    match filter {
        AttributeFilter::EqualsTo(attr) => match (doc.attribute(&attr.key), &attr.value) {
            (Some(AttributeValue::StringListValue(values)), AttributeValue::StringValue(want)) => {
                values.iter().any(|v| v == want)
            }
            (Some(value), want) => value == want,
            (None, _) => false,
        },
        AttributeFilter::ContainsAny(attr) => match doc.attribute(&attr.key) {
            Some(value) => {
                let have = value.as_strings();
                attr.value.as_strings().iter().any(|w| have.contains(w))
            }
            None => false,
        },
        AttributeFilter::OrAllFilters(filters) => filters.iter().any(|f| matches_filter(doc, f)),
        AttributeFilter::AndAllFilters(filters) => filters.iter().all(|f| matches_filter(doc, f)),
    }
}

fn facet_counts<'a>(
    key: &str,
    max_results: usize,
    docs: impl Iterator<Item = &'a IndexDocument>,
) -> FacetResult {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for doc in docs {
        if let Some(value) = doc.attribute(key) {
            for v in value.as_strings() {
                *counts.entry(v).or_insert(0) += 1;
            }
        }
    }

    let mut counts: Vec<FacetCount> = counts
        .into_iter()
        .map(|(value, count)| FacetCount { value, count })
        .collect();
    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    counts.truncate(max_results);

    FacetResult {
        key: key.to_string(),
        counts,
    }
}

fn document_tokens(doc: &IndexDocument) -> HashSet<String> {
    tokenize(&doc.title)
        .into_iter()
        .chain(tokenize(&doc.body))
        .collect()
}

/// Tokenize text into searchable tokens
/// Splits on whitespace and punctuation, lowercases
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation())
        .filter(|s| !s.is_empty() && s.len() >= 2) // Skip very short tokens
        .map(|s| s.to_string())
        .collect()
}
