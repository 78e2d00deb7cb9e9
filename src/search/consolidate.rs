//! Group index hits back into products

use std::collections::HashMap;

use crate::preprocess::CHUNK_ID_SEPARATOR;
use crate::types::QueryResultItem;

/// A hit reduced to its document id and title
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTitle {
    pub document_id: String,
    pub title: String,
}

/// Hits whose confidence is trusted, reduced to document ids
pub fn accepted_document_ids(items: &[QueryResultItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.confidence.is_accepted())
        .filter_map(|item| item.document_id.clone())
        .collect()
}

/// `(document_id, title)` of every hit carrying a document id
pub fn docs_with_titles(items: &[QueryResultItem]) -> Vec<DocTitle> {
    items
        .iter()
        .filter_map(|item| {
            item.document_id
                .as_ref()
                .filter(|id| !id.is_empty())
                .map(|id| DocTitle {
                    document_id: id.clone(),
                    title: item.title.clone(),
                })
        })
        .collect()
}

/// Split `<product_id>__<seq>`; ids without a separator are sequence 0
pub fn split_document_id(document_id: &str) -> Option<(&str, u32)> {
    match document_id.rsplit_once(CHUNK_ID_SEPARATOR) {
        Some((product_id, seq)) => seq.parse().ok().map(|seq| (product_id, seq)),
        None => Some((document_id, 0)),
    }
}

/// Group chunk titles by product and join them in sequence order.
///
/// Products keep the order of their first hit. Ids with a non-numeric
/// sequence are skipped.
pub fn group_and_combine(docs: &[DocTitle]) -> Vec<(String, String)> {
    let mut order: Vec<String> = Vec::new();
    let mut grouped: HashMap<String, Vec<(u32, &str)>> = HashMap::new();

    for doc in docs {
        let Some((product_id, seq)) = split_document_id(&doc.document_id) else {
            tracing::warn!("Skipping hit with malformed document id '{}'", doc.document_id);
            continue;
        };

        let entry = grouped.entry(product_id.to_string()).or_insert_with(|| {
            order.push(product_id.to_string());
            Vec::new()
        });
        entry.push((seq, doc.title.as_str()));
    }

    order
        .into_iter()
        .filter_map(|product_id| {
            let mut parts = grouped.remove(&product_id)?;
            parts.sort_by_key(|(seq, _)| *seq);
            let combined = parts
                .iter()
                .map(|(_, title)| *title)
                .collect::<Vec<_>>()
                .join(" ");
            Some((product_id, combined))
        })
        .collect()
}
