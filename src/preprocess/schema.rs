//! Index field configuration applied before ingestion

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldType {
    StringValue,
    StringListValue,
    LongValue,
    DateValue,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SearchFlags {
    pub facetable: bool,
    pub searchable: bool,
    pub displayable: bool,
    pub sortable: bool,
}

impl SearchFlags {
    const fn new(facetable: bool, searchable: bool, displayable: bool, sortable: bool) -> Self {
        Self {
            facetable,
            searchable,
            displayable,
            sortable,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Relevance {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freshness: Option<bool>,
    pub importance: u8,
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub value_importance_map: BTreeMap<String, u8>,
}

/// One configured index field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldDefinition {
    pub name: String,
    #[serde(rename = "Type")]
    pub field_type: FieldType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevance: Option<Relevance>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchFlags>,
}

impl FieldDefinition {
    fn new(name: &str, field_type: FieldType, search: Option<SearchFlags>) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            relevance: None,
            search,
        }
    }

    fn with_relevance(mut self, relevance: Relevance) -> Self {
        self.relevance = Some(relevance);
        self
    }

    pub fn is_facetable(&self) -> bool {
        self.search.map(|s| s.facetable).unwrap_or(false)
    }
}

/// Fields the product index is configured with
pub fn product_index_fields() -> Vec<FieldDefinition> {
    let list_field = SearchFlags::new(true, true, true, false);

    vec![
        FieldDefinition::new("_last_updated_at", FieldType::DateValue, None).with_relevance(
            Relevance {
                freshness: Some(true),
                importance: 10,
                ..Relevance::default()
            },
        ),
        FieldDefinition::new(
            "gender",
            FieldType::StringValue,
            Some(SearchFlags::new(true, true, true, true)),
        )
        .with_relevance(Relevance {
            freshness: None,
            importance: 10,
            value_importance_map: BTreeMap::from([
                ("male".to_string(), 10),
                ("female".to_string(), 10),
                ("male female".to_string(), 8),
            ]),
        }),
        FieldDefinition::new("product_type", FieldType::StringListValue, Some(list_field)),
        FieldDefinition::new("occasion", FieldType::StringListValue, Some(list_field)),
        FieldDefinition::new(
            "brand",
            FieldType::StringValue,
            Some(SearchFlags::new(true, true, true, true)),
        ),
        FieldDefinition::new(
            "product_id",
            FieldType::StringValue,
            Some(SearchFlags::new(false, false, true, true)),
        ),
        FieldDefinition::new(
            "category",
            FieldType::StringValue,
            Some(SearchFlags::new(true, true, true, false)),
        ),
        FieldDefinition::new("color", FieldType::StringListValue, Some(list_field)),
        FieldDefinition::new(
            "rating",
            FieldType::LongValue,
            Some(SearchFlags::new(true, false, true, true)),
        ),
        FieldDefinition::new(
            "final_price",
            FieldType::LongValue,
            Some(SearchFlags::new(true, false, true, true)),
        ),
        FieldDefinition::new(
            "discount",
            FieldType::LongValue,
            Some(SearchFlags::new(true, false, true, true)),
        ),
    ]
}
