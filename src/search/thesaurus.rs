//! Thesaurus in the Solr synonym text format
//!
//! ```text
//! # comment
//! red, crimson, scarlet        (equivalent terms, first is canonical)
//! gown, frock => dress         (explicit mapping onto the right-hand side)
//! ```

use std::fs;
use std::path::Path;

use crate::error::{SearchError, SearchResult};

use super::synonyms::SYNONYM_GROUPS;

/// A single thesaurus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynonymRule {
    Equivalent(Vec<String>),
    Explicit {
        inputs: Vec<String>,
        outputs: Vec<String>,
    },
}

impl SynonymRule {
    /// The term every synonym of this rule maps onto
    pub fn canonical(&self) -> &str {
        let first = match self {
            SynonymRule::Equivalent(terms) => terms.first(),
            SynonymRule::Explicit { outputs, .. } => outputs.first(),
        };
        first.map_or("", String::as_str)
    }

    /// Terms that expand to the canonical term.
    ///
    /// Only the left-hand side of an explicit mapping is rewritten.
    pub fn synonyms(&self) -> Vec<&str> {
        let canonical = self.canonical();
        let words: Vec<&String> = match self {
            SynonymRule::Equivalent(terms) => terms.iter().skip(1).collect(),
            SynonymRule::Explicit { inputs, .. } => inputs.iter().collect(),
        };
        words
            .into_iter()
            .map(String::as_str)
            .filter(|w| *w != canonical)
            .collect()
    }

    /// Whether the term appears anywhere in the rule
    pub fn contains(&self, term: &str) -> bool {
        match self {
            SynonymRule::Equivalent(terms) => terms.iter().any(|t| t == term),
            SynonymRule::Explicit { inputs, outputs } => {
                inputs.iter().chain(outputs.iter()).any(|t| t == term)
            }
        }
    }

    fn validate(&self) -> Result<(), &'static str> {
        fn has_blank(terms: &[String]) -> bool {
            terms.iter().any(|t| t.trim().is_empty())
        }

        match self {
            SynonymRule::Equivalent(terms) if terms.len() < 2 => {
                Err("an equivalence set needs at least two terms")
            }
            SynonymRule::Equivalent(terms) if has_blank(terms) => Err("blank term"),
            SynonymRule::Explicit { inputs, outputs } if inputs.is_empty() || outputs.is_empty() => {
                Err("both sides of '=>' need at least one term")
            }
            SynonymRule::Explicit { inputs, outputs } if has_blank(inputs) || has_blank(outputs) => {
                Err("blank term")
            }
            _ => Ok(()),
        }
    }

    fn render(&self) -> String {
        match self {
            SynonymRule::Equivalent(terms) => terms.join(", "),
            SynonymRule::Explicit { inputs, outputs } => {
                format!("{} => {}", inputs.join(", "), outputs.join(", "))
            }
        }
    }
}

/// Ordered set of synonym rules
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Thesaurus {
    rules: Vec<SynonymRule>,
}

impl Thesaurus {
    /// Build a thesaurus from rules; rule numbers in errors are 1-based
    pub fn new(rules: Vec<SynonymRule>) -> SearchResult<Self> {
        for (idx, rule) in rules.iter().enumerate() {
            rule.validate().map_err(|reason| SearchError::ThesaurusParse {
                line: idx + 1,
                reason: reason.to_string(),
            })?;
        }
        Ok(Self { rules })
    }

    /// The built-in dictionary, one equivalence line per group
    pub fn builtin() -> Self {
        let rules = SYNONYM_GROUPS
            .iter()
            .map(|(term, group)| {
                let mut terms = vec![term.to_string()];
                terms.extend(group.iter().map(|s| s.to_string()));
                SynonymRule::Equivalent(terms)
            })
            .collect();
        Self { rules }
    }

    /// Load a thesaurus file
    pub fn load(path: impl AsRef<Path>) -> SearchResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse thesaurus text
    pub fn parse(content: &str) -> SearchResult<Self> {
        let mut rules = Vec::new();

        for (idx, raw) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((lhs, rhs)) = line.split_once("=>") {
                let inputs = split_terms(lhs);
                let outputs = split_terms(rhs);
                if inputs.is_empty() || outputs.is_empty() {
                    return Err(SearchError::ThesaurusParse {
                        line: line_no,
                        reason: "both sides of '=>' need at least one term".to_string(),
                    });
                }
                if outputs.iter().any(|o| o.contains("=>")) {
                    return Err(SearchError::ThesaurusParse {
                        line: line_no,
                        reason: "more than one '=>' in rule".to_string(),
                    });
                }
                rules.push(SynonymRule::Explicit { inputs, outputs });
            } else {
                let terms = split_terms(line);
                // A lone term declares nothing
                if terms.len() > 1 {
                    rules.push(SynonymRule::Equivalent(terms));
                }
            }
        }

        Ok(Self { rules })
    }

    /// Render as thesaurus text, newline-terminated
    pub fn render(&self) -> String {
        let mut out = String::new();
        for rule in &self.rules {
            out.push_str(&rule.render());
            out.push('\n');
        }
        out
    }

    pub fn rules(&self) -> &[SynonymRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All terms related to `term`, starting with the term itself
    pub fn expand_term(&self, term: &str) -> Vec<String> {
        let term = term.trim().to_lowercase();
        let mut expanded = vec![term.clone()];

        for rule in self.rules.iter().filter(|r| r.contains(&term)) {
            let related = std::iter::once(rule.canonical()).chain(rule.synonyms());
            for word in related {
                if !expanded.iter().any(|e| e == word) {
                    expanded.push(word.to_string());
                }
            }
        }

        expanded
    }
}

fn split_terms(text: &str) -> Vec<String> {
    text.split(',')
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect()
}
