//! Text normalization applied to product fields before indexing

use std::collections::BTreeSet;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

use crate::error::{SearchError, SearchResult};
use crate::search::{is_stop_word, Thesaurus};

const MALE_TERMS: &[&str] = &["male", "men", "boys", "mens", "boy"];
const FEMALE_TERMS: &[&str] = &["female", "women", "ladies", "girls", "womens", "ladie", "girl"];

/// Gender value for products that fit both or were never labelled
pub const UNISEX: &str = "male female";

/// Synonym expander with pre-compiled whole-word patterns
#[derive(Debug, Clone)]
pub struct TextPreprocessor {
    /// (pattern, replacement) in thesaurus order
    rules: Vec<(Regex, String)>,
}

impl TextPreprocessor {
    /// Build an expander from a thesaurus
    pub fn new(thesaurus: &Thesaurus) -> SearchResult<Self> {
        let mut rules = Vec::new();
        for rule in thesaurus.rules() {
            let term = rule.canonical();
            for synonym in rule.synonyms() {
                let pattern = Regex::new(&format!(r"(?i)\b{}\b", regex::escape(synonym)))
                    .map_err(|e| SearchError::index(format!("bad synonym '{synonym}': {e}")))?;
                rules.push((pattern, format!("{synonym}, {term}")));
            }
        }
        Ok(Self { rules })
    }

    /// Expander over the built-in dictionary
    pub fn builtin() -> &'static TextPreprocessor {
        static BUILTIN: OnceLock<TextPreprocessor> = OnceLock::new();
        BUILTIN.get_or_init(|| {
            TextPreprocessor::new(&Thesaurus::builtin()).expect("built-in synonyms are escaped")
        })
    }

    /// Lowercase, expand synonyms keeping the original word, strip
    /// punctuation other than commas and hyphens, and drop stop words.
    ///
    /// Returns a single space when nothing survives.
    pub fn preprocess(&self, text: &str) -> String {
        let mut text = text.to_lowercase();

        for (pattern, replacement) in &self.rules {
            if pattern.is_match(&text) {
                text = pattern
                    .replace_all(&text, NoExpand(replacement))
                    .into_owned();
            }
        }

        let cleaned: String = text
            .chars()
            .filter(|c| {
                c.is_ascii_lowercase()
                    || c.is_ascii_digit()
                    || c.is_whitespace()
                    || *c == ','
                    || *c == '-'
            })
            .collect();

        let kept: Vec<&str> = cleaned
            .split_whitespace()
            .filter(|w| !is_stop_word(w))
            .collect();

        if kept.is_empty() {
            " ".to_string()
        } else {
            kept.join(" ")
        }
    }
}

/// Preprocess text with the built-in dictionary
pub fn preprocess_text(text: &str) -> String {
    TextPreprocessor::builtin().preprocess(text)
}

/// Split a comma-separated string into trimmed, non-empty values
pub fn get_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Merge comma-separated phrases that share a last word.
///
/// `"formal wear, party wear, red"` becomes `"formal, party wear, red"`.
/// Groups keep first-seen order; modifiers inside a group are sorted.
pub fn remove_redundant_words(text: &str) -> String {
    let mut groups: Vec<(String, BTreeSet<String>)> = Vec::new();

    for phrase in text.split(',') {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        let Some((last, modifiers)) = words.split_last() else {
            continue;
        };

        let modifier = modifiers.join(" ");
        let idx = match groups.iter().position(|(ending, _)| ending == last) {
            Some(idx) => idx,
            None => {
                groups.push((last.to_string(), BTreeSet::new()));
                groups.len() - 1
            }
        };
        if !modifier.is_empty() {
            groups[idx].1.insert(modifier);
        }
    }

    groups
        .into_iter()
        .map(|(ending, modifiers)| {
            if modifiers.is_empty() {
                ending
            } else {
                let combined: Vec<String> = modifiers.into_iter().collect();
                format!("{} {}", combined.join(", "), ending)
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn gender_patterns() -> &'static (Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let build = |terms: &[&str]| {
            Regex::new(&format!(r"\b(?:{})\b", terms.join("|"))).expect("literal gender terms")
        };
        (build(MALE_TERMS), build(FEMALE_TERMS))
    })
}

/// Classify free text into `male`, `female`, `male female` or `unknown`
pub fn classify_gender(text: &str) -> &'static str {
    let text = text.to_lowercase();
    let (male, female) = gender_patterns();

    match (male.is_match(&text), female.is_match(&text)) {
        (true, true) => UNISEX,
        (true, false) => "male",
        (false, true) => "female",
        (false, false) => "unknown",
    }
}

/// Parse a price/percentage string such as `"$12.40"` or `"15 %"`,
/// rounding up to the next integer.
pub fn parse_rounded_number(input: &str) -> SearchResult<i64> {
    let cleaned: String = input
        .chars()
        .filter(|c| !matches!(c, '$' | '%' | ' '))
        .collect();

    let value: f64 = cleaned
        .parse()
        .map_err(|_| SearchError::InvalidNumber(input.to_string()))?;
    if !value.is_finite() {
        return Err(SearchError::InvalidNumber(input.to_string()));
    }

    Ok(value.ceil() as i64)
}
