//! Synonym dictionary for product attribute expansion

/// Synonym groups: canonical term followed by the words that map onto it.
///
/// Groups are applied in order during preprocessing. A synonym must not be
/// the canonical term of a later group, otherwise it would be expanded twice.
pub const SYNONYM_GROUPS: &[(&str, &[&str])] = &[
    // Colors
    (
        "red",
        &["crimson", "scarlet", "maroon", "burgundy", "cherry", "ruby", "wine"],
    ),
    ("blue", &["navy", "azure", "cobalt", "sapphire", "indigo"]),
    ("green", &["olive", "emerald", "lime", "mint", "sage"]),
    ("yellow", &["mustard", "lemon", "canary"]),
    ("pink", &["blush", "rose", "fuchsia", "magenta"]),
    ("purple", &["violet", "lavender", "lilac", "plum", "mauve"]),
    ("white", &["ivory", "cream", "pearl"]),
    ("black", &["jet", "onyx", "ebony"]),
    ("grey", &["gray", "ash", "slate", "charcoal"]),
    ("brown", &["tan", "chocolate", "coffee", "camel"]),
    ("orange", &["rust", "coral", "peach", "tangerine"]),
    // Product types
    ("dress", &["gown", "frock"]),
    ("top", &["blouse", "tunic"]),
    ("trousers", &["pants", "slacks"]),
    ("shoes", &["footwear"]),
    // Occasions
    ("party", &["celebration", "festive", "cocktail"]),
    ("wedding", &["bridal", "marriage"]),
    ("casual", &["everyday", "daily wear"]),
    ("formal", &["office", "business"]),
];

/// Words dropped from preprocessed product text
pub const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "of", "for", "with", "in", "on", "to", "is", "are", "this",
    "that", "it", "its", "by", "from", "as", "at", "be", "very", "our", "your",
];

/// Check if a word is a stop word
pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(&word)
}
