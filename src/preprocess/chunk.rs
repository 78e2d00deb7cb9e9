//! Metadata chunking
//!
//! A product with several colors, types and occasions is split into chunks
//! that each combine a window of colors with a window of type/occasion
//! pairs, so every chunk reads like a short product title.

/// Cross two lists using a sliding window of `min(len1, len2)` items.
///
/// Every window of `list1` is paired with every window of `list2`; each
/// pair is rendered as `"<window1 joined> <window2 joined>"`.
/// An empty input yields no chunks.
pub fn doc_chunks(list1: &[String], list2: &[String]) -> Vec<String> {
    let window = list1.len().min(list2.len());
    if window == 0 {
        return Vec::new();
    }

    let starts1 = (list1.len() - window + 1).max(1);
    let starts2 = (list2.len() - window + 1).max(1);

    let mut chunks = Vec::with_capacity(starts1 * starts2);
    for i in 0..starts1 {
        let left = &list1[i..(i + window).min(list1.len())];
        for j in 0..starts2 {
            let right = &list2[j..(j + window).min(list2.len())];
            chunks.push(format!("{} {}", left.join(" "), right.join(" ")));
        }
    }
    chunks
}

/// Chunks for one product: colors crossed with (type crossed with occasion)
pub fn chunks_for_product(
    colors: &[String],
    product_types: &[String],
    occasions: &[String],
) -> Vec<String> {
    let type_occasion = doc_chunks(product_types, occasions);
    doc_chunks(colors, &type_occasion)
}
