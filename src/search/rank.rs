//! Weighted re-ranking of fuzzy attribute matches

use std::collections::HashMap;

use crate::types::{FuzzyMatch, RankedProduct};

pub const PRODUCT_TYPE_WEIGHT: f64 = 3.0;
pub const PRODUCT_COLOR_WEIGHT: f64 = 2.0;
pub const PRODUCT_OCCASION_WEIGHT: f64 = 1.0;

/// Weighted mean of the attribute scores, normalized to `0.0..=1.0`.
///
/// Only attributes with a nonzero score count towards the divisor; all
/// zero scores give 0.
pub fn weight_results(prod_type: f64, prod_color: f64, prod_occasion: f64) -> f64 {
    let weighted = PRODUCT_TYPE_WEIGHT * prod_type
        + PRODUCT_COLOR_WEIGHT * prod_color
        + PRODUCT_OCCASION_WEIGHT * prod_occasion;

    let total_weight: f64 = [
        (prod_type, PRODUCT_TYPE_WEIGHT),
        (prod_color, PRODUCT_COLOR_WEIGHT),
        (prod_occasion, PRODUCT_OCCASION_WEIGHT),
    ]
    .iter()
    .filter(|(score, _)| *score != 0.0)
    .map(|(_, weight)| weight)
    .sum();

    if total_weight == 0.0 {
        0.0
    } else {
        weighted / (total_weight * 100.0)
    }
}

/// Per-product attribute matches, before weighting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMatches {
    pub product_id: String,
    pub prod_type: Option<FuzzyMatch>,
    pub prod_color: Option<FuzzyMatch>,
    pub product_occasion: Option<FuzzyMatch>,
}

/// Join three match lists on product id.
///
/// Every product found in any list appears once, in first-seen order
/// across type, color, then occasion matches.
pub fn match_products_partial(
    types: Vec<FuzzyMatch>,
    colors: Vec<FuzzyMatch>,
    occasions: Vec<FuzzyMatch>,
) -> Vec<AttributeMatches> {
    let mut order: Vec<String> = Vec::new();
    let mut by_id: HashMap<String, AttributeMatches> = HashMap::new();

    for m in types {
        let id = m.product_id.clone();
        slot(&mut by_id, &mut order, id).prod_type = Some(m);
    }
    for m in colors {
        let id = m.product_id.clone();
        slot(&mut by_id, &mut order, id).prod_color = Some(m);
    }
    for m in occasions {
        let id = m.product_id.clone();
        slot(&mut by_id, &mut order, id).product_occasion = Some(m);
    }

    order
        .into_iter()
        .filter_map(|id| by_id.remove(&id))
        .collect()
}

fn slot<'a>(
    by_id: &'a mut HashMap<String, AttributeMatches>,
    order: &mut Vec<String>,
    product_id: String,
) -> &'a mut AttributeMatches {
    by_id.entry(product_id).or_insert_with_key(|id| {
        order.push(id.clone());
        AttributeMatches {
            product_id: id.clone(),
            ..AttributeMatches::default()
        }
    })
}

fn score_of(m: &Option<FuzzyMatch>) -> f64 {
    m.as_ref().map(|m| m.score).unwrap_or(0.0)
}

/// Weight every product's matches
pub fn weight_products(matches: Vec<AttributeMatches>) -> Vec<RankedProduct> {
    matches
        .into_iter()
        .map(|m| {
            let total_weight = weight_results(
                score_of(&m.prod_type),
                score_of(&m.prod_color),
                score_of(&m.product_occasion),
            );
            RankedProduct {
                product_id: m.product_id,
                total_weight,
                overall_score: total_weight * 100.0,
                prod_type: m.prod_type,
                prod_color: m.prod_color,
                product_occasion: m.product_occasion,
            }
        })
        .collect()
}

/// Sort by `total_weight` descending; ties by product id
pub fn sort_ranked(results: &mut [RankedProduct]) {
    results.sort_by(|a, b| {
        b.total_weight
            .total_cmp(&a.total_weight)
            .then_with(|| a.product_id.cmp(&b.product_id))
    });
}

/// Join, weight and sort attribute matches.
///
/// When `require_type` is set, products without a type match are dropped.
pub fn rank_products(
    types: Vec<FuzzyMatch>,
    colors: Vec<FuzzyMatch>,
    occasions: Vec<FuzzyMatch>,
    require_type: bool,
) -> Vec<RankedProduct> {
    let mut ranked = weight_products(match_products_partial(types, colors, occasions));
    sort_ranked(&mut ranked);

    if require_type {
        ranked.retain(|r| r.prod_type.is_some());
    }
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(id: &str, score: f64) -> FuzzyMatch {
        FuzzyMatch {
            product_id: id.to_string(),
            product_title: format!("title of {id}"),
            score,
        }
    }

    #[test]
    fn test_weight_results() {
        assert_eq!(weight_results(0.0, 0.0, 0.0), 0.0);
        assert!((weight_results(100.0, 100.0, 100.0) - 1.0).abs() < 1e-9);
        // Only type and color count: (3*80 + 2*50) / (5 * 100)
        assert!((weight_results(80.0, 50.0, 0.0) - 0.68).abs() < 1e-9);
        // Occasion alone normalizes against its own weight
        assert!((weight_results(0.0, 0.0, 40.0) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_match_products_partial_union() {
        let matches = match_products_partial(
            vec![fm("p1", 90.0)],
            vec![fm("p2", 70.0), fm("p1", 60.0)],
            vec![fm("p3", 50.0)],
        );
        let ids: Vec<&str> = matches.iter().map(|m| m.product_id.as_str()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert!(matches[0].prod_type.is_some() && matches[0].prod_color.is_some());
        assert!(matches[1].prod_type.is_none());
        assert!(matches[2].product_occasion.is_some());
        assert_eq!(matches[0].prod_type.as_ref().unwrap().score, 90.0);
        assert_eq!(matches[0].prod_color.as_ref().unwrap().score, 60.0);
        assert_eq!(matches[1].prod_color.as_ref().unwrap().score, 70.0);
    }

    #[test]
    fn test_rank_products_non_increasing() {
        let ranked = rank_products(
            vec![fm("p1", 40.0), fm("p2", 100.0)],
            vec![fm("p1", 100.0), fm("p3", 90.0)],
            vec![fm("p2", 20.0)],
            false,
        );
        assert_eq!(ranked.len(), 3);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].total_weight >= w[1].total_weight));
        assert!((ranked[0].overall_score - ranked[0].total_weight * 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_rank_products_requires_type() {
        let ranked = rank_products(
            vec![fm("p1", 50.0)],
            vec![fm("p2", 100.0)],
            vec![],
            true,
        );
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].product_id, "p1");
    }

    #[test]
    fn test_ties_break_by_product_id() {
        let ranked = rank_products(vec![fm("b", 80.0), fm("a", 80.0)], vec![], vec![], false);
        assert_eq!(ranked[0].product_id, "a");
        assert_eq!(ranked[1].product_id, "b");
    }
}
