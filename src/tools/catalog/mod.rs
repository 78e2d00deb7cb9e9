//! Catalogue tools: ranked search and product lookup

mod get_product;
mod search_products;

pub use get_product::GetProductTool;
pub use search_products::SearchProductsTool;
