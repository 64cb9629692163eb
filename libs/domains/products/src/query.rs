use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ProductError, ProductResult};
use crate::models::Product;

/// Default number of search results.
pub const DEFAULT_SEARCH_LIMIT: u64 = 20;

/// Raw list parameters as received on the query string.
///
/// Kept as text so that bad values can be ignored or reported per field
/// instead of failing the whole extraction.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number; invalid values fall back to 1
    pub page: Option<String>,
    /// Case-insensitive substring of the category
    pub category: Option<String>,
    /// Case-insensitive substring of the brand
    pub brand: Option<String>,
    /// Inclusive lower price bound
    pub price_min: Option<String>,
    /// Inclusive upper price bound
    pub price_max: Option<String>,
    /// `true` to exclude records with zero quantity
    pub only_in_stock: Option<String>,
    /// One of `price_asc`, `price_desc`, `name`, `created_desc`
    pub order: Option<String>,
}

/// Sort order for list queries.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    ToSchema,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ProductOrder {
    PriceAsc,
    PriceDesc,
    Name,
    #[default]
    CreatedDesc,
}

impl ProductOrder {
    /// Unknown or missing values mean newest first.
    pub fn parse_lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| Self::from_str(value.trim()).ok())
            .unwrap_or_default()
    }
}

/// Conjunctive filter plus ordering for list queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub only_in_stock: bool,
    pub order: ProductOrder,
}

impl ProductQuery {
    pub fn from_params(params: &ListParams) -> ProductResult<Self> {
        Ok(Self {
            category: non_empty(params.category.as_deref()),
            brand: non_empty(params.brand.as_deref()),
            price_min: parse_price_bound("price_min", params.price_min.as_deref())?,
            price_max: parse_price_bound("price_max", params.price_max.as_deref())?,
            only_in_stock: params
                .only_in_stock
                .as_deref()
                .is_some_and(|v| v.trim().eq_ignore_ascii_case("true")),
            order: ProductOrder::parse_lenient(params.order.as_deref()),
        })
    }

    /// In-process evaluation of the filter, mirroring the SQL conditions.
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = &self.category {
            if !contains_ci(&product.category, category) {
                return false;
            }
        }
        if let Some(brand) = &self.brand {
            if !contains_ci(&product.brand, brand) {
                return false;
            }
        }
        if self.price_min.is_some_and(|min| product.price < min) {
            return false;
        }
        if self.price_max.is_some_and(|max| product.price > max) {
            return false;
        }
        !(self.only_in_stock && !product.in_stock())
    }

    pub fn sort(&self, products: &mut [Product]) {
        sort_products(products, self.order);
    }
}

/// Sort by `order`, tie-broken by newest first then by id descending.
pub fn sort_products(products: &mut [Product], order: ProductOrder) {
    products.sort_by(|a, b| {
        let primary = match order {
            ProductOrder::PriceAsc => a.price.cmp(&b.price),
            ProductOrder::PriceDesc => b.price.cmp(&a.price),
            ProductOrder::Name => a.name.cmp(&b.name),
            ProductOrder::CreatedDesc => Ordering::Equal,
        };
        primary
            .then_with(|| b.created_at.cmp(&a.created_at))
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn parse_price_bound(field: &str, raw: Option<&str>) -> ProductResult<Option<Decimal>> {
    match non_empty(raw) {
        None => Ok(None),
        Some(value) => Decimal::from_str(&value).map(Some).map_err(|_| {
            ProductError::InvalidInput(format!("{field} must be a decimal number, got '{value}'"))
        }),
    }
}

/// Case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Escape `LIKE` metacharacters so user input matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `ILIKE` pattern matching `term` anywhere in the column.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}

/// Raw search parameters.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Term matched against name, category and brand
    pub q: Option<String>,
    /// Maximum number of results (default 20)
    pub limit: Option<String>,
}

impl SearchParams {
    /// Returns the search term and result limit.
    pub fn parse(&self) -> ProductResult<(String, u64)> {
        let term = match self.q.as_deref() {
            Some(q) if !q.is_empty() => q.to_string(),
            _ => {
                return Err(ProductError::InvalidInput(
                    "search term 'q' is required".to_string(),
                ));
            }
        };

        let limit = match self.limit.as_deref().map(str::trim) {
            None | Some("") => DEFAULT_SEARCH_LIMIT,
            Some(raw) => raw.parse::<u64>().map_err(|_| {
                ProductError::InvalidInput(format!(
                    "limit must be a non-negative integer, got '{raw}'"
                ))
            })?,
        };

        Ok((term, limit))
    }
}
