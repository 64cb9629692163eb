use axum_helpers::Sanitize;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::pagination::PaginationMeta;

/// Largest price accepted: 8 integer digits, matching `NUMERIC(10,2)`.
const PRICE_UPPER_BOUND: i64 = 100_000_000;

fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("empty").with_message("must not be empty".into()));
    }
    Ok(())
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    let error = |code: &'static str, message: &'static str| {
        let mut err = ValidationError::new(code).with_message(message.into());
        err.add_param("value".into(), &price.to_string());
        err
    };

    if *price <= Decimal::ZERO {
        return Err(error("price_positive", "price must be greater than 0"));
    }
    if price.normalize().scale() > 2 {
        return Err(error("price_scale", "price must have at most 2 decimal places"));
    }
    if price.trunc() >= Decimal::from(PRICE_UPPER_BOUND) {
        return Err(error("price_range", "price must be below 100000000"));
    }
    Ok(())
}

/// Fix a validated price to exactly two decimal places.
pub(crate) fn to_money(price: Decimal) -> Decimal {
    let mut price = price.round_dp(2);
    price.rescale(2);
    price
}

/// `1299.99` → `"$1,299.99"`
pub fn format_price(price: Decimal) -> String {
    let fixed = format!("{:.2}", price.round_dp(2).abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if price.is_sign_negative() && !price.is_zero() { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Product entity - an inventory record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub brand: String,
    #[schema(value_type = String, example = "1299.99")]
    pub price: Decimal,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a new record from validated input.
    pub fn new(input: CreateProduct) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: input.name,
            category: input.category,
            brand: input.brand,
            price: to_money(input.price),
            quantity: input.quantity,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply the supplied fields of a validated update and touch `updated_at`.
    pub fn apply_update(&mut self, input: UpdateProduct) {
        if let Some(name) = input.name {
            self.name = name;
        }
        if let Some(category) = input.category {
            self.category = category;
        }
        if let Some(brand) = input.brand {
            self.brand = brand;
        }
        if let Some(price) = input.price {
            self.price = to_money(price);
        }
        if let Some(quantity) = input.quantity {
            self.quantity = quantity;
        }
        self.updated_at = Utc::now();
    }

    pub fn in_stock(&self) -> bool {
        self.quantity > 0
    }

    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.name, self.brand, self.category)
    }
}

/// DTO for creating a product; also the body of a full replacement (PUT).
///
/// Text fields are trimmed before validation.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(custom(function = "validate_not_empty"), length(max = 200))]
    #[schema(example = "Laptop Pro 15")]
    pub name: String,
    #[validate(custom(function = "validate_not_empty"), length(max = 100))]
    #[schema(example = "Electronics")]
    pub category: String,
    #[validate(custom(function = "validate_not_empty"), length(max = 100))]
    #[schema(example = "Acme")]
    pub brand: String,
    /// Strictly positive, at most 2 decimal places
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "1299.99")]
    pub price: Decimal,
    #[validate(range(min = 0, message = "quantity must be zero or greater"))]
    #[schema(example = 15)]
    pub quantity: i32,
}

impl Sanitize for CreateProduct {
    fn sanitize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.category);
        trim_in_place(&mut self.brand);
    }
}

/// DTO for a partial update (PATCH); only supplied fields are validated and written.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(custom(function = "validate_not_empty"), length(max = 200))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_not_empty"), length(max = 100))]
    pub category: Option<String>,
    #[validate(custom(function = "validate_not_empty"), length(max = 100))]
    pub brand: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "999.00")]
    pub price: Option<Decimal>,
    #[validate(range(min = 0, message = "quantity must be zero or greater"))]
    pub quantity: Option<i32>,
}

impl Sanitize for UpdateProduct {
    fn sanitize(&mut self) {
        for field in [&mut self.name, &mut self.category, &mut self.brand]
            .into_iter()
            .flatten()
        {
            trim_in_place(field);
        }
    }
}

impl From<CreateProduct> for UpdateProduct {
    fn from(input: CreateProduct) -> Self {
        Self {
            name: Some(input.name),
            category: Some(input.category),
            brand: Some(input.brand),
            price: Some(input.price),
            quantity: Some(input.quantity),
        }
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

/// Body of `POST /{id}/reducir-stock`.
///
/// `quantity` is kept as raw JSON so that strings, floats, booleans and
/// null are all rejected with the same message.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ReduceStockRequest {
    #[serde(default)]
    #[schema(value_type = i64, example = 5)]
    pub quantity: serde_json::Value,
}

/// Compact view used by list-type endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub brand: String,
    #[schema(value_type = String, example = "1299.99")]
    pub price: Decimal,
    pub quantity: i32,
    #[schema(example = "$1,299.99")]
    pub formatted_price: String,
    pub in_stock: bool,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            category: product.category.clone(),
            brand: product.brand.clone(),
            price: product.price,
            quantity: product.quantity,
            formatted_price: product.formatted_price(),
            in_stock: product.in_stock(),
        }
    }
}

/// Full view returned by single-record endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub summary: ProductSummary,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        Self {
            summary: ProductSummary::from(product),
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

impl From<Product> for ProductDetail {
    fn from(product: Product) -> Self {
        Self::from(&product)
    }
}

pub fn summaries(products: &[Product]) -> Vec<ProductSummary> {
    products.iter().map(ProductSummary::from).collect()
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductSummary>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SearchResponse {
    pub results: Vec<ProductSummary>,
    pub total: usize,
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub category: String,
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandResponse {
    pub brand: String,
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OutOfStockResponse {
    pub products: Vec<ProductSummary>,
    pub total: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReduceStockResponse {
    #[schema(example = "Stock reduced successfully. Current stock: 10")]
    pub message: String,
    pub product: ProductDetail,
}

impl ReduceStockResponse {
    pub fn new(product: &Product) -> Self {
        Self {
            message: format!(
                "Stock reduced successfully. Current stock: {}",
                product.quantity
            ),
            product: ProductDetail::from(product),
        }
    }
}
