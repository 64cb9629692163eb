use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, UpdateProduct};
use crate::pagination::PageWindow;
use crate::query::{ProductOrder, ProductQuery, contains_ci, sort_products};

/// Repository trait for Product persistence
///
/// Inputs are already sanitized and validated by the service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product
    async fn create(&self, product: Product) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Apply the supplied fields; `NotFound` if the id is unknown
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product>;

    /// Returns false when nothing was deleted
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// One page of records matching `query`, in `query.order`
    async fn list(&self, query: &ProductQuery, window: PageWindow) -> ProductResult<Vec<Product>>;

    async fn count(&self, query: &ProductQuery) -> ProductResult<u64>;

    /// Case-insensitive substring of `term` in name, category or brand
    async fn search(&self, term: &str, limit: u64) -> ProductResult<Vec<Product>>;

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>>;

    async fn find_by_brand(&self, brand: &str) -> ProductResult<Vec<Product>>;

    /// Records with zero quantity
    async fn find_out_of_stock(&self) -> ProductResult<Vec<Product>>;

    /// Atomically subtract `amount` if enough stock is available.
    ///
    /// `NotFound` for an unknown id, `InsufficientStock` (without mutation)
    /// when `quantity < amount`.
    async fn reduce_stock(&self, id: Uuid, amount: i64) -> ProductResult<Product>;
}

/// In-memory implementation of ProductRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    async fn filtered<F>(&self, order: ProductOrder, predicate: F) -> Vec<Product>
    where
        F: Fn(&Product) -> bool,
    {
        let products = self.products.read().await;
        let mut result: Vec<Product> = products
            .values()
            .filter(|p| predicate(p))
            .cloned()
            .collect();
        sort_products(&mut result, order);
        result
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, product: Product) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        products.insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<Product> {
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);

        tracing::info!(product_id = %id, "Updated product");
        Ok(product.clone())
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn list(&self, query: &ProductQuery, window: PageWindow) -> ProductResult<Vec<Product>> {
        let result = self.filtered(query.order, |p| query.matches(p)).await;

        Ok(result
            .into_iter()
            .skip(window.offset as usize)
            .take(window.limit as usize)
            .collect())
    }

    async fn count(&self, query: &ProductQuery) -> ProductResult<u64> {
        let products = self.products.read().await;
        Ok(products.values().filter(|p| query.matches(p)).count() as u64)
    }

    async fn search(&self, term: &str, limit: u64) -> ProductResult<Vec<Product>> {
        let result = self
            .filtered(ProductOrder::CreatedDesc, |p| {
                contains_ci(&p.name, term)
                    || contains_ci(&p.category, term)
                    || contains_ci(&p.brand, term)
            })
            .await;

        Ok(result.into_iter().take(limit as usize).collect())
    }

    async fn find_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        Ok(self
            .filtered(ProductOrder::CreatedDesc, |p| contains_ci(&p.category, category))
            .await)
    }

    async fn find_by_brand(&self, brand: &str) -> ProductResult<Vec<Product>> {
        Ok(self
            .filtered(ProductOrder::CreatedDesc, |p| contains_ci(&p.brand, brand))
            .await)
    }

    async fn find_out_of_stock(&self) -> ProductResult<Vec<Product>> {
        Ok(self.filtered(ProductOrder::CreatedDesc, |p| p.quantity == 0).await)
    }

    async fn reduce_stock(&self, id: Uuid, amount: i64) -> ProductResult<Product> {
        // Check and decrement under the same write guard.
        let mut products = self.products.write().await;
        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;

        if i64::from(product.quantity) < amount {
            return Err(ProductError::InsufficientStock {
                available: product.quantity,
                requested: amount,
            });
        }

        // amount <= quantity, so it fits in i32
        product.quantity -= amount as i32;
        product.updated_at = Utc::now();

        tracing::info!(product_id = %id, amount, remaining = product.quantity, "Reduced stock");
        Ok(product.clone())
    }
}
