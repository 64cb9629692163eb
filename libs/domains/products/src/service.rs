//! Product Service - Business logic layer

use axum_helpers::Sanitize;
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::pagination::PaginationMeta;
use crate::query::{ListParams, ProductQuery};
use crate::repository::ProductRepository;

/// One page of products plus its bookkeeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub pagination: PaginationMeta,
}

/// Product service providing business logic operations
///
/// Every write is trimmed and validated here before it reaches the
/// repository, so a failed request never leaves a partial change behind.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(product_name = %input.name))]
    pub async fn create_product(&self, mut input: CreateProduct) -> ProductResult<Product> {
        input.sanitize();
        input.validate()?;

        let product = self.repository.create(Product::new(input)).await?;
        tracing::info!(product_id = %product.id, "Product created");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// Full replacement: every field is required.
    #[instrument(skip(self, input))]
    pub async fn replace_product(
        &self,
        id: Uuid,
        mut input: CreateProduct,
    ) -> ProductResult<Product> {
        input.sanitize();
        input.validate()?;

        let product = self.repository.update(id, input.into()).await?;
        tracing::info!(product_id = %id, "Product replaced");
        Ok(product)
    }

    /// Partial update: only supplied fields are validated and written.
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        mut input: UpdateProduct,
    ) -> ProductResult<Product> {
        input.sanitize();
        input.validate()?;

        let product = self.repository.update(id, input).await?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }

    /// Filtered, ordered, paginated listing.
    #[instrument(skip(self, params))]
    pub async fn list_products(&self, params: &ListParams) -> ProductResult<ProductPage> {
        let query = ProductQuery::from_params(params)?;

        let total = self.repository.count(&query).await?;
        let pagination = PaginationMeta::resolve(params.page.as_deref(), total);
        let products = self.repository.list(&query, pagination.window()).await?;

        Ok(ProductPage {
            products,
            pagination,
        })
    }

    #[instrument(skip(self))]
    pub async fn search_products(&self, term: &str, limit: u64) -> ProductResult<Vec<Product>> {
        if term.is_empty() {
            return Err(ProductError::InvalidInput(
                "search term 'q' is required".to_string(),
            ));
        }
        self.repository.search(term, limit).await
    }

    #[instrument(skip(self))]
    pub async fn products_by_category(&self, category: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_category(category).await
    }

    #[instrument(skip(self))]
    pub async fn products_by_brand(&self, brand: &str) -> ProductResult<Vec<Product>> {
        self.repository.find_by_brand(brand).await
    }

    #[instrument(skip(self))]
    pub async fn out_of_stock_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.find_out_of_stock().await
    }

    /// Guarded decrement.
    ///
    /// An unknown id is `NotFound` whatever the amount; a non-positive
    /// amount on an existing product is `InvalidInput` and writes nothing.
    #[instrument(skip(self))]
    pub async fn reduce_stock(&self, id: Uuid, amount: i64) -> ProductResult<Product> {
        if amount <= 0 {
            self.get_product(id).await?;
            return Err(ProductError::InvalidInput(
                "amount must be a positive integer".to_string(),
            ));
        }

        let product = self.repository.reduce_stock(id, amount).await?;
        tracing::info!(
            product_id = %id,
            amount,
            remaining = product.quantity,
            "Stock reduced"
        );
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageWindow;
    use crate::repository::MockProductRepository;
    use mockall::predicate::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn create_input() -> CreateProduct {
        CreateProduct {
            name: "  Desk Lamp ".to_string(),
            category: "Home".to_string(),
            brand: "Lumo".to_string(),
            price: Decimal::from_str("24.5").unwrap(),
            quantity: 4,
        }
    }

    #[tokio::test]
    async fn test_create_trims_and_normalizes_before_persisting() {
        let mut repo = MockProductRepository::new();
        repo.expect_create()
            .withf(|p: &Product| p.name == "Desk Lamp" && p.price.to_string() == "24.50")
            .times(1)
            .returning(|p| Ok(p));

        let service = ProductService::new(repo);
        let product = service.create_product(create_input()).await.unwrap();
        assert_eq!(product.name, "Desk Lamp");
    }

    #[tokio::test]
    async fn test_invalid_create_never_reaches_repository() {
        let mut repo = MockProductRepository::new();
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let mut input = create_input();
        input.price = Decimal::ZERO;
        input.quantity = -2;

        let err = service.create_product(input).await.unwrap_err();
        match err {
            ProductError::Validation(errors) => {
                let fields = errors.field_errors();
                assert!(fields.contains_key("price"));
                assert!(fields.contains_key("quantity"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_get_missing_product_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        let id = Uuid::now_v7();
        assert!(matches!(
            service.get_product(id).await,
            Err(ProductError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_replace_sends_every_field() {
        let mut repo = MockProductRepository::new();
        repo.expect_update()
            .withf(|_, input: &UpdateProduct| {
                input.name.as_deref() == Some("Desk Lamp")
                    && input.category.is_some()
                    && input.brand.is_some()
                    && input.price.is_some()
                    && input.quantity == Some(4)
            })
            .returning(|_, input| {
                let mut product = Product::new(create_input());
                product.apply_update(input);
                Ok(product)
            });

        let service = ProductService::new(repo);
        let product = service
            .replace_product(Uuid::now_v7(), create_input())
            .await
            .unwrap();
        assert_eq!(product.name, "Desk Lamp");
    }

    #[tokio::test]
    async fn test_partial_update_with_blank_name_is_rejected() {
        let mut repo = MockProductRepository::new();
        repo.expect_update().never();

        let service = ProductService::new(repo);
        let input = UpdateProduct {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.update_product(Uuid::now_v7(), input).await,
            Err(ProductError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.delete_product(Uuid::now_v7()).await,
            Err(ProductError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_resolves_page_from_count() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().returning(|_| Ok(26));
        repo.expect_list()
            .withf(|_, window: &PageWindow| *window == PageWindow { offset: 20, limit: 20 })
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        let params = ListParams {
            page: Some("2".to_string()),
            ..Default::default()
        };
        let page = service.list_products(&params).await.unwrap();

        assert_eq!(page.pagination.current_page, 2);
        assert!(page.pagination.has_previous);
        assert!(!page.pagination.has_next);
    }

    #[tokio::test]
    async fn test_list_with_bad_price_bound_fails_early() {
        let mut repo = MockProductRepository::new();
        repo.expect_count().never();

        let service = ProductService::new(repo);
        let params = ListParams {
            price_max: Some("lots".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            service.list_products(&params).await,
            Err(ProductError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_search_passes_limit_through() {
        let mut repo = MockProductRepository::new();
        repo.expect_search()
            .withf(|term: &str, limit: &u64| term == "acme" && *limit == 5)
            .times(1)
            .returning(|_, _| Ok(vec![]));

        let service = ProductService::new(repo);
        assert!(service.search_products("acme", 5).await.unwrap().is_empty());
        assert!(matches!(
            service.search_products("", 5).await,
            Err(ProductError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_non_positive_reduction_never_writes() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id()
            .times(2)
            .returning(|_| Ok(Some(Product::new(create_input()))));
        repo.expect_reduce_stock().never();

        let service = ProductService::new(repo);
        for amount in [0, -5] {
            let err = service.reduce_stock(Uuid::now_v7(), amount).await.unwrap_err();
            assert!(matches!(
                &err,
                ProductError::InvalidInput(msg) if msg == "amount must be a positive integer"
            ));
        }
    }

    #[tokio::test]
    async fn test_unknown_id_is_not_found_even_with_bad_amount() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));
        repo.expect_reduce_stock().never();

        let service = ProductService::new(repo);
        let id = Uuid::now_v7();
        assert!(matches!(
            service.reduce_stock(id, 0).await,
            Err(ProductError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_reduce_stock_propagates_insufficient_stock() {
        let mut repo = MockProductRepository::new();
        repo.expect_reduce_stock()
            .with(always(), eq(20i64))
            .returning(|_, requested| {
                Err(ProductError::InsufficientStock {
                    available: 15,
                    requested,
                })
            });

        let service = ProductService::new(repo);
        assert!(matches!(
            service.reduce_stock(Uuid::now_v7(), 20).await,
            Err(ProductError::InsufficientStock {
                available: 15,
                requested: 20
            })
        ));
    }
}
