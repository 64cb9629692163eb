//! Products Domain
//!
//! Inventory records (name, category, brand, price, quantity) with filtered
//! listing, pagination, search and guarded stock reduction.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, envelopes, projections
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, pagination, stock rules
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + PostgreSQL / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product, DTOs, query and page types
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, InMemoryProductRepository, ProductService};
//!
//! let service = ProductService::new(InMemoryProductRepository::new());
//! let router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod pagination;
pub mod postgres;
pub mod query;
pub mod repository;
pub mod service;

pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProduct, Product, ProductDetail, ProductSummary, ReduceStockRequest, UpdateProduct,
};
pub use pagination::{PAGE_SIZE, PageWindow, PaginationMeta};
pub use postgres::PgProductRepository;
pub use query::{ListParams, ProductOrder, ProductQuery, SearchParams};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::{ProductPage, ProductService};
