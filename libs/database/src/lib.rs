//! PostgreSQL connection management shared by the inventory services
//!
//! ```ignore
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::new(url), None).await?;
//! postgres::run_migrations::<Migrator>(&db, "inventory_api").await?;
//! ```
//!
//! Enable the `config` feature to load [`postgres::PostgresConfig`] through
//! `core_config::FromEnv`.

pub mod common;
pub mod postgres;
pub mod repository;

pub use common::{DatabaseError, DatabaseResult};
pub use repository::BaseRepository;
