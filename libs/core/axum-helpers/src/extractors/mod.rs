//! Custom extractors for Axum handlers.

pub mod uuid_path;
pub mod validated_json;

pub use uuid_path::UuidPath;
pub use validated_json::{Sanitize, ValidatedJson};
