/// Errors raised by connection management and health checks
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// Error reported by SeaORM / the PostgreSQL driver
    #[error("PostgreSQL error: {0}")]
    Postgres(#[from] sea_orm::DbErr),

    /// Connection could not be established after all retries
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
