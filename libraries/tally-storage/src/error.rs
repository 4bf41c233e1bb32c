/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Unique-constraint violation
    #[error("Duplicate entry: {0}")]
    Duplicate(String),

    /// Migration error
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Classify an insert error, turning unique violations into `Duplicate`
    pub(crate) fn from_insert(err: sqlx::Error, what: &str) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                Self::Duplicate(what.to_string())
            }
            _ => Self::Database(err),
        }
    }
}

impl From<StorageError> for tally_core::TallyError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => tally_core::TallyError::not_found(entity, id),
            StorageError::Duplicate(what) => tally_core::TallyError::duplicate(what),
            other => tally_core::TallyError::storage(other.to_string()),
        }
    }
}
