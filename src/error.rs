use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{resource} not found: {identifier}")]
    NotFound {
        resource: &'static str,
        identifier: String,
    },

    #[error("a {resource} with this {field} already exists")]
    Duplicate {
        resource: &'static str,
        field: &'static str,
    },

    #[error("you do not have access to this {0}")]
    Forbidden(&'static str),

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    /// The slug scope is saturated: every candidate up to the retry bound
    /// was taken. Indicates scope pathology, not caller input error.
    #[error("could not allocate a unique slug for '{base}'")]
    SlugExhausted { base: String },

    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    #[error(transparent)]
    Pool(#[from] r2d2::Error),
}

impl Error {
    pub fn not_found(resource: &'static str, identifier: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            identifier: identifier.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// True when the underlying SQLite error is a UNIQUE constraint violation.
/// Creation paths use this to retry slug assignment after losing a race.
pub fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _) if e.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

/// True when a UNIQUE violation names the given column (e.g. `users.email`),
/// letting callers map known conflicts to a `Duplicate` error instead of
/// retrying.
pub fn unique_violation_on(err: &rusqlite::Error, column: &str) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(e, Some(msg))
            if e.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            msg.contains(column)
        }
        _ => false,
    }
}
