use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Login required")]
    Unauthenticated,

    #[error("A video with the same filename already exists: {0}")]
    DuplicateUpload(String),

    #[error("Failed to extract a thumbnail frame: {0}")]
    ThumbnailExtraction(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not found, or you are not authorized to delete it")]
    NotFoundOrForbidden,

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            // Map "no rows" to NotFound
            sqlx::Error::RowNotFound => Self::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                let code = db_err.code().unwrap_or_default();
                match code.as_ref() {
                    // PostgreSQL unique_violation
                    "23505" => {
                        let detail = db_err.message().to_string();
                        if detail.contains("username") {
                            Self::DuplicateUsername(detail)
                        } else if detail.contains("filename") {
                            Self::DuplicateUpload(detail)
                        } else {
                            Self::Internal(detail)
                        }
                    }
                    // PostgreSQL foreign_key_violation
                    "23503" => Self::NotFound("Referenced resource not found".to_string()),
                    _ => Self::Database(err),
                }
            }
            _ => Self::Database(err),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateUsername("alice".to_string());
        assert!(format!("{err}").contains("alice"));

        let err = Error::NotFoundOrForbidden;
        assert!(format!("{err}").contains("not authorized"));
    }
}
