use std::fmt;

/// Server code returned by `createUser` when the user already exists
pub const USER_ALREADY_EXISTS_CODE: i32 = 51003;
/// Server code returned by `create` when the collection already exists
pub const NAMESPACE_EXISTS_CODE: i32 = 48;

#[derive(Debug)]
pub enum RepositoryError {
    AlreadyExists(String),
    ValidationError(String),
    DatabaseError(String),
    ConnectionError(String),
    SerializationError(String),
    /// Generic error that wraps any error implementing std::error::Error
    Generic(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::AlreadyExists(msg) => write!(f, "Already Exists: {}", msg),
            RepositoryError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            RepositoryError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            RepositoryError::ConnectionError(msg) => write!(f, "Connection Error: {}", msg),
            RepositoryError::SerializationError(msg) => write!(f, "Serialization Error: {}", msg),
            RepositoryError::Generic(err) => write!(f, "Repository Error: {}", err),
        }
    }
}

impl std::error::Error for RepositoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepositoryError::Generic(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl RepositoryError {
    pub fn already_exists<T: Into<String>>(msg: T) -> Self {
        RepositoryError::AlreadyExists(msg.into())
    }

    pub fn database<T: Into<String>>(msg: T) -> Self {
        RepositoryError::DatabaseError(msg.into())
    }

    pub fn connection<T: Into<String>>(msg: T) -> Self {
        RepositoryError::ConnectionError(msg.into())
    }

    pub fn generic<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        RepositoryError::Generic(Box::new(err))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, RepositoryError::AlreadyExists(_))
    }
}

impl From<mongodb::error::Error> for RepositoryError {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::ErrorKind;

        let classified = match err.kind.as_ref() {
            ErrorKind::Command(command_error) => match command_error.code {
                USER_ALREADY_EXISTS_CODE | NAMESPACE_EXISTS_CODE => ErrorClass::AlreadyExists,
                _ => ErrorClass::Database,
            },
            // Duplicate key errors only carry E11000 in the message
            ErrorKind::Write(_) if err.to_string().contains("E11000") => ErrorClass::AlreadyExists,
            ErrorKind::Write(_) => ErrorClass::Database,
            ErrorKind::Authentication { .. } | ErrorKind::ServerSelection { .. } | ErrorKind::Io(_) => {
                ErrorClass::Connection
            }
            ErrorKind::InvalidArgument { .. } => ErrorClass::Validation,
            _ => ErrorClass::Other,
        };

        // The driver's text is the whole payload
        match classified {
            ErrorClass::AlreadyExists => RepositoryError::AlreadyExists(err.to_string()),
            ErrorClass::Database => RepositoryError::DatabaseError(err.to_string()),
            ErrorClass::Connection => RepositoryError::ConnectionError(err.to_string()),
            ErrorClass::Validation => RepositoryError::ValidationError(err.to_string()),
            ErrorClass::Other => RepositoryError::Generic(Box::new(err)),
        }
    }
}

enum ErrorClass {
    AlreadyExists,
    Database,
    Connection,
    Validation,
    Other,
}

impl From<bson::ser::Error> for RepositoryError {
    fn from(err: bson::ser::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON serialization error: {}", err))
    }
}

impl From<bson::de::Error> for RepositoryError {
    fn from(err: bson::de::Error) -> Self {
        RepositoryError::SerializationError(format!("BSON deserialization error: {}", err))
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_keeps_message() {
        let err = RepositoryError::already_exists("User \"user@db\" already exists");
        assert_eq!(err.to_string(), "Already Exists: User \"user@db\" already exists");
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_generic_exposes_source() {
        use std::error::Error;
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err = RepositoryError::generic(io);
        assert!(err.source().is_some());
        assert!(!err.is_already_exists());
    }

    fn command_error(code: i32, code_name: &str, errmsg: &str) -> mongodb::error::Error {
        use mongodb::error::{CommandError, ErrorKind};
        let command: CommandError = bson::from_document(bson::doc! {
            "code": code,
            "codeName": code_name,
            "errmsg": errmsg,
        })
        .unwrap();
        mongodb::error::Error::from(ErrorKind::Command(command))
    }

    #[test]
    fn test_user_exists_code_maps_to_already_exists() {
        let err = RepositoryError::from(command_error(51003, "Location51003", "User \"user@db\" already exists"));
        assert!(err.is_already_exists());
        assert!(err.to_string().contains("51003"));
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_namespace_exists_code_maps_to_already_exists() {
        let err = RepositoryError::from(command_error(48, "NamespaceExists", "Collection db.auth already exists."));
        assert!(err.is_already_exists());
    }

    #[test]
    fn test_second_run_surfaces_as_conflict() {
        use crate::util::error::ServiceError;
        let err = ServiceError::from(RepositoryError::from(command_error(
            51003,
            "Location51003",
            "User \"user@db\" already exists",
        )));
        assert!(matches!(err, ServiceError::Conflict(ref msg) if msg.contains("already exists")));
    }

    #[test]
    fn test_other_command_code_maps_to_database_error() {
        let driver_err = command_error(13, "Unauthorized", "not authorized on db to execute command");
        let expected = driver_err.to_string();
        match RepositoryError::from(driver_err) {
            RepositoryError::DatabaseError(msg) => assert_eq!(msg, expected),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn test_io_error_maps_to_connection_error() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        let driver_err = mongodb::error::Error::from(io);
        let expected = driver_err.to_string();
        match RepositoryError::from(driver_err) {
            RepositoryError::ConnectionError(msg) => assert_eq!(msg, expected),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
