//! Error types shared by every upsert backend.

use thiserror::Error;

/// Boxed driver error kept as the `source()` of an [`UpsertError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while configuring a backend or upserting rows.
#[derive(Error, Debug)]
pub enum UpsertError {
    /// Connection string does not start with the backend's scheme.
    #[error("Invalid connection string format: {input}; valid format: {expected}")]
    InvalidFormat {
        input: String,
        expected: &'static str,
    },

    /// Keyspace/database missing from the connection string path.
    #[error("Empty keyspace in connection string")]
    EmptyNamespace,

    /// Port is not a non-negative integer.
    #[error("Invalid port '{port}': {source}")]
    InvalidPort {
        port: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Consistency level outside the backend's vocabulary.
    #[error("Invalid consistency '{0}'")]
    InvalidConsistency(String),

    /// Unsupported compression algorithm.
    #[error("Invalid compression '{name}'; valid compression: {supported}")]
    InvalidCompression {
        name: String,
        supported: &'static str,
    },

    #[error("Empty connection string")]
    EmptyConnectionString,

    /// The native driver rejected the connection string.
    #[error("Invalid connection string: {0}")]
    InvalidConnectionString(#[source] BoxError),

    /// An option value failed validation.
    #[error("Invalid {option}: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("Unknown backend '{0}'")]
    UnknownBackend(String),

    /// Opening the session or pool failed.
    #[error("Connect to {backend}: {source}")]
    Connect {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    /// Upsert called after the handle was closed.
    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Empty model")]
    EmptyModel,

    /// A backend with conflict semantics received no key columns.
    #[error("Empty keys")]
    EmptyKeys,

    /// A statement failed against the backend.
    #[error("Execute '{statement}' on {backend}: {source}")]
    Execution {
        backend: &'static str,
        statement: String,
        #[source]
        source: BoxError,
    },

    #[error("Begin {backend} transaction: {source}")]
    Begin {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("Commit {backend} transaction: {source}")]
    Commit {
        backend: &'static str,
        #[source]
        source: BoxError,
    },

    /// A statement failed and rolling the transaction back failed too.
    #[error("Execute '{statement}' on {backend}: {source}; rollback transaction: {rollback}")]
    Rollback {
        backend: &'static str,
        statement: String,
        #[source]
        source: BoxError,
        rollback: BoxError,
    },
}

/// Coarse classification of an [`UpsertError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad connection string or option; fatal at construction time.
    Configuration,
    /// Bad call arguments or closed handle; fatal for that call only.
    Validation,
    /// A statement failed against the backend.
    Execution,
    /// Begin, commit or rollback failed.
    Transaction,
}

impl UpsertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidFormat { .. }
            | Self::EmptyNamespace
            | Self::InvalidPort { .. }
            | Self::InvalidConsistency(_)
            | Self::InvalidCompression { .. }
            | Self::EmptyConnectionString
            | Self::InvalidConnectionString(_)
            | Self::InvalidOption { .. }
            | Self::UnknownBackend(_)
            | Self::Connect { .. } => ErrorKind::Configuration,
            Self::ConnectionClosed | Self::EmptyModel | Self::EmptyKeys => ErrorKind::Validation,
            Self::Execution { .. } => ErrorKind::Execution,
            Self::Begin { .. } | Self::Commit { .. } | Self::Rollback { .. } => {
                ErrorKind::Transaction
            }
        }
    }

    /// Statement text that failed, if this error came from executing one.
    pub fn statement(&self) -> Option<&str> {
        match self {
            Self::Execution { statement, .. } | Self::Rollback { statement, .. } => {
                Some(statement)
            }
            _ => None,
        }
    }

    /// Shorthand for [`UpsertError::InvalidOption`].
    pub fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_kinds() {
        assert_eq!(UpsertError::EmptyNamespace.kind(), ErrorKind::Configuration);
        assert_eq!(UpsertError::ConnectionClosed.kind(), ErrorKind::Validation);
        assert_eq!(UpsertError::EmptyKeys.kind(), ErrorKind::Validation);

        let exec = UpsertError::Execution {
            backend: "PostgreSQL",
            statement: "INSERT INTO t(a) VALUES($1)".to_string(),
            source: "boom".into(),
        };
        assert_eq!(exec.kind(), ErrorKind::Execution);
        assert_eq!(exec.statement(), Some("INSERT INTO t(a) VALUES($1)"));
    }

    #[test]
    fn test_rollback_keeps_both_causes() {
        let err = UpsertError::Rollback {
            backend: "MySQL",
            statement: "INSERT INTO t(a) VALUES(?)".to_string(),
            source: "duplicate entry".into(),
            rollback: "connection reset".into(),
        };

        assert_eq!(err.kind(), ErrorKind::Transaction);
        let message = err.to_string();
        assert!(message.contains("duplicate entry"));
        assert!(message.contains("connection reset"));
        assert_eq!(err.source().unwrap().to_string(), "duplicate entry");
    }
}
