//! Backend selection.
//!
//! [`BackendKind`] names the store to write to; [`Backend`] is the connected
//! writer. `Upserter::connect` branches once on the kind and every later
//! batch dispatches through the enum.

use bulk_upsert_cassandra::CassandraSink;
use bulk_upsert_mysql::MySQLSink;
use bulk_upsert_postgresql::PostgreSQLSink;
use serde::{Deserialize, Deserializer};
use upsert_core::{Batch, BatchWriter, ConnectArgs, UpsertError};

/// Supported data stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendKind {
    #[default]
    Postgres,
    MySql,
    Cassandra,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Postgres => write!(f, "postgresql"),
            Self::MySql => write!(f, "mysql"),
            Self::Cassandra => write!(f, "cassandra"),
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = UpsertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pg" | "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            "cassandra" => Ok(Self::Cassandra),
            _ => Err(UpsertError::UnknownBackend(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for BackendKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse().map_err(serde::de::Error::custom)
    }
}

/// A connected writer for one of the supported stores.
pub enum Backend {
    Postgres(PostgreSQLSink),
    MySql(MySQLSink),
    Cassandra(CassandraSink),
}

impl Backend {
    /// Open the pool or session for `kind`.
    pub async fn connect(kind: BackendKind, args: &ConnectArgs) -> Result<Self, UpsertError> {
        Ok(match kind {
            BackendKind::Postgres => Self::Postgres(PostgreSQLSink::connect(args).await?),
            BackendKind::MySql => Self::MySql(MySQLSink::connect(args).await?),
            BackendKind::Cassandra => Self::Cassandra(CassandraSink::connect(args).await?),
        })
    }

    pub fn kind(&self) -> BackendKind {
        match self {
            Self::Postgres(_) => BackendKind::Postgres,
            Self::MySql(_) => BackendKind::MySql,
            Self::Cassandra(_) => BackendKind::Cassandra,
        }
    }
}

#[async_trait::async_trait]
impl BatchWriter for Backend {
    fn backend(&self) -> &'static str {
        match self {
            Self::Postgres(sink) => sink.backend(),
            Self::MySql(sink) => sink.backend(),
            Self::Cassandra(sink) => sink.backend(),
        }
    }

    async fn write_batch(&self, batch: Batch<'_>) -> Result<u64, UpsertError> {
        match self {
            Self::Postgres(sink) => sink.write_batch(batch).await,
            Self::MySql(sink) => sink.write_batch(batch).await,
            Self::Cassandra(sink) => sink.write_batch(batch).await,
        }
    }

    async fn close(&self) {
        match self {
            Self::Postgres(sink) => sink.close().await,
            Self::MySql(sink) => sink.close().await,
            Self::Cassandra(sink) => sink.close().await,
        }
    }
}
