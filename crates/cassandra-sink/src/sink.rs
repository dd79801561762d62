//! Cassandra batch writer.

use crate::config::{CassandraConfig, Compression, Consistency, RoutingPolicy};
use crate::statement::upsert_statement;
use crate::value::to_cql_value;
use scylla::frame::response::result::CqlValue;
use scylla::statement::Consistency as CqlConsistency;
use scylla::transport::load_balancing::DefaultPolicy;
use scylla::transport::session::PoolSize;
use scylla::transport::Compression as CqlCompression;
use scylla::{ExecutionProfile, Session, SessionBuilder};
use std::num::NonZeroUsize;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::{debug, info};
use upsert_core::{Batch, BatchWriter, ConnectArgs, UpsertError};

const BACKEND: &str = "Cassandra";

/// Writes batches to Cassandra row by row.
///
/// There is no transaction: rows applied before a failing row stay applied.
/// Key columns are not needed because conflicts resolve on the primary key.
/// [`close`](BatchWriter::close) drops the session once in-flight batches
/// finish; later batches fail with [`UpsertError::ConnectionClosed`].
pub struct CassandraSink {
    session: RwLock<Option<Session>>,
    keyspace: String,
}

impl CassandraSink {
    /// Parse a `cassandra://` connection string and open a session.
    ///
    /// `open_conns` sets the connections per host and `conn_life_time` the
    /// request timeout; the idle settings have no Cassandra counterpart.
    pub async fn connect(args: &ConnectArgs) -> Result<Self, UpsertError> {
        if args.connection_string.is_empty() {
            return Err(UpsertError::EmptyConnectionString);
        }

        let config = CassandraConfig::parse(&args.connection_string)?
            .with_pool(args.open_conns, args.conn_life_time);

        Self::connect_with_config(&config).await
    }

    pub async fn connect_with_config(config: &CassandraConfig) -> Result<Self, UpsertError> {
        let policy = DefaultPolicy::builder()
            .token_aware(config.routing == RoutingPolicy::TokenAware)
            .build();

        let profile = ExecutionProfile::builder()
            .consistency(cql_consistency(config.consistency))
            .load_balancing_policy(policy)
            .request_timeout(config.request_timeout)
            .build();

        let mut builder = SessionBuilder::new()
            .known_nodes(config.known_nodes())
            .default_execution_profile_handle(profile.into_handle())
            .compression(config.compression.map(|Compression::Snappy| CqlCompression::Snappy))
            .use_keyspace(&config.keyspace, false);

        if let Some(per_host) = NonZeroUsize::new(config.connections_per_host) {
            builder = builder.pool_size(PoolSize::PerHost(per_host));
        }
        if let Some(credentials) = &config.credentials {
            builder = builder.user(&credentials.username, &credentials.password);
        }

        let session = builder.build().await.map_err(|e| UpsertError::Connect {
            backend: BACKEND,
            source: e.into(),
        })?;

        info!(
            "Connected to Cassandra {:?} (keyspace '{}', consistency {})",
            config.hosts, config.keyspace, config.consistency
        );

        Ok(Self {
            session: RwLock::new(Some(session)),
            keyspace: config.keyspace.clone(),
        })
    }
}

fn cql_consistency(consistency: Consistency) -> CqlConsistency {
    match consistency {
        Consistency::Any => CqlConsistency::Any,
        Consistency::One => CqlConsistency::One,
        Consistency::Two => CqlConsistency::Two,
        Consistency::Three => CqlConsistency::Three,
        Consistency::Quorum => CqlConsistency::Quorum,
        Consistency::All => CqlConsistency::All,
        Consistency::LocalQuorum => CqlConsistency::LocalQuorum,
        Consistency::EachQuorum => CqlConsistency::EachQuorum,
        Consistency::LocalOne => CqlConsistency::LocalOne,
    }
}

#[async_trait::async_trait]
impl BatchWriter for CassandraSink {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn write_batch(&self, batch: Batch<'_>) -> Result<u64, UpsertError> {
        if batch.is_inert() {
            return Ok(0);
        }

        let guard = self.session.read().await;
        let session = guard.as_ref().ok_or(UpsertError::ConnectionClosed)?;

        let start = Instant::now();
        let mut written = 0u64;

        for row in batch.non_empty_rows() {
            let statement = upsert_statement(batch.model, batch.action, row);
            let values: Vec<Option<CqlValue>> =
                statement.args.iter().copied().map(to_cql_value).collect();

            if let Err(e) = session
                .query_unpaged(statement.text.as_str(), values)
                .await
            {
                return Err(UpsertError::Execution {
                    backend: BACKEND,
                    statement: statement.text,
                    source: e.into(),
                });
            }
            written += 1;
        }

        if written > 0 {
            debug!(
                "Wrote {} rows to '{}.{}' in {:?}",
                written,
                self.keyspace,
                batch.model,
                start.elapsed()
            );
        }

        Ok(written)
    }

    async fn close(&self) {
        if self.session.write().await.take().is_some() {
            info!("Closed Cassandra session for keyspace '{}'", self.keyspace);
        }
    }
}
