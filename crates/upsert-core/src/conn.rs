//! Connection arguments handed to a backend when it opens its pool or
//! session.

use std::time::Duration;

/// Connection string plus pool sizing, passed through to the driver.
///
/// A zero duration means "no limit".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectArgs {
    pub connection_string: String,
    /// Connections kept open while idle.
    pub idle_conns: usize,
    /// Upper bound on open connections.
    pub open_conns: usize,
    /// How long a connection may sit idle before it is closed.
    pub conn_idle_time: Duration,
    /// How long a connection may be reused.
    pub conn_life_time: Duration,
}
