//! Upsert options and their parsers.

pub mod duration;
mod opts;

pub use duration::parse_duration;
pub use opts::{
    UpsertOpts, DEFAULT_BATCH_SIZE, DEFAULT_CONNECTION_STRING, DEFAULT_CONN_IDLE_TIME,
    DEFAULT_CONN_LIFE_TIME, DEFAULT_IDLE_CONNS, DEFAULT_OPEN_CONNS,
};
