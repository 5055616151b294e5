//! Database layer: the single connection pool opened at startup.

mod pool;

pub use pool::{connect, ping, DbPool};
