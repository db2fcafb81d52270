//! SQLite backend for the AIS message store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime, and implements
//! [`ais_core::connection::Connection`] on top of it.

mod connection;
mod encode;
mod schema;

pub mod error;

pub use connection::SqliteConnection;
pub use error::{Error, Result};

#[cfg(test)]
mod tests;
