//! Error type for `ais-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] ais_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("invalid column value: {0}")]
  InvalidValue(String),

  /// The handle was dropped and [`connect_if_dropped`] has not reopened it.
  ///
  /// [`connect_if_dropped`]: ais_core::connection::Connection::connect_if_dropped
  #[error("database connection is not open")]
  NotConnected,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
