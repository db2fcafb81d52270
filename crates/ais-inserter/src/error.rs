//! Hard failures that abort a message's transaction.
//!
//! A field group the message type does not carry is not an error; it is
//! reported as [`WriteOutcome::Unsupported`](crate::WriteOutcome::Unsupported).

use ais_core::record::Table;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("connection error: {0}")]
  Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The insert executed but the store returned no generated key.
  #[error("insert into {table} returned no key")]
  MissingKey { table: Table },

  /// The reported position could not be converted to a stored point.
  #[error("coordinate conversion failed: {0}")]
  Coordinate(#[source] ais_core::Error),

  #[error("vessel signature unresolved; refusing to write message_data")]
  UnresolvedVesselSignature,
}

impl Error {
  pub(crate) fn connection<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Connection(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
