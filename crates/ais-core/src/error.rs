//! Error types for `ais-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("mmsi {0} exceeds nine digits")]
  InvalidMmsi(u64),

  #[error("coordinate out of range: lat {latitude}, lon {longitude}")]
  CoordinateOutOfRange { latitude: f64, longitude: f64 },

  #[error("malformed point literal: {0:?}")]
  MalformedPoint(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
