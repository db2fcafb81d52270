//! Coordinate conversion for `geospatial_data.coord`.
//!
//! A [`Point`] follows the planar `(x,y)` convention of the store's point
//! column: `x` is longitude, `y` is latitude, both in decimal degrees.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const MAX_LATITUDE: f64 = 90.0;
pub const MAX_LONGITUDE: f64 = 180.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  /// Convert a latitude/longitude pair into a point, rejecting values outside
  /// the WGS84 range.
  pub fn from_lat_lon(latitude: f64, longitude: f64) -> Result<Self> {
    if !latitude.is_finite()
      || !longitude.is_finite()
      || latitude.abs() > MAX_LATITUDE
      || longitude.abs() > MAX_LONGITUDE
    {
      return Err(Error::CoordinateOutOfRange { latitude, longitude });
    }
    Ok(Self { x: longitude, y: latitude })
  }

  pub fn latitude(&self) -> f64 { self.y }

  pub fn longitude(&self) -> f64 { self.x }
}

impl fmt::Display for Point {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "({},{})", self.x, self.y)
  }
}

impl FromStr for Point {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let malformed = || Error::MalformedPoint(s.to_owned());
    let inner = s
      .trim()
      .strip_prefix('(')
      .and_then(|rest| rest.strip_suffix(')'))
      .ok_or_else(malformed)?;
    let (x, y) = inner.split_once(',').ok_or_else(malformed)?;
    Ok(Self {
      x: x.trim().parse().map_err(|_| malformed())?,
      y: y.trim().parse().map_err(|_| malformed())?,
    })
  }
}
