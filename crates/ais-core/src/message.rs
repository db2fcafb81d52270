//! The decoded-message accessor handed to the insertion pipeline.
//!
//! AIS message types carry different sets of fields. A position report has no
//! voyage data; a static data report has no navigation data. Each set of
//! related fields is a *field group*, and an accessor reports a group that the
//! message type does not carry as [`FieldGroup::NotApplicable`]. That is an
//! expected outcome, not an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{Mmsi, NavigationData, VesselData, VoyageData};

// ─── Field groups ────────────────────────────────────────────────────────────

/// Presence of a field group on a given message type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldGroup<T> {
  Applicable(T),
  NotApplicable,
}

impl<T> FieldGroup<T> {
  pub fn is_applicable(&self) -> bool { matches!(self, Self::Applicable(_)) }
}

impl<T> From<Option<T>> for FieldGroup<T> {
  fn from(value: Option<T>) -> Self {
    match value {
      Some(v) => Self::Applicable(v),
      None => Self::NotApplicable,
    }
  }
}

// ─── Group payloads ──────────────────────────────────────────────────────────

/// Static identity fields beyond the MMSI. Each may still be empty when the
/// group itself is carried.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VesselIdentity {
  #[serde(default)]
  pub imo:            Option<u32>,
  #[serde(default)]
  pub call_sign:      Option<String>,
  #[serde(default)]
  pub name:           Option<String>,
  #[serde(default)]
  pub vessel_type_id: Option<i32>,
}

/// A reported position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
  pub latitude:  f64,
  pub longitude: f64,
  /// Position accuracy flag: `true` for high accuracy (< 10 m).
  #[serde(default)]
  pub accuracy:  bool,
}

// ─── Accessor ────────────────────────────────────────────────────────────────

/// Typed view over one decoded AIS message.
///
/// The envelope fields are present on every message type. All other getters
/// return a [`FieldGroup`].
pub trait MessageAccessor: Sync {
  fn time_received(&self) -> DateTime<Utc>;

  fn is_valid(&self) -> bool;

  fn is_multi_part(&self) -> bool;

  /// The raw NMEA sentence(s) the message was decoded from.
  fn raw_nmea(&self) -> &str;

  fn message_type_id(&self) -> i32;

  fn mmsi(&self) -> FieldGroup<Mmsi>;

  fn vessel_identity(&self) -> FieldGroup<VesselIdentity>;

  fn vessel_dimensions(&self) -> FieldGroup<VesselData>;

  fn voyage(&self) -> FieldGroup<VoyageData>;

  fn navigation(&self) -> FieldGroup<NavigationData>;

  fn position(&self) -> FieldGroup<Position>;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn option_conversion() {
    assert_eq!(FieldGroup::from(Some(3)), FieldGroup::Applicable(3));
    assert_eq!(FieldGroup::<i32>::from(None), FieldGroup::NotApplicable);
    assert!(!FieldGroup::<()>::NotApplicable.is_applicable());
  }
}
