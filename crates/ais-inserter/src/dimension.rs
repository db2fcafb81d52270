//! Deduplicated dimensions: `vessel_data` and `vessel_signature`.
//!
//! Both follow dedup-or-insert: look the value tuple up, adopt an existing key
//! if one is found, otherwise insert and capture the generated key. Lookups
//! run on every message; nothing is cached between messages.

use ais_core::{
  connection::Connection,
  message::{FieldGroup, MessageAccessor},
  record::{Record, RowId, VesselSignature},
};

use crate::{inserter::insert_one, Error, Result, WriteOutcome};

pub(crate) async fn write_vessel_data<A, C>(
  message: &A,
  conn:    &mut C,
) -> Result<WriteOutcome>
where
  A: MessageAccessor + ?Sized,
  C: Connection,
{
  let FieldGroup::Applicable(hull) = message.vessel_dimensions() else {
    return Ok(WriteOutcome::Unsupported);
  };

  let existing = conn
    .find_vessel_data(&hull)
    .await
    .map_err(Error::connection)?;

  resolve_or_insert(conn, existing, Record::VesselData(hull)).await
}

/// Resolve the vessel signature.
///
/// With the identity group present, dedup runs on the full tuple. Without it,
/// the message only identifies its station: dedup runs on the MMSI alone and a
/// new row carries NULL in every other column.
pub(crate) async fn write_vessel_signature<A, C>(
  message: &A,
  conn:    &mut C,
) -> Result<WriteOutcome>
where
  A: MessageAccessor + ?Sized,
  C: Connection,
{
  let FieldGroup::Applicable(mmsi) = message.mmsi() else {
    return Ok(WriteOutcome::Unsupported);
  };

  let (signature, existing) = match message.vessel_identity() {
    FieldGroup::Applicable(identity) => {
      let signature = VesselSignature::new(mmsi, identity);
      let existing = conn
        .find_vessel_signature(&signature)
        .await
        .map_err(Error::connection)?;
      (signature, existing)
    }
    FieldGroup::NotApplicable => {
      let existing = conn
        .find_vessel_signature_by_mmsi(mmsi)
        .await
        .map_err(Error::connection)?;
      (VesselSignature::mmsi_only(mmsi), existing)
    }
  };

  resolve_or_insert(conn, existing, Record::VesselSignature(signature)).await
}

async fn resolve_or_insert<C: Connection>(
  conn:     &mut C,
  existing: Option<RowId>,
  record:   Record,
) -> Result<WriteOutcome> {
  match existing {
    Some(id) => Ok(WriteOutcome::Reused(id)),
    None => Ok(WriteOutcome::Inserted(insert_one(conn, record).await?)),
  }
}
