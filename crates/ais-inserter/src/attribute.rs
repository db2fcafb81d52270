//! Per-message attributes: `voyage_data`, `navigation_data` and
//! `geospatial_data`. Never deduplicated; every message carrying the group
//! gets a fresh row.

use ais_core::{
  connection::Connection,
  geo::Point,
  message::{FieldGroup, MessageAccessor},
  record::{GeospatialData, Record},
};

use crate::{inserter::insert_one, Error, Result, WriteOutcome};

pub(crate) async fn write_voyage_data<A, C>(
  message: &A,
  conn:    &mut C,
) -> Result<WriteOutcome>
where
  A: MessageAccessor + ?Sized,
  C: Connection,
{
  match message.voyage() {
    FieldGroup::Applicable(voyage) => {
      insert(conn, Record::VoyageData(voyage)).await
    }
    FieldGroup::NotApplicable => Ok(WriteOutcome::Unsupported),
  }
}

pub(crate) async fn write_navigation_data<A, C>(
  message: &A,
  conn:    &mut C,
) -> Result<WriteOutcome>
where
  A: MessageAccessor + ?Sized,
  C: Connection,
{
  match message.navigation() {
    FieldGroup::Applicable(nav) => insert(conn, Record::NavigationData(nav)).await,
    FieldGroup::NotApplicable => Ok(WriteOutcome::Unsupported),
  }
}

pub(crate) async fn write_geospatial_data<A, C>(
  message: &A,
  conn:    &mut C,
) -> Result<WriteOutcome>
where
  A: MessageAccessor + ?Sized,
  C: Connection,
{
  let FieldGroup::Applicable(position) = message.position() else {
    return Ok(WriteOutcome::Unsupported);
  };

  let coord = Point::from_lat_lon(position.latitude, position.longitude)
    .map_err(Error::Coordinate)?;
  let geo = GeospatialData { coord, accuracy: position.accuracy };
  insert(conn, Record::GeospatialData(geo)).await
}

async fn insert<C: Connection>(conn: &mut C, record: Record) -> Result<WriteOutcome> {
  Ok(WriteOutcome::Inserted(insert_one(conn, record).await?))
}
