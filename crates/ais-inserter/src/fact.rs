//! The `message_data` fact row, written last.

use ais_core::{
  connection::Connection,
  message::MessageAccessor,
  record::{MessageData, MessageKeys, Record, RowId},
};

use crate::{inserter::insert_one, Error, Result, UnresolvedSignature};

pub(crate) async fn write_message_data<A, C>(
  message:              &A,
  keys:                 MessageKeys,
  unresolved_signature: UnresolvedSignature,
  conn:                 &mut C,
) -> Result<RowId>
where
  A: MessageAccessor + ?Sized,
  C: Connection,
{
  if keys.vessel_signature_id.is_none() {
    match unresolved_signature {
      UnresolvedSignature::Warn => tracing::warn!(
        message_type = message.message_type_id(),
        "writing message_data without a vessel_signature key"
      ),
      UnresolvedSignature::Abort => return Err(Error::UnresolvedVesselSignature),
    }
  }

  let row = MessageData {
    time_received:   message.time_received(),
    is_valid_msg:    message.is_valid(),
    is_multi_part:   message.is_multi_part(),
    raw_nmea:        message.raw_nmea().to_owned(),
    message_type_id: message.message_type_id(),
    keys,
  };

  insert_one(conn, Record::MessageData(row)).await
}
