//! [`MessageInserter`]: the per-message transaction orchestrator.

use ais_core::{
  connection::Connection,
  message::MessageAccessor,
  record::{MessageKeys, Record, RowId},
};
use serde::Deserialize;

use crate::{
  attribute, dimension, fact, outcome::WrittenMessage, Error, Result,
};

// ─── Options ─────────────────────────────────────────────────────────────────

/// What to do when the fact row is about to be written without a resolved
/// vessel signature (i.e. the message carried no MMSI).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnresolvedSignature {
  /// Log a warning and write `vessel_signature_id` as NULL.
  #[default]
  Warn,
  /// Fail the message and roll its transaction back.
  Abort,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InserterOptions {
  pub unresolved_signature: UnresolvedSignature,
}

// ─── Inserter ────────────────────────────────────────────────────────────────

/// Writes one decoded message per call, all-or-nothing.
///
/// The inserter holds no per-message state: resolved keys live in a
/// [`MessageKeys`] created for each call and returned with the result.
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageInserter {
  options: InserterOptions,
}

impl MessageInserter {
  pub fn new(options: InserterOptions) -> Self { Self { options } }

  /// Write `message` inside one transaction on `conn`.
  ///
  /// On any hard failure the transaction is rolled back and the error
  /// returned; the message is not retried.
  pub async fn write_message<A, C>(
    &self,
    message: &A,
    conn:    &mut C,
  ) -> Result<WrittenMessage>
  where
    A: MessageAccessor + ?Sized,
    C: Connection,
  {
    conn.connect_if_dropped().await.map_err(Error::connection)?;
    conn.begin_transaction().await.map_err(Error::connection)?;

    let result = match self.write_all(message, conn).await {
      Ok(written) => conn
        .commit_transaction()
        .await
        .map(|()| written)
        .map_err(Error::connection),
      Err(err) => Err(err),
    };

    if let Err(err) = &result {
      tracing::debug!(error = %err, "rolling back message transaction");
      if let Err(rollback) = conn.roll_back_transaction().await {
        tracing::warn!(error = %rollback, "rollback failed");
      }
    }
    result
  }

  /// The fixed write order: every key the fact row references is resolved
  /// (or known to be NULL) before the fact row is assembled.
  async fn write_all<A, C>(&self, message: &A, conn: &mut C) -> Result<WrittenMessage>
  where
    A: MessageAccessor + ?Sized,
    C: Connection,
  {
    let vessel_data = dimension::write_vessel_data(message, conn).await?;
    tracing::debug!(?vessel_data, "vessel_data");
    let vessel_signature = dimension::write_vessel_signature(message, conn).await?;
    tracing::debug!(?vessel_signature, "vessel_signature");
    let voyage_data = attribute::write_voyage_data(message, conn).await?;
    tracing::debug!(?voyage_data, "voyage_data");
    let navigation_data = attribute::write_navigation_data(message, conn).await?;
    tracing::debug!(?navigation_data, "navigation_data");
    let geospatial_data = attribute::write_geospatial_data(message, conn).await?;
    tracing::debug!(?geospatial_data, "geospatial_data");

    let keys = MessageKeys {
      vessel_data_id:      vessel_data.key(),
      vessel_signature_id: vessel_signature.key(),
      voyage_data_id:      voyage_data.key(),
      navigation_data_id:  navigation_data.key(),
      geospatial_data_id:  geospatial_data.key(),
    };

    let message_data_id = fact::write_message_data(
      message,
      keys,
      self.options.unresolved_signature,
      conn,
    )
    .await?;

    Ok(WrittenMessage { message_data_id, keys })
  }
}

/// Insert `record`, escalating a missing generated key to a hard failure.
pub(crate) async fn insert_one<C: Connection>(
  conn:   &mut C,
  record: Record,
) -> Result<RowId> {
  let table = record.table();
  conn
    .insert_one_record(record)
    .await
    .map_err(Error::connection)?
    .ok_or(Error::MissingKey { table })
}
