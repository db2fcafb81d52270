//! Typed results of the individual writes and of a whole message.

use ais_core::record::{MessageKeys, RowId};

/// Result of one dimension or attribute write that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
  /// A new row was inserted.
  Inserted(RowId),
  /// An identical row already existed and its key was adopted.
  Reused(RowId),
  /// The message type does not carry this field group; nothing was written.
  Unsupported,
}

impl WriteOutcome {
  /// The key to reference from `message_data`, or `None` for NULL.
  pub fn key(self) -> Option<RowId> {
    match self {
      Self::Inserted(id) | Self::Reused(id) => Some(id),
      Self::Unsupported => None,
    }
  }
}

/// A committed message: the `message_data` key and the dimension keys it
/// references.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WrittenMessage {
  pub message_data_id: RowId,
  pub keys:            MessageKeys,
}
