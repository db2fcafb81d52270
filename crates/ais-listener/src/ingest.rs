//! The ingestion loop: one line in, one transaction out.

use std::io;

use ais_core::connection::Connection;
use ais_inserter::MessageInserter;
use futures::StreamExt as _;
use tokio::io::AsyncRead;
use tokio_util::{codec::FramedRead, sync::CancellationToken};

use crate::{
  frame::{RelayLine, RelayLineCodec},
  report::DecodedReport,
};

/// Running totals for one listener process.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
  /// Non-blank lines read from the relay.
  pub received:  u64,
  pub written:   u64,
  /// Messages whose transaction failed and was rolled back.
  pub dropped:   u64,
  /// Lines that were over-long, not UTF-8, or not a decoded report.
  pub malformed: u64,
}

/// Owns the database connection and feeds it one message at a time.
pub struct Ingestor<C> {
  inserter: MessageInserter,
  conn:     C,
  stats:    IngestStats,
}

impl<C: Connection> Ingestor<C> {
  pub fn new(inserter: MessageInserter, conn: C) -> Self {
    Self { inserter, conn, stats: IngestStats::default() }
  }

  pub fn stats(&self) -> IngestStats { self.stats }

  pub fn connection_mut(&mut self) -> &mut C { &mut self.conn }

  /// Parse and write a single line. Failures are logged and counted; they
  /// never stop the loop.
  pub async fn ingest_line(&mut self, line: &str) {
    let line = line.trim();
    if line.is_empty() {
      return;
    }
    self.stats.received += 1;

    let report = match DecodedReport::parse(line) {
      Ok(report) => report,
      Err(err) => {
        self.stats.malformed += 1;
        tracing::warn!(error = %err, "skipping malformed report");
        return;
      }
    };

    match self.inserter.write_message(&report, &mut self.conn).await {
      Ok(written) => {
        self.stats.written += 1;
        tracing::debug!(
          message_data_id = %written.message_data_id,
          message_type = report.message_type_id,
          "message written"
        );
      }
      Err(err) => {
        self.stats.dropped += 1;
        tracing::error!(
          error = %err,
          message_type = report.message_type_id,
          raw_nmea = %report.raw_nmea,
          "message dropped"
        );
      }
    }
  }

  fn skip_line(&mut self, reason: &'static str) {
    self.stats.received += 1;
    self.stats.malformed += 1;
    tracing::warn!(reason, "skipping unreadable line");
  }

  /// Read lines from `reader` until end of stream or cancellation.
  ///
  /// Cancellation is observed between messages, never in the middle of a
  /// message's transaction. Unreadable lines are counted and skipped; only a
  /// transport error ends the stream early.
  pub async fn consume<R>(
    &mut self,
    reader: R,
    cancel: &CancellationToken,
  ) -> io::Result<()>
  where
    R: AsyncRead + Unpin,
  {
    let mut frames = FramedRead::new(reader, RelayLineCodec::default());
    loop {
      let frame = tokio::select! {
        biased;
        _ = cancel.cancelled() => return Ok(()),
        frame = frames.next() => frame,
      };
      match frame.transpose()? {
        Some(RelayLine::Text(line)) => self.ingest_line(&line).await,
        Some(RelayLine::InvalidUtf8) => self.skip_line("invalid utf-8"),
        Some(RelayLine::TooLong) => self.skip_line("line too long"),
        None => return Ok(()),
      }
    }
  }
}
