//! Newline framing for the relay stream.
//!
//! Unlike `LinesCodec`, content problems are frames, not errors: a line that
//! is not UTF-8 or exceeds the length cap is reported and skipped, and the
//! stream carries on with the next line. Only transport errors end a session.

use std::io;

use bytes::{Buf as _, BytesMut};
use tokio_util::codec::Decoder;

/// Longest accepted line, excluding the terminator. Decoded reports are a
/// few hundred bytes; anything near this is not a report.
pub const MAX_LINE_LENGTH: usize = 64 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayLine {
  Text(String),
  /// The line was not valid UTF-8 and was discarded.
  InvalidUtf8,
  /// The line exceeded the length cap and was discarded.
  TooLong,
}

#[derive(Debug)]
pub struct RelayLineCodec {
  max_length: usize,
  /// Bytes of the buffer already searched for a newline.
  next_index: usize,
  /// Dropping the rest of an over-long line.
  discarding: bool,
}

impl RelayLineCodec {
  pub fn new(max_length: usize) -> Self {
    Self { max_length, next_index: 0, discarding: false }
  }
}

impl Default for RelayLineCodec {
  fn default() -> Self { Self::new(MAX_LINE_LENGTH) }
}

fn decode_line(bytes: &[u8]) -> RelayLine {
  let bytes = bytes.strip_suffix(b"\r").unwrap_or(bytes);
  match std::str::from_utf8(bytes) {
    Ok(line) => RelayLine::Text(line.to_owned()),
    Err(_) => RelayLine::InvalidUtf8,
  }
}

impl Decoder for RelayLineCodec {
  type Item = RelayLine;
  type Error = io::Error;

  fn decode(&mut self, buf: &mut BytesMut) -> io::Result<Option<RelayLine>> {
    let newline = buf[self.next_index..]
      .iter()
      .position(|b| *b == b'\n')
      .map(|offset| self.next_index + offset);

    match newline {
      Some(at) => {
        let line = buf.split_to(at + 1);
        self.next_index = 0;
        if std::mem::take(&mut self.discarding) || at > self.max_length {
          return Ok(Some(RelayLine::TooLong));
        }
        Ok(Some(decode_line(&line[..at])))
      }
      None if self.discarding || buf.len() > self.max_length => {
        // Keep only the fact that we are inside an over-long line.
        buf.advance(buf.len());
        self.next_index = 0;
        self.discarding = true;
        Ok(None)
      }
      None => {
        self.next_index = buf.len();
        Ok(None)
      }
    }
  }

  fn decode_eof(&mut self, buf: &mut BytesMut) -> io::Result<Option<RelayLine>> {
    if let Some(frame) = self.decode(buf)? {
      return Ok(Some(frame));
    }
    self.next_index = 0;
    if std::mem::take(&mut self.discarding) {
      buf.clear();
      return Ok(Some(RelayLine::TooLong));
    }
    if buf.is_empty() {
      return Ok(None);
    }
    let line = buf.split();
    Ok(Some(decode_line(&line)))
  }
}
