//! Transactional insertion pipeline for decoded AIS messages.
//!
//! [`MessageInserter::write_message`] takes one [`MessageAccessor`] and one
//! [`Connection`], and writes the message into the star schema inside a
//! single transaction: the deduplicated dimensions first (`vessel_data`,
//! `vessel_signature`), then the per-message attributes (`voyage_data`,
//! `navigation_data`, `geospatial_data`), and finally the `message_data` fact
//! row that references them.
//!
//! [`MessageAccessor`]: ais_core::message::MessageAccessor
//! [`Connection`]: ais_core::connection::Connection

mod attribute;
mod dimension;
mod fact;
mod inserter;

pub mod error;
pub mod outcome;

pub use error::{Error, Result};
pub use inserter::{InserterOptions, MessageInserter, UnresolvedSignature};
pub use outcome::{WriteOutcome, WrittenMessage};
