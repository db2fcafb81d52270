//! Core types and trait definitions for the AIS message store.
//!
//! This crate is deliberately free of database and network dependencies.
//! It names the records written per message, the accessor a decoder hands
//! over, and the connection seam the insertion pipeline writes through.

pub mod connection;
pub mod error;
pub mod geo;
pub mod message;
pub mod record;

pub use error::{Error, Result};
