//! Relay listener: reads decoded AIS reports from a TCP relay and writes each
//! one through [`ais_inserter::MessageInserter`].
//!
//! The relay connection is owned by a [`relay::RelaySession`] and kept alive
//! by a [`reconnect::ReconnectPolicy`]; messages are handed to the pipeline one
//! at a time by an [`ingest::Ingestor`].

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
#![allow(async_fn_in_trait)]

pub mod config;
pub mod frame;
pub mod ingest;
pub mod reconnect;
pub mod relay;
pub mod report;

pub use config::ListenerConfig;
