//! [`RelaySession`]: a TCP connection to the decoded-report relay.

use std::io;

use ais_core::connection::Connection;
use tokio::net::TcpStream;
use tokio_util::sync::CancellationToken;

use crate::{ingest::Ingestor, reconnect::Session};

pub struct RelaySession<C> {
  address:  String,
  ingestor: Ingestor<C>,
}

impl<C: Connection> RelaySession<C> {
  pub fn new(address: impl Into<String>, ingestor: Ingestor<C>) -> Self {
    Self { address: address.into(), ingestor }
  }

  pub fn ingestor(&self) -> &Ingestor<C> { &self.ingestor }
}

impl<C: Connection> Session for RelaySession<C> {
  async fn run(&mut self, cancel: &CancellationToken) -> io::Result<()> {
    let stream = tokio::select! {
      _ = cancel.cancelled() => return Ok(()),
      stream = TcpStream::connect(&self.address) => stream?,
    };
    tracing::info!(address = %self.address, "connected to relay");
    self.ingestor.consume(stream, cancel).await
  }
}
