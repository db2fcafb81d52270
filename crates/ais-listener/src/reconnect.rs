//! Fixed-delay reconnect policy for the relay stream.

use std::{io, time::Duration};

use tokio_util::sync::CancellationToken;

pub const DEFAULT_RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// One connected run of a stream: connect, read until the stream ends or
/// fails, return.
pub trait Session {
  async fn run(&mut self, cancel: &CancellationToken) -> io::Result<()>;
}

/// Retries a [`Session`] indefinitely, sleeping a fixed delay between
/// attempts, until the token is cancelled.
#[derive(Debug, Clone, Copy)]
pub struct ReconnectPolicy {
  pub delay: Duration,
}

impl Default for ReconnectPolicy {
  fn default() -> Self { Self { delay: DEFAULT_RECONNECT_DELAY } }
}

impl ReconnectPolicy {
  pub fn new(delay: Duration) -> Self { Self { delay } }

  /// Run `session` until `cancel` fires. Returns the number of attempts made.
  pub async fn run<S: Session>(&self, session: &mut S, cancel: &CancellationToken) -> u64 {
    let mut attempts = 0;
    while !cancel.is_cancelled() {
      attempts += 1;
      match session.run(cancel).await {
        Ok(()) if cancel.is_cancelled() => break,
        Ok(()) => tracing::warn!(delay = ?self.delay, "relay stream ended; reconnecting"),
        Err(err) => tracing::error!(
          error = %err,
          delay = ?self.delay,
          "relay stream failed; reconnecting"
        ),
      }

      tokio::select! {
        _ = cancel.cancelled() => break,
        _ = tokio::time::sleep(self.delay) => {}
      }
    }
    attempts
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  /// Fails `failures` times, then cancels the token on the next attempt.
  struct Flaky {
    failures: u64,
    calls:    u64,
    cancel:   CancellationToken,
  }

  impl Session for Flaky {
    async fn run(&mut self, _cancel: &CancellationToken) -> io::Result<()> {
      self.calls += 1;
      if self.calls > self.failures {
        self.cancel.cancel();
        return Ok(());
      }
      Err(io::Error::new(io::ErrorKind::ConnectionRefused, "relay down"))
    }
  }

  #[tokio::test]
  async fn retries_until_cancelled() {
    let cancel = CancellationToken::new();
    let mut session = Flaky { failures: 3, calls: 0, cancel: cancel.clone() };

    let attempts = ReconnectPolicy::new(Duration::from_millis(1))
      .run(&mut session, &cancel)
      .await;

    assert_eq!(attempts, 4);
    assert_eq!(session.calls, 4);
  }

  #[tokio::test]
  async fn cancellation_interrupts_the_backoff() {
    let cancel = CancellationToken::new();
    let mut session = Flaky { failures: u64::MAX, calls: 0, cancel: cancel.clone() };
    let policy = ReconnectPolicy::new(Duration::from_secs(3600));

    let trigger = cancel.clone();
    tokio::spawn(async move {
      tokio::time::sleep(Duration::from_millis(20)).await;
      trigger.cancel();
    });

    let attempts = tokio::time::timeout(
      Duration::from_secs(5),
      policy.run(&mut session, &cancel),
    )
    .await
    .expect("policy should stop promptly");
    assert_eq!(attempts, 1);
  }

  #[tokio::test]
  async fn already_cancelled_makes_no_attempt() {
    let cancel = CancellationToken::new();
    cancel.cancel();
    let mut session = Flaky { failures: 0, calls: 0, cancel: cancel.clone() };

    let attempts = ReconnectPolicy::default().run(&mut session, &cancel).await;

    assert_eq!(attempts, 0);
    assert_eq!(session.calls, 0);
  }
}
