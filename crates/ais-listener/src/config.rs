//! Listener configuration, deserialised from `config.toml` and `AIS_*`
//! environment variables.

use std::{
  path::{Path, PathBuf},
  time::Duration,
};

use ais_inserter::{InserterOptions, UnresolvedSignature};
use serde::Deserialize;

use crate::reconnect::ReconnectPolicy;

fn default_relay_host() -> String { "127.0.0.1".into() }

fn default_relay_port() -> u16 { 10110 }

fn default_database_path() -> PathBuf { PathBuf::from("ais.sqlite3") }

fn default_reconnect_delay_secs() -> u64 { 5 }

#[derive(Debug, Clone, Deserialize)]
pub struct ListenerConfig {
  #[serde(default = "default_relay_host")]
  pub relay_host:           String,
  #[serde(default = "default_relay_port")]
  pub relay_port:           u16,
  #[serde(default = "default_database_path")]
  pub database_path:        PathBuf,
  #[serde(default = "default_reconnect_delay_secs")]
  pub reconnect_delay_secs: u64,
  #[serde(default)]
  pub unresolved_signature: UnresolvedSignature,
}

impl ListenerConfig {
  /// Layer the optional TOML file at `path` under `AIS_*` environment
  /// variables.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("AIS").try_parsing(true))
      .build()?
      .try_deserialize()
  }

  pub fn relay_address(&self) -> String {
    format!("{}:{}", self.relay_host, self.relay_port)
  }

  pub fn reconnect_policy(&self) -> ReconnectPolicy {
    ReconnectPolicy::new(Duration::from_secs(self.reconnect_delay_secs))
  }

  pub fn inserter_options(&self) -> InserterOptions {
    InserterOptions { unresolved_signature: self.unresolved_signature }
  }

  /// `database_path` with a leading `~` expanded to the user's home
  /// directory.
  pub fn expanded_database_path(&self) -> PathBuf {
    expand_tilde(&self.database_path)
  }
}

fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn from_toml(toml: &str) -> ListenerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.relay_address(), "127.0.0.1:10110");
    assert_eq!(cfg.database_path, PathBuf::from("ais.sqlite3"));
    assert_eq!(cfg.reconnect_policy().delay, Duration::from_secs(5));
    assert_eq!(cfg.unresolved_signature, UnresolvedSignature::Warn);
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        relay_host = "relay.local"
        relay_port = 2000
        reconnect_delay_secs = 1
        unresolved_signature = "abort"
      "#,
    );
    assert_eq!(cfg.relay_address(), "relay.local:2000");
    assert_eq!(cfg.reconnect_policy().delay, Duration::from_secs(1));
    assert_eq!(
      cfg.inserter_options().unresolved_signature,
      UnresolvedSignature::Abort
    );
  }

  #[test]
  fn missing_file_is_not_an_error() {
    let cfg = ListenerConfig::load(Path::new("/nonexistent/ais-listener.toml"));
    assert!(cfg.is_ok());
  }

  #[test]
  fn absolute_paths_are_left_alone() {
    assert_eq!(
      expand_tilde(Path::new("/var/lib/ais.sqlite3")),
      PathBuf::from("/var/lib/ais.sqlite3")
    );
  }
}
