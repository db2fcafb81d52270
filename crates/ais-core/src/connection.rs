//! The `Connection` trait: the seam between the insertion pipeline and the
//! relational store.
//!
//! Implemented by storage backends (e.g. `ais-store-sqlite`). The pipeline
//! (`ais-inserter`) depends on this abstraction, not on any concrete driver.

use std::future::Future;

use crate::record::{Mmsi, Record, RowId, VesselData, VesselSignature};

/// A live handle to the relational store, used by one message at a time.
///
/// Transaction control is explicit: the caller brackets a message's writes
/// with [`begin_transaction`](Self::begin_transaction) and either
/// [`commit_transaction`](Self::commit_transaction) or
/// [`roll_back_transaction`](Self::roll_back_transaction).
pub trait Connection: Send {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Lifecycle ─────────────────────────────────────────────────────────

  /// Re-establish the underlying handle if it was dropped. A reopened handle
  /// never carries an open transaction.
  fn connect_if_dropped(
    &mut self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn begin_transaction(
    &mut self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn commit_transaction(
    &mut self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn roll_back_transaction(
    &mut self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Insert one row and return its generated key, or `None` if the store
  /// produced no key.
  fn insert_one_record(
    &mut self,
    record: Record,
  ) -> impl Future<Output = Result<Option<RowId>, Self::Error>> + Send + '_;

  // ── Dedup lookups ─────────────────────────────────────────────────────

  /// Find a `vessel_signature` row matching every column of `signature`.
  /// Absent optional fields match NULL columns.
  fn find_vessel_signature<'a>(
    &'a mut self,
    signature: &'a VesselSignature,
  ) -> impl Future<Output = Result<Option<RowId>, Self::Error>> + Send + 'a;

  /// Find any `vessel_signature` row for `mmsi`.
  fn find_vessel_signature_by_mmsi(
    &mut self,
    mmsi: Mmsi,
  ) -> impl Future<Output = Result<Option<RowId>, Self::Error>> + Send + '_;

  fn find_vessel_data<'a>(
    &'a mut self,
    hull: &'a VesselData,
  ) -> impl Future<Output = Result<Option<RowId>, Self::Error>> + Send + 'a;
}
