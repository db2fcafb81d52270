//! Integration tests for `SqliteConnection` against an in-memory database.

use ais_core::{
  connection::Connection,
  geo::Point,
  record::{
    GeospatialData, MessageData, MessageKeys, Mmsi, NavigationData, Record,
    Table, VesselData, VesselSignature, VoyageData,
  },
};
use chrono::{TimeZone, Utc};

use crate::SqliteConnection;

async fn store() -> SqliteConnection {
  SqliteConnection::open_in_memory()
    .await
    .expect("in-memory store")
}

fn mmsi() -> Mmsi { Mmsi::new(123_456_789).unwrap() }

fn full_signature() -> VesselSignature {
  VesselSignature {
    mmsi:           mmsi(),
    imo:            Some(9_074_729),
    call_sign:      Some("WDC1234".into()),
    name:           Some("O'HARA TIDE".into()),
    vessel_type_id: Some(70),
  }
}

fn hull() -> VesselData {
  VesselData { to_bow: 120, to_stern: 30, to_port: 10, to_starboard: 12 }
}

// ─── Inserts and read-back ───────────────────────────────────────────────────

#[tokio::test]
async fn insert_returns_key_and_row_reads_back() {
  let mut s = store().await;

  let key = s
    .insert_one_record(Record::VesselSignature(full_signature()))
    .await
    .unwrap()
    .expect("generated key");

  let row = s.vessel_signature(key).await.unwrap().unwrap();
  assert_eq!(row, full_signature());
}

#[tokio::test]
async fn voyage_without_eta_is_stored_as_null() {
  let mut s = store().await;
  let voyage = VoyageData {
    draught:     7.5,
    eta:         None,
    destination: "SEATTLE".into(),
  };

  let key = s
    .insert_one_record(Record::VoyageData(voyage.clone()))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(s.voyage_data(key).await.unwrap(), Some(voyage));
}

#[tokio::test]
async fn navigation_and_geospatial_roundtrip() {
  let mut s = store().await;
  let nav = NavigationData {
    speed_over_ground:     12.5,
    course_over_ground:    271.25,
    heading:               270.0,
    rate_of_turn:          -2.0,
    nav_status_id:         0,
    maneuver_indicator_id: 1,
  };
  let geo = GeospatialData {
    coord:    Point::from_lat_lon(48.125, -122.75).unwrap(),
    accuracy: true,
  };

  let nav_key = s
    .insert_one_record(Record::NavigationData(nav))
    .await
    .unwrap()
    .unwrap();
  let geo_key = s
    .insert_one_record(Record::GeospatialData(geo))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(s.navigation_data(nav_key).await.unwrap(), Some(nav));
  assert_eq!(s.geospatial_data(geo_key).await.unwrap(), Some(geo));
}

#[tokio::test]
async fn message_data_with_null_keys() {
  let mut s = store().await;
  let sig_key = s
    .insert_one_record(Record::VesselSignature(VesselSignature::mmsi_only(mmsi())))
    .await
    .unwrap();

  let msg = MessageData {
    time_received:   Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    is_valid_msg:    true,
    is_multi_part:   false,
    raw_nmea:        "!AIVDM,1,1,,A,15M67FC000G?ufbE`FepT@3n00Sa,0*5C".into(),
    message_type_id: 1,
    keys:            MessageKeys {
      vessel_signature_id: sig_key,
      ..MessageKeys::default()
    },
  };

  let key = s
    .insert_one_record(Record::MessageData(msg.clone()))
    .await
    .unwrap()
    .unwrap();

  assert_eq!(s.message_data(key).await.unwrap(), Some(msg));
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn full_signature_lookup_is_null_safe() {
  let mut s = store().await;
  let partial = VesselSignature {
    imo: None,
    vessel_type_id: None,
    ..full_signature()
  };

  assert_eq!(s.find_vessel_signature(&partial).await.unwrap(), None);

  let key = s
    .insert_one_record(Record::VesselSignature(partial.clone()))
    .await
    .unwrap();

  assert_eq!(s.find_vessel_signature(&partial).await.unwrap(), key);
  assert_eq!(s.find_vessel_signature(&full_signature()).await.unwrap(), None);
}

#[tokio::test]
async fn mmsi_lookup_matches_any_signature_for_the_station() {
  let mut s = store().await;
  assert_eq!(s.find_vessel_signature_by_mmsi(mmsi()).await.unwrap(), None);

  let key = s
    .insert_one_record(Record::VesselSignature(full_signature()))
    .await
    .unwrap();

  assert_eq!(s.find_vessel_signature_by_mmsi(mmsi()).await.unwrap(), key);
  let other = Mmsi::new(987_654_321).unwrap();
  assert_eq!(s.find_vessel_signature_by_mmsi(other).await.unwrap(), None);
}

#[tokio::test]
async fn vessel_data_lookup_matches_exact_tuple() {
  let mut s = store().await;
  let key = s
    .insert_one_record(Record::VesselData(hull()))
    .await
    .unwrap();

  assert_eq!(s.find_vessel_data(&hull()).await.unwrap(), key);
  let wider = VesselData { to_starboard: 13, ..hull() };
  assert_eq!(s.find_vessel_data(&wider).await.unwrap(), None);
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn rollback_discards_writes() {
  let mut s = store().await;

  s.begin_transaction().await.unwrap();
  s.insert_one_record(Record::VesselData(hull())).await.unwrap();
  s.roll_back_transaction().await.unwrap();

  assert_eq!(s.count_rows(Table::VesselData).await.unwrap(), 0);
}

#[tokio::test]
async fn commit_persists_writes() {
  let mut s = store().await;

  s.begin_transaction().await.unwrap();
  s.insert_one_record(Record::VesselData(hull())).await.unwrap();
  s.commit_transaction().await.unwrap();

  assert_eq!(s.count_rows(Table::VesselData).await.unwrap(), 1);
}

#[tokio::test]
async fn message_data_rejects_dangling_keys() {
  let mut s = store().await;
  let msg = MessageData {
    time_received:   Utc::now(),
    is_valid_msg:    true,
    is_multi_part:   false,
    raw_nmea:        String::new(),
    message_type_id: 5,
    keys:            MessageKeys {
      voyage_data_id: Some(ais_core::record::RowId(42)),
      ..MessageKeys::default()
    },
  };

  let err = s.insert_one_record(Record::MessageData(msg)).await;
  assert!(matches!(err, Err(crate::Error::Database(_))));
}

// ─── Reconnect ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn closed_handle_is_reported_then_reopened() {
  let mut s = store().await;
  s.close().await.unwrap();
  assert!(!s.is_connected());

  let err = s.begin_transaction().await.unwrap_err();
  assert!(matches!(err, crate::Error::NotConnected));

  s.connect_if_dropped().await.unwrap();
  assert!(s.is_connected());

  // The reopened handle has the schema and no transaction in flight.
  s.begin_transaction().await.unwrap();
  s.insert_one_record(Record::VesselData(hull())).await.unwrap();
  s.commit_transaction().await.unwrap();
  assert_eq!(s.count_rows(Table::VesselData).await.unwrap(), 1);
}

#[tokio::test]
async fn connect_if_dropped_is_a_no_op_on_a_live_handle() {
  let mut s = store().await;
  s.insert_one_record(Record::VesselData(hull())).await.unwrap();

  s.connect_if_dropped().await.unwrap();

  // Same in-memory database: the row is still there.
  assert_eq!(s.count_rows(Table::VesselData).await.unwrap(), 1);
}
