//! Routing raw events through a catalog built from a contract listing.

use soroban_event_decoder::{
	models::{ContractListing, NativeValue, RawEventRecord, RpcEvent},
	services::decoder::{CatalogError, EventCatalog, EventDecodeError},
};
use stellar_xdr::curr::ScVal;

use crate::integration::common::{
	create_test_spec, default_event_record, read_fixture, symbol, DEFAULT_EVENT_BIGNUM,
};

fn create_test_catalog() -> EventCatalog {
	EventCatalog::from_listing(&ContractListing::from(create_test_spec()))
}

fn rpc_records(fixture: &str) -> Vec<RawEventRecord> {
	let events: Vec<RpcEvent> = serde_json::from_str(&read_fixture(fixture)).unwrap();
	events
		.iter()
		.map(|event| RawEventRecord::try_from(event).unwrap())
		.collect()
}

#[test]
fn test_catalog_from_listing() {
	let catalog = create_test_catalog();
	assert_eq!(catalog.len(), 2);
	assert!(catalog.get("DefaultEvent").is_some());
	assert!(catalog.get("Counter").is_some());
	assert!(catalog.get("emit").is_none());
}

#[test]
fn test_catalog_routes_by_prefix() {
	let catalog = create_test_catalog();

	let event = catalog.decode(&default_event_record()).unwrap();
	assert_eq!(event.name(), "DefaultEvent");
	assert_eq!(
		event.get("bignum").unwrap(),
		&NativeValue::BigInt(DEFAULT_EVENT_BIGNUM.to_string())
	);

	let counter = RawEventRecord::new(vec![symbol("counter")], ScVal::U64(42));
	let event = catalog.decode(&counter).unwrap();
	assert_eq!(event.name(), "Counter");
	assert_eq!(event.get("value").unwrap(), &NativeValue::BigInt("42".to_string()));
}

#[test]
fn test_catalog_rejects_unknown_prefix() {
	let records = rpc_records("mixed_events_rpc.json");
	assert_eq!(records.len(), 2);

	let catalog = create_test_catalog();
	assert!(catalog.decode(&records[0]).is_ok());
	assert_eq!(
		catalog.decode(&records[1]).unwrap_err(),
		CatalogError::NoMatchingEvent {
			topic_count: 3,
			first_topic: "other_event".to_string(),
		}
	);
}

#[test]
fn test_catalog_decode_as_reports_stage_error() {
	let catalog = create_test_catalog();
	let err = catalog
		.decode_as("Counter", &default_event_record())
		.unwrap_err();
	assert_eq!(
		err,
		CatalogError::Decode {
			event: "Counter".to_string(),
			source: EventDecodeError::PrefixMismatch {
				index: 0,
				expected: "counter".to_string(),
				found: "default_event".to_string(),
			},
		}
	);
}

#[test]
fn test_catalog_decodes_rpc_fixture() {
	let catalog = create_test_catalog();
	for record in rpc_records("default_event_rpc.json") {
		let event = catalog.decode(&record).unwrap();
		assert_eq!(event.name(), "DefaultEvent");
		assert_eq!(event.get("num").unwrap(), &NativeValue::Number(2));
	}
}
