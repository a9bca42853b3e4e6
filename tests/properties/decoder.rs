//! Property-based tests for the event decoder state machine.

use proptest::{prelude::*, test_runner::Config};
use soroban_event_decoder::{
	models::{FieldLocation, PayloadShape},
	services::decoder::{EventDecodeError, EventDecoder},
};
use stellar_xdr::curr::ScVal;

use crate::properties::strategies::{matching_event_strategy, symbol};

proptest! {
	#![proptest_config(Config {
		cases: 256, .. Config::default()
	})]

	#[test]
	fn test_matching_records_decode((descriptor, record) in matching_event_strategy()) {
		let decoder = EventDecoder::new(descriptor.clone());
		let event = decoder.decode(&record).unwrap();

		for field in &descriptor.fields {
			prop_assert!(event.get(&field.name).is_ok(), "field {} failed", field.name);
		}
		let names: Vec<&str> = event.field_names().collect();
		let declared: Vec<&str> = descriptor.fields.iter().map(|f| f.name.as_str()).collect();
		prop_assert_eq!(names, declared);
	}

	#[test]
	fn test_decode_is_deterministic((descriptor, record) in matching_event_strategy()) {
		let decoder = EventDecoder::new(descriptor);
		let first = decoder.decode(&record).unwrap().to_json().unwrap();
		let second = decoder.decode(&record).unwrap().to_json().unwrap();
		prop_assert_eq!(first, second);
	}

	#[test]
	fn test_missing_topic_is_rejected((descriptor, mut record) in matching_event_strategy()) {
		prop_assume!(!record.topics.is_empty());
		let expected = descriptor.expected_topic_count();
		record.topics.truncate(expected.saturating_sub(1));

		let decoder = EventDecoder::new(descriptor);
		prop_assert_eq!(
			decoder.decode(&record).unwrap_err(),
			EventDecodeError::TooFewTopics {
				found: expected - 1,
				expected,
			}
		);
	}

	#[test]
	fn test_wrong_prefix_is_rejected((descriptor, mut record) in matching_event_strategy()) {
		prop_assume!(!descriptor.prefix_topics.is_empty());
		// Prefix literals never contain uppercase letters.
		record.topics[0] = symbol("Unexpected");

		let decoder = EventDecoder::new(descriptor.clone());
		prop_assert_eq!(
			decoder.decode(&record).unwrap_err(),
			EventDecodeError::PrefixMismatch {
				index: 0,
				expected: descriptor.prefix_topics[0].clone(),
				found: "Unexpected".to_string(),
			}
		);
	}

	#[test]
	fn test_empty_payload_reports_every_payload_field((descriptor, mut record) in matching_event_strategy()) {
		prop_assume!(descriptor.payload_shape != PayloadShape::SingleValue);
		let payload_names: Vec<String> = descriptor
			.fields
			.iter()
			.filter(|f| f.location == FieldLocation::Payload)
			.map(|f| f.name.clone())
			.collect();
		prop_assume!(!payload_names.is_empty());

		record.payload = match descriptor.payload_shape {
			PayloadShape::Map => ScVal::Map(None),
			_ => ScVal::Vec(None),
		};
		let decoder = EventDecoder::new(descriptor);
		match decoder.decode(&record).unwrap_err() {
			EventDecodeError::MissingPayloadFields { names, .. } => prop_assert_eq!(names, payload_names),
			other => prop_assert!(false, "unexpected error {:?}", other),
		}
	}
}
