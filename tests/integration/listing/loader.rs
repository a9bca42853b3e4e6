//! Loading contract listings from disk in every supported format.

use soroban_event_decoder::{
	models::ContractListing,
	services::{
		decoder::EventCatalog,
		extractor::extract_events,
		listing::{load_listing_from_file, ListingError, ListingFormat},
	},
};
use std::fs;
use tempfile::tempdir;

use crate::integration::common::{create_test_spec, default_event_record, write_spec_files};

#[test]
fn test_every_format_yields_the_same_listing() {
	let dir = tempdir().unwrap();
	let expected = ContractListing::from(create_test_spec());

	for path in write_spec_files(dir.path()) {
		let listing = load_listing_from_file(&path)
			.unwrap_or_else(|e| panic!("Failed to load {}: {}", path.display(), e));
		assert_eq!(listing, expected, "listing mismatch for {}", path.display());
		assert_eq!(listing.event_count(), 2);
	}
}

#[test]
fn test_extraction_from_loaded_listing() {
	let dir = tempdir().unwrap();
	let paths = write_spec_files(dir.path());
	let listing = load_listing_from_file(&paths[0]).unwrap();

	let events = extract_events(listing.entries());
	let names: Vec<_> = events.iter().map(|e| e.name.as_str()).collect();
	assert_eq!(names, vec!["DefaultEvent", "Counter"]);
	assert_eq!(events[0].expected_topic_count(), 3);

	let catalog = EventCatalog::from_listing(&listing);
	assert_eq!(catalog.decode(&default_event_record()).unwrap().name(), "DefaultEvent");
}

#[test]
fn test_format_detection_on_files() {
	let dir = tempdir().unwrap();
	let paths = write_spec_files(dir.path());
	let formats: Vec<_> = paths
		.iter()
		.map(|p| ListingFormat::detect(&fs::read(p).unwrap()))
		.collect();
	assert_eq!(
		formats,
		vec![ListingFormat::Wasm, ListingFormat::Json, ListingFormat::Base64]
	);
}

#[test]
fn test_invalid_listing_files() {
	let dir = tempdir().unwrap();

	let garbage = dir.path().join("garbage.txt");
	fs::write(&garbage, "this is not a spec").unwrap();
	assert!(matches!(
		load_listing_from_file(&garbage),
		Err(ListingError::ParseError(_))
	));

	let missing = dir.path().join("missing.wasm");
	assert!(matches!(
		load_listing_from_file(&missing),
		Err(ListingError::FileError(_))
	));
}
