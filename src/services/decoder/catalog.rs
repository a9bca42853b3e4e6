//! Catalog of event decoders for one contract.

use std::{cmp::Reverse, fmt, sync::Arc};
use tracing::debug;

use crate::{
	models::{ContractListing, EventDescriptor, RawEventRecord},
	services::{
		decoder::{
			sc_val_tag, CatalogError, DecodedEvent, EventDecoder, NativeValueDecoder,
			ValueDecoder,
		},
		extractor::extract_events,
	},
};

/// All events a contract declares, compiled into decoders
#[derive(Clone)]
pub struct EventCatalog {
	decoders: Vec<EventDecoder>,
	value_decoder: Arc<dyn ValueDecoder>,
}

impl Default for EventCatalog {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl fmt::Debug for EventCatalog {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("EventCatalog")
			.field("decoders", &self.decoders)
			.finish()
	}
}

impl EventCatalog {
	pub fn new(descriptors: Vec<EventDescriptor>) -> Self {
		Self::with_value_decoder(descriptors, Arc::new(NativeValueDecoder))
	}

	pub fn with_value_decoder(
		descriptors: Vec<EventDescriptor>,
		value_decoder: Arc<dyn ValueDecoder>,
	) -> Self {
		let decoders = descriptors
			.into_iter()
			.map(|descriptor| EventDecoder::with_value_decoder(descriptor, value_decoder.clone()))
			.collect();
		Self {
			decoders,
			value_decoder,
		}
	}

	/// Builds a catalog from every event entry of a listing.
	pub fn from_listing(listing: &ContractListing) -> Self {
		let catalog = Self::new(extract_events(listing.entries()));
		debug!(
			entries = listing.len(),
			events = catalog.len(),
			"Built event catalog"
		);
		catalog
	}

	pub fn len(&self) -> usize {
		self.decoders.len()
	}

	pub fn is_empty(&self) -> bool {
		self.decoders.is_empty()
	}

	pub fn decoders(&self) -> impl Iterator<Item = &EventDecoder> {
		self.decoders.iter()
	}

	/// Looks a decoder up by event name.
	pub fn get(&self, name: &str) -> Option<&EventDecoder> {
		self.decoders.iter().find(|d| d.name() == name)
	}

	/// Finds the decoder a record belongs to.
	///
	/// Candidates must accept the record's topic count and prefix. The one
	/// with the longest prefix wins; ties go to the earliest declared.
	pub fn find(&self, record: &RawEventRecord) -> Option<&EventDecoder> {
		self.decoders
			.iter()
			.filter(|d| d.matches(record))
			.min_by_key(|d| Reverse(d.descriptor().prefix_topics.len()))
	}

	/// Decodes a record with whichever event it matches.
	pub fn decode(&self, record: &RawEventRecord) -> Result<DecodedEvent, CatalogError> {
		let decoder = self
			.find(record)
			.ok_or_else(|| CatalogError::NoMatchingEvent {
				topic_count: record.topics.len(),
				first_topic: record
					.topics
					.first()
					.map(|t| {
						self.value_decoder
							.decode(t)
							.map(|v| v.to_string())
							.unwrap_or_else(|_| sc_val_tag(t).to_string())
					})
					.unwrap_or_else(|| "none".to_string()),
			})?;
		decoder.decode(record).map_err(|source| CatalogError::Decode {
			event: decoder.name().to_string(),
			source,
		})
	}

	/// Decodes a record as a specific event.
	pub fn decode_as(&self, name: &str, record: &RawEventRecord) -> Result<DecodedEvent, CatalogError> {
		let decoder = self
			.get(name)
			.ok_or_else(|| CatalogError::UnknownEvent(name.to_string()))?;
		decoder.decode(record).map_err(|source| CatalogError::Decode {
			event: name.to_string(),
			source,
		})
	}
}
