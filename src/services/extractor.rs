//! Extraction of event descriptors from a contract interface listing.
//!
//! Only entries tagged as event definitions are kept. Nothing is validated
//! here: a descriptor that cannot match any real event only shows up as a
//! failure when a record is decoded with it.

use stellar_xdr::curr::{
	ScSpecEntry, ScSpecEventDataFormat, ScSpecEventParamLocationV0, ScSpecEventParamV0,
	ScSpecEventV0,
};

use crate::models::{EventDescriptor, EventField, FieldLocation, PayloadShape, WireType};

/// Returns one descriptor per event entry, in listing order.
pub fn extract_events(entries: &[ScSpecEntry]) -> Vec<EventDescriptor> {
	entries
		.iter()
		.filter_map(|entry| match entry {
			ScSpecEntry::EventV0(event) => Some(EventDescriptor::from(event)),
			_ => None,
		})
		.collect()
}

impl From<&ScSpecEventV0> for EventDescriptor {
	fn from(event: &ScSpecEventV0) -> Self {
		EventDescriptor {
			name: event.name.to_string(),
			prefix_topics: event.prefix_topics.iter().map(|t| t.to_string()).collect(),
			fields: event.params.iter().map(EventField::from).collect(),
			payload_shape: PayloadShape::from(&event.data_format),
		}
	}
}

impl From<&ScSpecEventParamV0> for EventField {
	fn from(param: &ScSpecEventParamV0) -> Self {
		let doc = param.doc.to_string();
		EventField {
			name: param.name.to_string(),
			type_: WireType::from(&param.type_),
			location: FieldLocation::from(&param.location),
			doc: (!doc.is_empty()).then_some(doc),
		}
	}
}

impl From<&ScSpecEventParamLocationV0> for FieldLocation {
	fn from(location: &ScSpecEventParamLocationV0) -> Self {
		match location {
			ScSpecEventParamLocationV0::TopicList => FieldLocation::TopicList,
			ScSpecEventParamLocationV0::Data => FieldLocation::Payload,
		}
	}
}

impl From<&ScSpecEventDataFormat> for PayloadShape {
	fn from(format: &ScSpecEventDataFormat) -> Self {
		match format {
			ScSpecEventDataFormat::Map => PayloadShape::Map,
			ScSpecEventDataFormat::Vec => PayloadShape::Vector,
			ScSpecEventDataFormat::SingleValue => PayloadShape::SingleValue,
		}
	}
}
