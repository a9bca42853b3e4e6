//! Decoding state machine for a single event.
//!
//! A record moves through four stages, each of which may reject it:
//!
//! 1. topic count: the record has at least as many topics as the prefix plus
//!    the topic fields
//! 2. prefix: each prefix topic decodes to the expected literal
//! 3. payload shape: a `Map` or `Vec` payload is declared with the matching tag
//! 4. field binding: every field is bound to its raw value
//!
//! Nothing but prefix topics and (for maps) payload keys is decoded here.
//! Field values are decoded on access, see [`DecodedEvent`].

use std::{collections::HashMap, sync::Arc};
use stellar_xdr::curr::{ScMapEntry, ScVal};
use tracing::{debug, trace};

use crate::{
	models::{EventDescriptor, FieldLocation, NativeType, NativeValue, PayloadShape, RawEventRecord},
	services::{
		decoder::{
			decoded::FieldLayout, sc_val_tag, DecodedEvent, EventDecodeError, NativeValueDecoder,
			ValueDecoder,
		},
		type_mapper::map_type,
	},
};

/// Decoder compiled from one event descriptor
///
/// Field positions and native types are computed once here. Decoding never
/// mutates the decoder, so one instance can serve any number of threads.
#[derive(Clone)]
pub struct EventDecoder {
	descriptor: EventDescriptor,
	layout: Arc<FieldLayout>,
	topic_slots: Vec<usize>,
	payload_slots: Vec<usize>,
	payload_index: HashMap<String, usize>,
	value_decoder: Arc<dyn ValueDecoder>,
}

impl EventDecoder {
	pub fn new(descriptor: EventDescriptor) -> Self {
		Self::with_value_decoder(descriptor, Arc::new(NativeValueDecoder))
	}

	/// Builds a decoder that turns raw values into native ones with `value_decoder`.
	pub fn with_value_decoder(
		descriptor: EventDescriptor,
		value_decoder: Arc<dyn ValueDecoder>,
	) -> Self {
		let mut index = HashMap::new();
		let mut payload_index = HashMap::new();
		let mut topic_slots = Vec::new();
		let mut payload_slots = Vec::new();

		for (slot, field) in descriptor.fields.iter().enumerate() {
			// A repeated name keeps its first slot; the later ones can never be bound.
			index.entry(field.name.clone()).or_insert(slot);
			match field.location {
				FieldLocation::TopicList => topic_slots.push(slot),
				FieldLocation::Payload => {
					payload_index.entry(field.name.clone()).or_insert(slot);
					payload_slots.push(slot);
				}
			}
		}

		let layout = FieldLayout {
			event: descriptor.name.clone(),
			names: descriptor.fields.iter().map(|f| f.name.clone()).collect(),
			types: descriptor.fields.iter().map(|f| map_type(&f.type_)).collect(),
			index,
		};

		Self {
			descriptor,
			layout: Arc::new(layout),
			topic_slots,
			payload_slots,
			payload_index,
			value_decoder,
		}
	}

	pub fn descriptor(&self) -> &EventDescriptor {
		&self.descriptor
	}

	pub fn name(&self) -> &str {
		&self.descriptor.name
	}

	/// Native type of a field, if declared.
	pub fn native_type(&self, field: &str) -> Option<&NativeType> {
		self.layout.slot(field).map(|slot| &self.layout.types[slot])
	}

	/// Field names with their native types, in declaration order.
	pub fn field_types(&self) -> impl Iterator<Item = (&str, &NativeType)> {
		self.layout
			.names
			.iter()
			.map(String::as_str)
			.zip(self.layout.types.iter())
	}

	/// Cheap pre-check: does the record carry enough topics and the right prefix?
	pub fn matches(&self, record: &RawEventRecord) -> bool {
		self.check_topic_count(record).is_ok() && self.verify_prefix(record).is_ok()
	}

	/// Validates a record and binds its fields.
	pub fn decode(&self, record: &RawEventRecord) -> Result<DecodedEvent, EventDecodeError> {
		let result = self
			.check_topic_count(record)
			.and_then(|_| self.verify_prefix(record))
			.and_then(|_| self.verify_payload_shape(record))
			.and_then(|_| self.bind_fields(record));

		match result {
			Ok(raw) => {
				trace!(event = %self.descriptor.name, "Record decoded");
				Ok(DecodedEvent::new(
					self.layout.clone(),
					raw,
					self.value_decoder.clone(),
				))
			}
			Err(e) => {
				debug!(
					event = %self.descriptor.name,
					stage = %e.stage(),
					error = %e,
					"Record rejected"
				);
				Err(e)
			}
		}
	}

	fn check_topic_count(&self, record: &RawEventRecord) -> Result<(), EventDecodeError> {
		let expected = self.descriptor.prefix_topics.len() + self.topic_slots.len();
		if record.topics.len() < expected {
			return Err(EventDecodeError::TooFewTopics {
				found: record.topics.len(),
				expected,
			});
		}
		Ok(())
	}

	fn verify_prefix(&self, record: &RawEventRecord) -> Result<(), EventDecodeError> {
		for (index, (expected, topic)) in self
			.descriptor
			.prefix_topics
			.iter()
			.zip(&record.topics)
			.enumerate()
		{
			// A topic the value decoder rejects is reported by its tag.
			let found = match self.value_decoder.decode(topic) {
				Ok(native) if native.as_str() == Some(expected.as_str()) => continue,
				Ok(native) => native.to_string(),
				Err(_) => sc_val_tag(topic).to_string(),
			};
			return Err(EventDecodeError::PrefixMismatch {
				index,
				expected: expected.clone(),
				found,
			});
		}
		Ok(())
	}

	fn verify_payload_shape(&self, record: &RawEventRecord) -> Result<(), EventDecodeError> {
		let shape = self.descriptor.payload_shape;
		let matches = match shape {
			PayloadShape::Map => matches!(record.payload, ScVal::Map(_)),
			PayloadShape::Vector => matches!(record.payload, ScVal::Vec(_)),
			PayloadShape::SingleValue => true,
		};
		if !matches {
			return Err(EventDecodeError::UnexpectedPayloadShape {
				expected: shape,
				found: sc_val_tag(&record.payload).to_string(),
			});
		}
		Ok(())
	}

	fn bind_fields(&self, record: &RawEventRecord) -> Result<Vec<ScVal>, EventDecodeError> {
		let mut bound: Vec<Option<ScVal>> = vec![None; self.descriptor.fields.len()];

		let offset = self.descriptor.prefix_topics.len();
		for (topic, &slot) in record.topics[offset..].iter().zip(&self.topic_slots) {
			bound[slot] = Some(topic.clone());
		}

		match self.descriptor.payload_shape {
			PayloadShape::Map => {
				let entries: &[ScMapEntry] = match &record.payload {
					ScVal::Map(Some(map)) => map.0.as_slice(),
					_ => &[],
				};
				for entry in entries {
					let key = match self.value_decoder.decode(&entry.key) {
						Ok(NativeValue::String(key)) => key,
						Ok(other) => other.to_string(),
						Err(e) => {
							trace!(error = %e, "Skipping payload entry with undecodable key");
							continue;
						}
					};
					if let Some(&slot) = self.payload_index.get(&key) {
						// First occurrence of a key wins.
						if bound[slot].is_none() {
							bound[slot] = Some(entry.val.clone());
						}
					}
				}
			}
			PayloadShape::Vector => {
				let items: &[ScVal] = match &record.payload {
					ScVal::Vec(Some(vec)) => vec.0.as_slice(),
					_ => &[],
				};
				for (item, &slot) in items.iter().zip(&self.payload_slots) {
					bound[slot] = Some(item.clone());
				}
			}
			PayloadShape::SingleValue => {
				if let Some(&slot) = self.payload_slots.first() {
					bound[slot] = Some(record.payload.clone());
				}
			}
		}

		let missing: Vec<String> = bound
			.iter()
			.zip(&self.layout.names)
			.filter(|(raw, _)| raw.is_none())
			.map(|(_, name)| name.clone())
			.collect();
		if !missing.is_empty() {
			return Err(EventDecodeError::MissingPayloadFields {
				names: missing,
				payload_dump: self.dump_payload(&record.payload),
			});
		}

		Ok(bound.into_iter().flatten().collect())
	}

	fn dump_payload(&self, payload: &ScVal) -> String {
		match self.value_decoder.decode(payload) {
			Ok(native) => serde_json::to_string_pretty(&native.to_json())
				.unwrap_or_else(|_| native.to_string()),
			Err(_) => format!("{:?}", payload),
		}
	}
}

impl std::fmt::Debug for EventDecoder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("EventDecoder")
			.field("descriptor", &self.descriptor)
			.field("types", &self.layout.types)
			.finish()
	}
}
