//! Event descriptors.
//!
//! An [`EventDescriptor`] is the structured view of one `#[contractevent]`
//! declared in a contract spec: its name, the literal topics every instance
//! starts with, its fields and where each one lives, and the shape of the
//! payload.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::WireType;

/// Where a field's raw value is found in an event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldLocation {
	/// Among the topics, after the prefix literals
	TopicList,
	/// Inside the payload value
	Payload,
}

/// Declared shape of an event payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayloadShape {
	/// Map keyed by field name
	Map,
	/// Vector in field declaration order
	Vector,
	/// The payload is the value of the only payload field
	SingleValue,
}

impl fmt::Display for PayloadShape {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			PayloadShape::Map => write!(f, "Map"),
			PayloadShape::Vector => write!(f, "Vec"),
			PayloadShape::SingleValue => write!(f, "SingleValue"),
		}
	}
}

/// A single declared event field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventField {
	/// Field name, unique within its event
	pub name: String,

	/// Wire type of the field
	#[serde(rename = "type")]
	pub type_: WireType,

	/// Where the raw value is found
	pub location: FieldLocation,

	/// Doc comment from the contract, if any
	#[serde(skip_serializing_if = "Option::is_none")]
	pub doc: Option<String>,
}

impl EventField {
	pub fn new(name: impl Into<String>, type_: WireType, location: FieldLocation) -> Self {
		Self {
			name: name.into(),
			type_,
			location,
			doc: None,
		}
	}

	pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
		self.doc = Some(doc.into());
		self
	}
}

/// Structured description of one contract event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
	/// Event name as declared in the contract
	pub name: String,

	/// Literal values expected at the start of the topic list
	pub prefix_topics: Vec<String>,

	/// Fields in declaration order
	pub fields: Vec<EventField>,

	/// Shape of the payload value
	pub payload_shape: PayloadShape,
}

impl EventDescriptor {
	/// Fields bound from topics, in binding order.
	pub fn topic_fields(&self) -> impl Iterator<Item = &EventField> {
		self.fields
			.iter()
			.filter(|f| f.location == FieldLocation::TopicList)
	}

	/// Fields bound from the payload, in declaration order.
	pub fn payload_fields(&self) -> impl Iterator<Item = &EventField> {
		self.fields
			.iter()
			.filter(|f| f.location == FieldLocation::Payload)
	}

	/// Minimum number of topics a matching record carries.
	pub fn expected_topic_count(&self) -> usize {
		self.prefix_topics.len() + self.topic_fields().count()
	}

	/// Looks a field up by name.
	pub fn field(&self, name: &str) -> Option<&EventField> {
		self.fields.iter().find(|f| f.name == name)
	}
}
