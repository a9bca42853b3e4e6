//! Error types for event decoding.
//!
//! Validation failures are plain values: they never log on construction since
//! a catalog probing several descriptors expects most of them to fail.

use std::fmt;
use thiserror::Error as ThisError;

use crate::models::{NativeType, PayloadShape};

/// Stage of the decode state machine a record failed in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeStage {
	TopicCount,
	PrefixVerify,
	PayloadShape,
	FieldBind,
}

impl fmt::Display for DecodeStage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			DecodeStage::TopicCount => write!(f, "topic_count"),
			DecodeStage::PrefixVerify => write!(f, "prefix_verify"),
			DecodeStage::PayloadShape => write!(f, "payload_shape"),
			DecodeStage::FieldBind => write!(f, "field_bind"),
		}
	}
}

/// Failure of the value-decode capability
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ValueDecodeError {
	/// The value has a shape with no native counterpart
	#[error("unsupported value: {tag}")]
	Unsupported { tag: String },

	/// A string or symbol holds bytes that are not UTF-8
	#[error("invalid UTF-8 in {tag}: {reason}")]
	InvalidUtf8 { tag: &'static str, reason: String },

	/// A value with no native form could not be re-encoded as XDR
	#[error("failed to encode {tag}: {reason}")]
	Encode { tag: &'static str, reason: String },
}

/// Reasons a raw record is rejected by an event decoder
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum EventDecodeError {
	#[error("invalid event: too few topics ({found}), expected {expected}")]
	TooFewTopics { found: usize, expected: usize },

	#[error("invalid event: expected \"{expected}\" as topic {index}, found \"{found}\"")]
	PrefixMismatch {
		index: usize,
		expected: String,
		found: String,
	},

	#[error("invalid event: expected {expected} payload, got {found}")]
	UnexpectedPayloadShape { expected: PayloadShape, found: String },

	/// Every declared payload field absent from the payload, in declaration order
	#[error("expected to find {} in event payload: {payload_dump}", quote_names(.names))]
	MissingPayloadFields {
		names: Vec<String>,
		payload_dump: String,
	},
}

impl EventDecodeError {
	pub fn stage(&self) -> DecodeStage {
		match self {
			Self::TooFewTopics { .. } => DecodeStage::TopicCount,
			Self::PrefixMismatch { .. } => DecodeStage::PrefixVerify,
			Self::UnexpectedPayloadShape { .. } => DecodeStage::PayloadShape,
			Self::MissingPayloadFields { .. } => DecodeStage::FieldBind,
		}
	}
}

fn quote_names(names: &[String]) -> String {
	names
		.iter()
		.map(|name| format!("'{}'", name))
		.collect::<Vec<_>>()
		.join(", ")
}

/// Errors raised when reading a field of a decoded event
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
	#[error("event {event} has no field '{field}'")]
	UnknownField { event: String, field: String },

	#[error("failed to decode field '{field}': {source}")]
	Decode {
		field: String,
		#[source]
		source: ValueDecodeError,
	},

	/// The decoded value does not have the shape of the field's native type
	#[error("field '{field}' decoded to {found}, expected {expected}")]
	TypeMismatch {
		field: String,
		expected: NativeType,
		found: &'static str,
	},
}

/// Errors raised by an event catalog
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
	#[error("no event matches a record with {topic_count} topics (first topic: {first_topic})")]
	NoMatchingEvent {
		topic_count: usize,
		first_topic: String,
	},

	#[error("unknown event '{0}'")]
	UnknownEvent(String),

	#[error("failed to decode {event}: {source}")]
	Decode {
		event: String,
		#[source]
		source: EventDecodeError,
	},
}
