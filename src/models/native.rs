//! Native-side types and values.
//!
//! [`NativeType`] is the label a wire type maps to, [`NativeValue`] is what an
//! opaque `ScVal` decodes into. Big integers are kept as decimal strings so no
//! value is ever narrowed.

use hex::encode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Native type label produced by the type mapper
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of")]
pub enum NativeType {
	Boolean,
	/// Integer that fits in 32 bits
	Int32,
	/// Arbitrary-precision integer (64 bits and wider, timepoints, durations)
	BigInt,
	Address,
	MuxedAccount,
	String,
	/// Inner type or nothing
	Nullable(Box<NativeType>),
	Sequence(Box<NativeType>),
	Tuple(Vec<NativeType>),
	Mapping(Box<NativeType>, Box<NativeType>),
	/// Untyped value; the tag is kept for diagnostics only
	Any(String),
}

impl NativeType {
	/// Checks that a decoded value has the shape this label predicts.
	pub fn accepts(&self, value: &NativeValue) -> bool {
		match (self, value) {
			(NativeType::Any(_), _) => true,
			(NativeType::Nullable(_), NativeValue::Void) => true,
			(NativeType::Nullable(inner), other) => inner.accepts(other),
			(NativeType::Boolean, NativeValue::Bool(_)) => true,
			(NativeType::Int32, NativeValue::Number(_)) => true,
			(NativeType::BigInt, NativeValue::BigInt(_)) => true,
			(NativeType::Address | NativeType::MuxedAccount, NativeValue::Address(_)) => true,
			(NativeType::String, NativeValue::String(_)) => true,
			(NativeType::Sequence(elem), NativeValue::Vec(items)) => {
				items.iter().all(|item| elem.accepts(item))
			}
			(NativeType::Tuple(elems), NativeValue::Vec(items)) => {
				elems.len() == items.len()
					&& elems.iter().zip(items).all(|(t, item)| t.accepts(item))
			}
			(NativeType::Mapping(key, value), NativeValue::Map(entries)) => entries
				.iter()
				.all(|(k, v)| key.accepts(k) && value.accepts(v)),
			_ => false,
		}
	}
}

impl fmt::Display for NativeType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NativeType::Boolean => write!(f, "bool"),
			NativeType::Int32 => write!(f, "int32"),
			NativeType::BigInt => write!(f, "bigint"),
			NativeType::Address => write!(f, "Address"),
			NativeType::MuxedAccount => write!(f, "MuxedAccount"),
			NativeType::String => write!(f, "string"),
			NativeType::Nullable(inner) => write!(f, "Option<{}>", inner),
			NativeType::Sequence(elem) => write!(f, "Vec<{}>", elem),
			NativeType::Tuple(elems) => write!(
				f,
				"({})",
				elems
					.iter()
					.map(|t| t.to_string())
					.collect::<Vec<_>>()
					.join(", ")
			),
			NativeType::Mapping(key, value) => write!(f, "Map<{}, {}>", key, value),
			NativeType::Any(tag) => write!(f, "any /* {} */", tag),
		}
	}
}

/// A decoded contract value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeValue {
	Void,
	Bool(bool),
	/// 32-bit integers, signed or unsigned
	Number(i64),
	/// Decimal rendering of a 64, 128 or 256-bit integer
	BigInt(String),
	Bytes(Vec<u8>),
	/// Strings and symbols
	String(String),
	/// Strkey-encoded address
	Address(String),
	Vec(Vec<NativeValue>),
	/// Entries in their stored order
	Map(Vec<(NativeValue, NativeValue)>),
	/// A legal value with no native counterpart (errors, ledger keys,
	/// contract instances), kept as its wire tag and base64 XDR
	Raw { tag: &'static str, xdr: String },
}

impl NativeValue {
	/// Returns the string payload of a `String` value.
	pub fn as_str(&self) -> Option<&str> {
		match self {
			NativeValue::String(s) => Some(s),
			_ => None,
		}
	}

	/// Short name of the value's shape, used in mismatch diagnostics.
	pub fn kind(&self) -> &'static str {
		match self {
			NativeValue::Void => "void",
			NativeValue::Bool(_) => "bool",
			NativeValue::Number(_) => "int32",
			NativeValue::BigInt(_) => "bigint",
			NativeValue::Bytes(_) => "bytes",
			NativeValue::String(_) => "string",
			NativeValue::Address(_) => "Address",
			NativeValue::Vec(_) => "vec",
			NativeValue::Map(_) => "map",
			NativeValue::Raw { .. } => "raw",
		}
	}

	/// Converts the value to JSON.
	///
	/// Big integers become strings. Maps whose keys are all strings become
	/// objects, any other map becomes an array of `[key, value]` pairs.
	pub fn to_json(&self) -> Value {
		match self {
			NativeValue::Void => Value::Null,
			NativeValue::Bool(b) => json!(b),
			NativeValue::Number(n) => json!(n),
			NativeValue::BigInt(s) => json!(s),
			NativeValue::Bytes(b) => json!(encode(b)),
			NativeValue::String(s) => json!(s),
			NativeValue::Address(a) => json!(a),
			NativeValue::Vec(items) => {
				Value::Array(items.iter().map(NativeValue::to_json).collect())
			}
			NativeValue::Map(entries) => {
				if entries.iter().all(|(k, _)| k.as_str().is_some()) {
					let map: serde_json::Map<String, Value> = entries
						.iter()
						.filter_map(|(k, v)| k.as_str().map(|k| (k.to_string(), v.to_json())))
						.collect();
					Value::Object(map)
				} else {
					Value::Array(
						entries
							.iter()
							.map(|(k, v)| json!([k.to_json(), v.to_json()]))
							.collect(),
					)
				}
			}
			NativeValue::Raw { tag, xdr } => json!({ "type": tag, "xdr": xdr }),
		}
	}
}

impl fmt::Display for NativeValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			NativeValue::Void => write!(f, "null"),
			NativeValue::Bool(b) => write!(f, "{}", b),
			NativeValue::Number(n) => write!(f, "{}", n),
			NativeValue::BigInt(s) => write!(f, "{}", s),
			NativeValue::Bytes(b) => write!(f, "{}", encode(b)),
			NativeValue::String(s) => write!(f, "{}", s),
			NativeValue::Address(a) => write!(f, "{}", a),
			NativeValue::Vec(items) => {
				let items: Vec<String> = items.iter().map(|x| x.to_string()).collect();
				write!(f, "[{}]", items.join(","))
			}
			NativeValue::Map(entries) => {
				let items: Vec<String> = entries
					.iter()
					.map(|(k, v)| format!("{}:{}", k, v))
					.collect();
				write!(f, "{{{}}}", items.join(","))
			}
			NativeValue::Raw { tag, xdr } => write!(f, "{}({})", tag, xdr),
		}
	}
}
