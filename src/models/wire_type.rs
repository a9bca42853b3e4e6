//! Wire-level type descriptions of contract event fields.
//!
//! [`WireType`] is the crate's own view of a Soroban `ScSpecTypeDef`. It keeps
//! the shapes that have a native counterpart and folds everything else into
//! [`WireType::Unknown`], carrying the original shape name along.

use serde::{Deserialize, Serialize};
use std::fmt;
use stellar_xdr::curr::ScSpecTypeDef;

/// Recursive description of a field's on-chain type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "of")]
pub enum WireType {
	Bool,
	I32,
	U32,
	I64,
	U64,
	Timepoint,
	Duration,
	I128,
	U128,
	I256,
	U256,
	/// Account or contract address
	Address,
	/// Address that may carry a multiplexing id
	MuxedAddress,
	String,
	Symbol,
	Vec(Box<WireType>),
	Tuple(Vec<WireType>),
	Map(Box<WireType>, Box<WireType>),
	Option(Box<WireType>),
	/// Any shape without a native mapping; the tag names the source shape
	Unknown(String),
}

impl WireType {
	/// Depth of the type tree. Leaves have depth 1.
	pub fn depth(&self) -> usize {
		match self {
			WireType::Vec(inner) | WireType::Option(inner) => 1 + inner.depth(),
			WireType::Map(key, value) => 1 + key.depth().max(value.depth()),
			WireType::Tuple(elems) => 1 + elems.iter().map(WireType::depth).max().unwrap_or(0),
			_ => 1,
		}
	}

	/// Returns true for [`WireType::Unknown`].
	pub fn is_unknown(&self) -> bool {
		matches!(self, WireType::Unknown(_))
	}
}

impl From<&ScSpecTypeDef> for WireType {
	fn from(type_def: &ScSpecTypeDef) -> Self {
		match type_def {
			ScSpecTypeDef::Bool => WireType::Bool,
			ScSpecTypeDef::I32 => WireType::I32,
			ScSpecTypeDef::U32 => WireType::U32,
			ScSpecTypeDef::I64 => WireType::I64,
			ScSpecTypeDef::U64 => WireType::U64,
			ScSpecTypeDef::Timepoint => WireType::Timepoint,
			ScSpecTypeDef::Duration => WireType::Duration,
			ScSpecTypeDef::I128 => WireType::I128,
			ScSpecTypeDef::U128 => WireType::U128,
			ScSpecTypeDef::I256 => WireType::I256,
			ScSpecTypeDef::U256 => WireType::U256,
			ScSpecTypeDef::Address => WireType::Address,
			ScSpecTypeDef::MuxedAddress => WireType::MuxedAddress,
			ScSpecTypeDef::String => WireType::String,
			ScSpecTypeDef::Symbol => WireType::Symbol,
			ScSpecTypeDef::Vec(t) => WireType::Vec(Box::new(WireType::from(t.element_type.as_ref()))),
			ScSpecTypeDef::Tuple(t) => {
				WireType::Tuple(t.value_types.iter().map(WireType::from).collect())
			}
			ScSpecTypeDef::Map(t) => WireType::Map(
				Box::new(WireType::from(t.key_type.as_ref())),
				Box::new(WireType::from(t.value_type.as_ref())),
			),
			ScSpecTypeDef::Option(t) => {
				WireType::Option(Box::new(WireType::from(t.value_type.as_ref())))
			}
			other => WireType::Unknown(unknown_tag(other)),
		}
	}
}

impl From<ScSpecTypeDef> for WireType {
	fn from(type_def: ScSpecTypeDef) -> Self {
		WireType::from(&type_def)
	}
}

/// Names a spec type that has no native mapping.
fn unknown_tag(type_def: &ScSpecTypeDef) -> String {
	match type_def {
		ScSpecTypeDef::Val => "Val".to_string(),
		ScSpecTypeDef::Void => "Void".to_string(),
		ScSpecTypeDef::Error => "Error".to_string(),
		ScSpecTypeDef::Bytes => "Bytes".to_string(),
		ScSpecTypeDef::BytesN(bytes_n) => format!("BytesN({})", bytes_n.n),
		ScSpecTypeDef::Result(_) => "Result".to_string(),
		ScSpecTypeDef::Udt(udt) => format!("Udt({})", udt.name),
		_ => "Unrecognized".to_string(),
	}
}

impl fmt::Display for WireType {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			WireType::Bool => write!(f, "Bool"),
			WireType::I32 => write!(f, "I32"),
			WireType::U32 => write!(f, "U32"),
			WireType::I64 => write!(f, "I64"),
			WireType::U64 => write!(f, "U64"),
			WireType::Timepoint => write!(f, "Timepoint"),
			WireType::Duration => write!(f, "Duration"),
			WireType::I128 => write!(f, "I128"),
			WireType::U128 => write!(f, "U128"),
			WireType::I256 => write!(f, "I256"),
			WireType::U256 => write!(f, "U256"),
			WireType::Address => write!(f, "Address"),
			WireType::MuxedAddress => write!(f, "MuxedAddress"),
			WireType::String => write!(f, "String"),
			WireType::Symbol => write!(f, "Symbol"),
			WireType::Vec(elem) => write!(f, "Vec<{}>", elem),
			WireType::Tuple(elems) => write!(
				f,
				"Tuple<{}>",
				elems
					.iter()
					.map(|t| t.to_string())
					.collect::<Vec<_>>()
					.join(",")
			),
			WireType::Map(key, value) => write!(f, "Map<{},{}>", key, value),
			WireType::Option(inner) => write!(f, "Option<{}>", inner),
			WireType::Unknown(tag) => write!(f, "Unknown({})", tag),
		}
	}
}
