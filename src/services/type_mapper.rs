//! Mapping from wire types to native type labels.
//!
//! The mapping is total: every [`WireType`], unknown shapes included, has a
//! label. It recurses once per node of the type tree.

use crate::models::{EventDescriptor, NativeType, WireType};

/// Maps a wire type to the native type its values decode into.
pub fn map_type(wire: &WireType) -> NativeType {
	match wire {
		WireType::Bool => NativeType::Boolean,
		WireType::I32 | WireType::U32 => NativeType::Int32,
		WireType::I64
		| WireType::U64
		| WireType::Timepoint
		| WireType::Duration
		| WireType::I128
		| WireType::U128
		| WireType::I256
		| WireType::U256 => NativeType::BigInt,
		WireType::Address => NativeType::Address,
		WireType::MuxedAddress => NativeType::MuxedAccount,
		WireType::String | WireType::Symbol => NativeType::String,
		WireType::Option(inner) => NativeType::Nullable(Box::new(map_type(inner))),
		WireType::Vec(elem) => NativeType::Sequence(Box::new(map_type(elem))),
		WireType::Tuple(elems) => NativeType::Tuple(elems.iter().map(map_type).collect()),
		WireType::Map(key, value) => {
			NativeType::Mapping(Box::new(map_type(key)), Box::new(map_type(value)))
		}
		WireType::Unknown(tag) => NativeType::Any(tag.clone()),
	}
}

/// Native label of every field of an event, in declaration order.
pub fn type_table(descriptor: &EventDescriptor) -> Vec<(String, NativeType)> {
	descriptor
		.fields
		.iter()
		.map(|field| (field.name.clone(), map_type(&field.type_)))
		.collect()
}
