//! Property-based tests for wire type to native type mapping.

use proptest::{prelude::*, test_runner::Config};
use soroban_event_decoder::{
	models::{NativeType, WireType},
	services::{decoder::decode_sc_val, type_mapper::map_type},
};
use stellar_xdr::curr::{Int128Parts, ScVal, UInt128Parts};

use crate::properties::strategies::{leaf_wire_type, symbol, wire_type_strategy};

fn native_depth(native: &NativeType) -> usize {
	match native {
		NativeType::Nullable(inner) | NativeType::Sequence(inner) => 1 + native_depth(inner),
		NativeType::Mapping(key, value) => 1 + native_depth(key).max(native_depth(value)),
		NativeType::Tuple(elems) => 1 + elems.iter().map(native_depth).max().unwrap_or(0),
		_ => 1,
	}
}

fn count_unknown(wire: &WireType) -> usize {
	match wire {
		WireType::Unknown(_) => 1,
		WireType::Option(inner) | WireType::Vec(inner) => count_unknown(inner),
		WireType::Map(key, value) => count_unknown(key) + count_unknown(value),
		WireType::Tuple(elems) => elems.iter().map(count_unknown).sum(),
		_ => 0,
	}
}

fn count_any(native: &NativeType) -> usize {
	match native {
		NativeType::Any(_) => 1,
		NativeType::Nullable(inner) | NativeType::Sequence(inner) => count_any(inner),
		NativeType::Mapping(key, value) => count_any(key) + count_any(value),
		NativeType::Tuple(elems) => elems.iter().map(count_any).sum(),
		_ => 0,
	}
}

/// Leaf wrapped in at least three containers.
fn deep_wire_type() -> impl Strategy<Value = WireType> {
	(leaf_wire_type(), prop::collection::vec(0..4u8, 3..8)).prop_map(|(leaf, wrappers)| {
		wrappers.into_iter().fold(leaf, |inner, wrapper| match wrapper {
			0 => WireType::Option(Box::new(inner)),
			1 => WireType::Vec(Box::new(inner)),
			2 => WireType::Map(Box::new(WireType::Symbol), Box::new(inner)),
			_ => WireType::Tuple(vec![WireType::Bool, inner]),
		})
	})
}

/// Values paired with the wire type they are declared as.
fn typed_scalar() -> impl Strategy<Value = (WireType, ScVal)> {
	prop_oneof![
		any::<bool>().prop_map(|b| (WireType::Bool, ScVal::Bool(b))),
		any::<u32>().prop_map(|n| (WireType::U32, ScVal::U32(n))),
		any::<i32>().prop_map(|n| (WireType::I32, ScVal::I32(n))),
		any::<u64>().prop_map(|n| (WireType::U64, ScVal::U64(n))),
		any::<i64>().prop_map(|n| (WireType::I64, ScVal::I64(n))),
		(any::<u64>(), any::<u64>())
			.prop_map(|(hi, lo)| (WireType::U128, ScVal::U128(UInt128Parts { hi, lo }))),
		(any::<i64>(), any::<u64>())
			.prop_map(|(hi, lo)| (WireType::I128, ScVal::I128(Int128Parts { hi, lo }))),
		"[a-zA-Z0-9_]{1,32}".prop_map(|s| (WireType::Symbol, symbol(&s))),
	]
}

proptest! {
	#![proptest_config(Config {
		cases: 256, .. Config::default()
	})]

	#[test]
	fn test_mapping_preserves_structure(wire in wire_type_strategy()) {
		let native = map_type(&wire);
		prop_assert_eq!(native_depth(&native), wire.depth());
		prop_assert_eq!(count_any(&native), count_unknown(&wire));
	}

	#[test]
	fn test_mapping_is_deterministic(wire in wire_type_strategy()) {
		prop_assert_eq!(map_type(&wire), map_type(&wire.clone()));
		prop_assert!(!map_type(&wire).to_string().is_empty());
	}

	#[test]
	fn test_deep_types_are_mapped(wire in deep_wire_type()) {
		prop_assert!(wire.depth() >= 4);
		prop_assert_eq!(native_depth(&map_type(&wire)), wire.depth());
	}

	#[test]
	fn test_decoded_scalars_conform((wire, value) in typed_scalar()) {
		let native = decode_sc_val(&value).unwrap();
		let label = map_type(&wire);
		prop_assert!(label.accepts(&native), "{} does not accept {:?}", label, native);
		prop_assert!(NativeType::Nullable(Box::new(label)).accepts(&native));
	}
}
