//! Common test utilities and helper functions.
//!
//! Provides the `DefaultEvent` contract spec, fixture loading, and builders for
//! listing files in each supported format.

use soroban_event_decoder::models::{
	EventDescriptor, EventField, FieldLocation, PayloadShape, RawEventRecord, WireType,
};
use std::{fs, path::Path};
use stellar_xdr::curr::{
	Int128Parts, Limits, ScMap, ScMapEntry, ScSpecEntry, ScSpecEventDataFormat,
	ScSpecEventParamLocationV0, ScSpecEventParamV0, ScSpecEventV0, ScSpecFunctionInputV0,
	ScSpecFunctionV0, ScSpecTypeDef, ScSpecTypeMap, ScSpecTypeVec, ScString, ScSymbol, ScVal,
	StringM, WriteXdr,
};

pub const TEST_FIXTURES_BASE: &str = "tests/integration/fixtures";

pub const DEFAULT_EVENT_CONTRACT: &str = "CBMWOANWBHW5BYJ6GNACCMK2CQVTE6LUAP3XGIRIQK3NXWVOZLHXDSM3";
pub const DEFAULT_EVENT_BIGNUM: &str = "170141183460469231731687303715884105000";

pub fn read_fixture(name: &str) -> String {
	fs::read_to_string(Path::new(TEST_FIXTURES_BASE).join(name))
		.unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", name, e))
}

/// The `DefaultEvent` record emitted by the events test contract.
pub fn default_event_record() -> RawEventRecord {
	RawEventRecord::from_contract_event_base64(&read_fixture("default_event.xdr")).unwrap()
}

pub fn symbol(s: &str) -> ScVal {
	ScVal::Symbol(ScSymbol(s.try_into().unwrap()))
}

pub fn string(s: &str) -> ScVal {
	ScVal::String(ScString(s.try_into().unwrap()))
}

pub fn i128(hi: i64, lo: u64) -> ScVal {
	ScVal::I128(Int128Parts { hi, lo })
}

pub fn map(entries: Vec<(ScVal, ScVal)>) -> ScVal {
	ScVal::Map(Some(ScMap(
		entries
			.into_iter()
			.map(|(key, val)| ScMapEntry { key, val })
			.collect::<Vec<_>>()
			.try_into()
			.unwrap(),
	)))
}

pub fn vec_val(items: Vec<ScVal>) -> ScVal {
	ScVal::Vec(Some(items.try_into().unwrap()))
}

/// Descriptor equivalent to the `DefaultEvent` spec entry.
pub fn default_event_descriptor() -> EventDescriptor {
	EventDescriptor {
		name: "DefaultEvent".to_string(),
		prefix_topics: vec!["default_event".to_string()],
		fields: vec![
			EventField::new("addr", WireType::Address, FieldLocation::TopicList),
			EventField::new("num", WireType::U32, FieldLocation::TopicList),
			EventField::new("bignum", WireType::I128, FieldLocation::Payload),
			EventField::new(
				"nested",
				WireType::Vec(Box::new(WireType::Map(
					Box::new(WireType::String),
					Box::new(WireType::I64),
				))),
				FieldLocation::Payload,
			),
			EventField::new("any", WireType::Unknown("Val".to_string()), FieldLocation::Payload),
		],
		payload_shape: PayloadShape::Map,
	}
}

fn event_param(
	name: &str,
	type_: ScSpecTypeDef,
	location: ScSpecEventParamLocationV0,
) -> ScSpecEventParamV0 {
	ScSpecEventParamV0 {
		doc: StringM::default(),
		name: name.try_into().unwrap(),
		type_,
		location,
	}
}

/// Spec entries of the events test contract: one function and two events.
pub fn create_test_spec() -> Vec<ScSpecEntry> {
	let nested = ScSpecTypeDef::Vec(Box::new(ScSpecTypeVec {
		element_type: Box::new(ScSpecTypeDef::Map(Box::new(ScSpecTypeMap {
			key_type: Box::new(ScSpecTypeDef::String),
			value_type: Box::new(ScSpecTypeDef::I64),
		}))),
	}));

	vec![
		ScSpecEntry::FunctionV0(ScSpecFunctionV0 {
			doc: StringM::default(),
			name: ScSymbol("emit".try_into().unwrap()),
			inputs: vec![ScSpecFunctionInputV0 {
				doc: StringM::default(),
				name: "num".try_into().unwrap(),
				type_: ScSpecTypeDef::U32,
			}]
			.try_into()
			.unwrap(),
			outputs: vec![].try_into().unwrap(),
		}),
		ScSpecEntry::EventV0(ScSpecEventV0 {
			doc: StringM::default(),
			lib: StringM::default(),
			name: ScSymbol("DefaultEvent".try_into().unwrap()),
			prefix_topics: vec![ScSymbol("default_event".try_into().unwrap())]
				.try_into()
				.unwrap(),
			params: vec![
				event_param("addr", ScSpecTypeDef::Address, ScSpecEventParamLocationV0::TopicList),
				event_param("num", ScSpecTypeDef::U32, ScSpecEventParamLocationV0::TopicList),
				event_param("bignum", ScSpecTypeDef::I128, ScSpecEventParamLocationV0::Data),
				event_param("nested", nested, ScSpecEventParamLocationV0::Data),
				event_param("any", ScSpecTypeDef::Val, ScSpecEventParamLocationV0::Data),
			]
			.try_into()
			.unwrap(),
			data_format: ScSpecEventDataFormat::Map,
		}),
		ScSpecEntry::EventV0(ScSpecEventV0 {
			doc: StringM::default(),
			lib: StringM::default(),
			name: ScSymbol("Counter".try_into().unwrap()),
			prefix_topics: vec![ScSymbol("counter".try_into().unwrap())]
				.try_into()
				.unwrap(),
			params: vec![event_param(
				"value",
				ScSpecTypeDef::U64,
				ScSpecEventParamLocationV0::Data,
			)]
			.try_into()
			.unwrap(),
			data_format: ScSpecEventDataFormat::SingleValue,
		}),
	]
}

fn leb128(mut value: usize) -> Vec<u8> {
	let mut out = Vec::new();
	loop {
		let byte = (value & 0x7f) as u8;
		value >>= 7;
		if value == 0 {
			out.push(byte);
			return out;
		}
		out.push(byte | 0x80);
	}
}

/// Minimal WASM module holding `entries` in its `contractspecv0` section.
pub fn wasm_with_spec(entries: &[ScSpecEntry]) -> Vec<u8> {
	let name = b"contractspecv0";
	let mut section = leb128(name.len());
	section.extend_from_slice(name);
	for entry in entries {
		section.extend(entry.to_xdr(Limits::none()).unwrap());
	}

	let mut wasm = b"\0asm".to_vec();
	wasm.extend_from_slice(&[1, 0, 0, 0]);
	wasm.push(0);
	wasm.extend(leb128(section.len()));
	wasm.extend(section);
	wasm
}

pub fn spec_as_base64_lines(entries: &[ScSpecEntry]) -> String {
	entries
		.iter()
		.map(|e| e.to_xdr_base64(Limits::none()).unwrap())
		.collect::<Vec<_>>()
		.join("\n")
}

/// Writes the test spec in every listing format and returns the paths.
pub fn write_spec_files(dir: &Path) -> Vec<std::path::PathBuf> {
	let entries = create_test_spec();
	let wasm = dir.join("events.wasm");
	let json = dir.join("events.json");
	let base64 = dir.join("events.txt");
	fs::write(&wasm, wasm_with_spec(&entries)).unwrap();
	fs::write(&json, serde_json::to_string_pretty(&entries).unwrap()).unwrap();
	fs::write(&base64, spec_as_base64_lines(&entries)).unwrap();
	vec![wasm, json, base64]
}
