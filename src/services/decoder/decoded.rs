//! Decoded events with lazily materialized fields.

use once_cell::sync::OnceCell;
use serde_json::{Map, Value};
use std::{collections::HashMap, fmt, sync::Arc};
use stellar_xdr::curr::ScVal;

use crate::{
	models::{NativeType, NativeValue},
	services::decoder::{FieldError, ValueDecoder},
};

/// Per-event field layout shared by a decoder and everything it produces
#[derive(Debug)]
pub(crate) struct FieldLayout {
	pub event: String,
	pub names: Vec<String>,
	pub types: Vec<NativeType>,
	pub index: HashMap<String, usize>,
}

impl FieldLayout {
	pub fn slot(&self, name: &str) -> Option<usize> {
		self.index.get(name).copied()
	}
}

struct FieldSlot {
	raw: ScVal,
	value: OnceCell<NativeValue>,
}

/// An event that passed validation
///
/// Every declared field is bound to its raw value. Native values are produced
/// on first access and cached, so a field never goes through the value decoder
/// twice. The event may be shared between threads; concurrent first reads of
/// the same field agree on one cached value.
pub struct DecodedEvent {
	layout: Arc<FieldLayout>,
	slots: Vec<FieldSlot>,
	value_decoder: Arc<dyn ValueDecoder>,
}

impl DecodedEvent {
	pub(crate) fn new(
		layout: Arc<FieldLayout>,
		raw: Vec<ScVal>,
		value_decoder: Arc<dyn ValueDecoder>,
	) -> Self {
		let slots = raw
			.into_iter()
			.map(|raw| FieldSlot {
				raw,
				value: OnceCell::new(),
			})
			.collect();
		Self {
			layout,
			slots,
			value_decoder,
		}
	}

	/// Name of the event this record was decoded as.
	pub fn name(&self) -> &str {
		&self.layout.event
	}

	/// Field names in declaration order.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.layout.names.iter().map(String::as_str)
	}

	pub fn native_type(&self, field: &str) -> Option<&NativeType> {
		self.layout.slot(field).map(|slot| &self.layout.types[slot])
	}

	/// Raw bound value of a field, never decoded.
	pub fn raw(&self, field: &str) -> Option<&ScVal> {
		self.layout
			.slot(field)
			.and_then(|slot| self.slots.get(slot))
			.map(|s| &s.raw)
	}

	/// Whether a field has already been decoded.
	pub fn is_materialized(&self, field: &str) -> bool {
		self.layout
			.slot(field)
			.and_then(|slot| self.slots.get(slot))
			.is_some_and(|s| s.value.get().is_some())
	}

	/// Returns the native value of a field, decoding it on first access.
	///
	/// A failed decode is not cached; the next read tries again.
	pub fn get(&self, field: &str) -> Result<&NativeValue, FieldError> {
		let unknown = || FieldError::UnknownField {
			event: self.layout.event.clone(),
			field: field.to_string(),
		};
		let slot_index = self.layout.slot(field).ok_or_else(unknown)?;
		let slot = self.slots.get(slot_index).ok_or_else(unknown)?;
		let expected = &self.layout.types[slot_index];

		slot.value.get_or_try_init(|| {
			let value = self
				.value_decoder
				.decode(&slot.raw)
				.map_err(|source| FieldError::Decode {
					field: field.to_string(),
					source,
				})?;
			if !expected.accepts(&value) {
				return Err(FieldError::TypeMismatch {
					field: field.to_string(),
					expected: expected.clone(),
					found: value.kind(),
				});
			}
			Ok(value)
		})
	}

	/// Materializes every field into a JSON object keyed by field name.
	pub fn to_json(&self) -> Result<Value, FieldError> {
		let mut fields = Map::new();
		for name in self.field_names() {
			fields.insert(name.to_string(), self.get(name)?.to_json());
		}
		Ok(Value::Object(fields))
	}
}

impl fmt::Debug for DecodedEvent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut fields = f.debug_map();
		for (name, slot) in self.layout.names.iter().zip(&self.slots) {
			match slot.value.get() {
				Some(value) => fields.entry(name, value),
				None => fields.entry(name, &slot.raw),
			};
		}
		fields.finish()
	}
}
