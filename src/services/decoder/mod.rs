//! Event decoding.
//!
//! An [`EventDecoder`] is compiled from one event descriptor and validates raw
//! records against it. An [`EventCatalog`] holds the decoders of every event a
//! contract declares and routes records to the right one.

mod catalog;
mod decoded;
mod error;
mod machine;
mod value;

pub use catalog::EventCatalog;
pub use decoded::DecodedEvent;
pub use error::{CatalogError, DecodeStage, EventDecodeError, FieldError, ValueDecodeError};
pub use machine::EventDecoder;
pub use value::{
	combine_i128, combine_i256, combine_u128, combine_u256, decode_sc_val, encode_address,
	sc_val_tag, NativeValueDecoder, ValueDecoder,
};
