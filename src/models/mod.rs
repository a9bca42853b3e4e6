//! Domain models for contract events.
//!
//! This module contains the data structures the decoder works with:
//!
//! - `wire_type`: On-chain type descriptions of event fields
//! - `native`: Native type labels and decoded values
//! - `descriptor`: Event descriptors extracted from contract specs
//! - `event`: Raw event records and their sources
//! - `listing`: Contract interface listings

mod descriptor;
mod event;
mod listing;
mod native;
mod wire_type;

pub use descriptor::{EventDescriptor, EventField, FieldLocation, PayloadShape};
pub use event::{RawEventRecord, RecordError, RpcEvent};
pub use listing::ContractListing;
pub use native::{NativeType, NativeValue};
pub use wire_type::WireType;
