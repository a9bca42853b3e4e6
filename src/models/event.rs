//! Raw contract events.
//!
//! Note: [`RpcEvent`] follows the Stellar RPC `getEvents` response format:
//! <https://github.com/stellar/stellar-rpc/blob/main/cmd/stellar-rpc/internal/methods/get_events.go>

use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{ContractEvent, ContractEventBody, Limits, ReadXdr, ScVal};
use thiserror::Error as ThisError;

/// Errors raised while building a [`RawEventRecord`]
#[derive(ThisError, Debug)]
pub enum RecordError {
	/// The input was not valid XDR for the expected type
	#[error("Invalid event XDR: {0}")]
	Xdr(#[from] stellar_xdr::curr::Error),

	/// A required part of an RPC event is absent
	#[error("RPC event {id} has no {part}")]
	MissingPart { id: String, part: &'static str },
}

/// Topics and payload of one contract event, still XDR-encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEventRecord {
	pub topics: Vec<ScVal>,
	pub payload: ScVal,
}

impl RawEventRecord {
	pub fn new(topics: Vec<ScVal>, payload: ScVal) -> Self {
		Self { topics, payload }
	}

	/// Parses a base64 XDR `ContractEvent`.
	pub fn from_contract_event_base64(input: &str) -> Result<Self, RecordError> {
		let event = ContractEvent::from_xdr_base64(input.trim(), Limits::none())?;
		Ok(Self::from(&event))
	}
}

impl From<&ContractEvent> for RawEventRecord {
	fn from(event: &ContractEvent) -> Self {
		match &event.body {
			ContractEventBody::V0(body) => Self {
				topics: body.topics.iter().cloned().collect(),
				payload: body.data.clone(),
			},
		}
	}
}

impl TryFrom<&RpcEvent> for RawEventRecord {
	type Error = RecordError;

	fn try_from(event: &RpcEvent) -> Result<Self, Self::Error> {
		let topics = event
			.topic_xdr
			.as_ref()
			.ok_or_else(|| RecordError::MissingPart {
				id: event.id.clone(),
				part: "topic list",
			})?
			.iter()
			.map(|topic| ScVal::from_xdr_base64(topic, Limits::none()))
			.collect::<Result<Vec<_>, _>>()?;

		let value = event
			.value_xdr
			.as_ref()
			.ok_or_else(|| RecordError::MissingPart {
				id: event.id.clone(),
				part: "value",
			})?;
		let payload = ScVal::from_xdr_base64(value, Limits::none())?;

		Ok(Self { topics, payload })
	}
}

/// A contract event as returned by the Stellar RPC `getEvents` method
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RpcEvent {
	/// Type of the event
	#[serde(rename = "type")]
	pub event_type: String,

	/// Ledger sequence number containing this event
	pub ledger: u32,

	/// Timestamp when the ledger was closed
	#[serde(rename = "ledgerClosedAt")]
	pub ledger_closed_at: String,

	/// Contract address that emitted the event
	#[serde(rename = "contractId")]
	pub contract_id: String,

	/// Unique identifier for this event
	pub id: String,

	/// Whether the event was emitted during a successful contract call
	#[serde(rename = "inSuccessfulContractCall", default)]
	pub in_successful_contract_call: bool,

	/// Transaction hash that generated this event
	#[serde(rename = "txHash", default)]
	pub transaction_hash: String,

	/// Base64-encoded list of ScVals representing the event topics
	#[serde(rename = "topic", skip_serializing_if = "Option::is_none")]
	pub topic_xdr: Option<Vec<String>>,

	/// Base64-encoded ScVal representing the event value
	#[serde(rename = "value", skip_serializing_if = "Option::is_none")]
	pub value_xdr: Option<String>,
}
