//! Decoding of opaque `ScVal`s into native values.
//!
//! The decoder state machine never looks inside an `ScVal` except for its
//! wire tag. Everything else goes through a [`ValueDecoder`], which callers
//! may replace; [`NativeValueDecoder`] is the default.

use alloy::primitives::{I256, U256};
use stellar_strkey::{
	ed25519::{MuxedAccount, PublicKey as StrkeyPublicKey},
	Contract,
};
use stellar_xdr::curr::{
	AccountId, Int128Parts, Int256Parts, Limits, PublicKey, ScAddress, ScVal, UInt128Parts,
	UInt256Parts, WriteXdr,
};

use crate::{models::NativeValue, services::decoder::ValueDecodeError};

/// Turns an opaque value into its native form.
///
/// Implementations must be safe to call from several threads at once.
pub trait ValueDecoder: Send + Sync {
	fn decode(&self, value: &ScVal) -> Result<NativeValue, ValueDecodeError>;
}

/// Default decoder
///
/// Integers up to 32 bits become numbers, wider ones decimal strings. Addresses
/// are strkey-encoded, strings and symbols must be valid UTF-8. Values with no
/// native counterpart are passed through as [`NativeValue::Raw`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NativeValueDecoder;

impl ValueDecoder for NativeValueDecoder {
	fn decode(&self, value: &ScVal) -> Result<NativeValue, ValueDecodeError> {
		decode_sc_val(value)
	}
}

/// Decodes an `ScVal` recursively.
pub fn decode_sc_val(val: &ScVal) -> Result<NativeValue, ValueDecodeError> {
	let value = match val {
		ScVal::Bool(b) => NativeValue::Bool(*b),
		ScVal::Void => NativeValue::Void,
		ScVal::U32(n) => NativeValue::Number(i64::from(*n)),
		ScVal::I32(n) => NativeValue::Number(i64::from(*n)),
		ScVal::U64(n) => NativeValue::BigInt(n.to_string()),
		ScVal::I64(n) => NativeValue::BigInt(n.to_string()),
		ScVal::Timepoint(t) => NativeValue::BigInt(t.0.to_string()),
		ScVal::Duration(d) => NativeValue::BigInt(d.0.to_string()),
		ScVal::U128(n) => NativeValue::BigInt(combine_u128(n)),
		ScVal::I128(n) => NativeValue::BigInt(combine_i128(n)),
		ScVal::U256(n) => NativeValue::BigInt(combine_u256(n)),
		ScVal::I256(n) => NativeValue::BigInt(combine_i256(n)),
		ScVal::Bytes(b) => NativeValue::Bytes(b.to_vec()),
		ScVal::String(s) => NativeValue::String(utf8("String", s.0.as_slice())?),
		ScVal::Symbol(s) => NativeValue::String(utf8("Symbol", s.0.as_slice())?),
		ScVal::Vec(None) => NativeValue::Vec(Vec::new()),
		ScVal::Vec(Some(vec)) => NativeValue::Vec(
			vec.0
				.iter()
				.map(decode_sc_val)
				.collect::<Result<Vec<_>, _>>()?,
		),
		ScVal::Map(None) => NativeValue::Map(Vec::new()),
		ScVal::Map(Some(map)) => NativeValue::Map(
			map.0
				.iter()
				.map(|entry| Ok((decode_sc_val(&entry.key)?, decode_sc_val(&entry.val)?)))
				.collect::<Result<Vec<_>, ValueDecodeError>>()?,
		),
		ScVal::Address(addr) => NativeValue::Address(encode_address(addr)?),
		other => {
			let tag = sc_val_tag(other);
			let xdr = other
				.to_xdr_base64(Limits::none())
				.map_err(|e| ValueDecodeError::Encode {
					tag,
					reason: e.to_string(),
				})?;
			NativeValue::Raw { tag, xdr }
		}
	};
	Ok(value)
}

/// Name of the wire tag of a value.
pub fn sc_val_tag(val: &ScVal) -> &'static str {
	#[allow(unreachable_patterns)]
	match val {
		ScVal::Bool(_) => "Bool",
		ScVal::Void => "Void",
		ScVal::Error(_) => "Error",
		ScVal::U32(_) => "U32",
		ScVal::I32(_) => "I32",
		ScVal::U64(_) => "U64",
		ScVal::I64(_) => "I64",
		ScVal::Timepoint(_) => "Timepoint",
		ScVal::Duration(_) => "Duration",
		ScVal::U128(_) => "U128",
		ScVal::I128(_) => "I128",
		ScVal::U256(_) => "U256",
		ScVal::I256(_) => "I256",
		ScVal::Bytes(_) => "Bytes",
		ScVal::String(_) => "String",
		ScVal::Symbol(_) => "Symbol",
		ScVal::Vec(_) => "Vec",
		ScVal::Map(_) => "Map",
		ScVal::Address(_) => "Address",
		ScVal::ContractInstance(_) => "ContractInstance",
		ScVal::LedgerKeyContractInstance => "LedgerKeyContractInstance",
		ScVal::LedgerKeyNonce(_) => "LedgerKeyNonce",
		_ => "Other",
	}
}

fn utf8(tag: &'static str, bytes: &[u8]) -> Result<String, ValueDecodeError> {
	std::str::from_utf8(bytes)
		.map(str::to_string)
		.map_err(|e| ValueDecodeError::InvalidUtf8 {
			tag,
			reason: e.to_string(),
		})
}

/// Strkey rendering of an address: `G…` accounts, `C…` contracts, `M…` muxed accounts.
pub fn encode_address(addr: &ScAddress) -> Result<String, ValueDecodeError> {
	#[allow(unreachable_patterns)]
	match addr {
		ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(key))) => {
			Ok(StrkeyPublicKey(key.0).to_string())
		}
		ScAddress::Contract(contract_id) => Ok(Contract(contract_id.0 .0).to_string()),
		ScAddress::MuxedAccount(muxed) => Ok(MuxedAccount {
			ed25519: muxed.ed25519.0,
			id: muxed.id,
		}
		.to_string()),
		_ => Err(ValueDecodeError::Unsupported {
			tag: "Address".to_string(),
		}),
	}
}

/// Decimal rendering of a 128-bit unsigned integer.
pub fn combine_u128(n: &UInt128Parts) -> String {
	(((n.hi as u128) << 64) | (n.lo as u128)).to_string()
}

/// Decimal rendering of a 128-bit signed integer.
pub fn combine_i128(n: &Int128Parts) -> String {
	(((n.hi as i128) << 64) | (n.lo as i128)).to_string()
}

/// Decimal rendering of a 256-bit unsigned integer.
pub fn combine_u256(n: &UInt256Parts) -> String {
	U256::from_limbs([n.lo_lo, n.lo_hi, n.hi_lo, n.hi_hi]).to_string()
}

/// Decimal rendering of a 256-bit signed integer; `hi_hi` carries the sign.
pub fn combine_i256(n: &Int256Parts) -> String {
	let raw = U256::from_limbs([n.lo_lo, n.lo_hi, n.hi_lo, n.hi_hi as u64]);
	I256::from_raw(raw).to_string()
}
