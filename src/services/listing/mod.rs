//! Loading contract interface listings.
//!
//! A listing is the list of `ScSpecEntry` values a contract publishes. It can
//! be read from a compiled contract (the `contractspecv0` custom section), a
//! JSON array of entries, or base64 XDR entries, one per line.

mod error;

pub use error::ListingError;

use soroban_spec::read;
use std::{collections::HashMap, fs, path::Path};
use stellar_xdr::curr::{Limits, ReadXdr, ScSpecEntry};
use tracing::debug;

use crate::models::ContractListing;

const WASM_MAGIC: &[u8] = b"\0asm";

/// Format of a listing source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingFormat {
	Wasm,
	Json,
	Base64,
}

impl ListingFormat {
	/// Guesses the format from the leading bytes of the content.
	pub fn detect(content: &[u8]) -> Self {
		if content.starts_with(WASM_MAGIC) {
			return ListingFormat::Wasm;
		}
		let first = content.iter().find(|b| !b.is_ascii_whitespace());
		match first {
			Some(b'[') => ListingFormat::Json,
			_ => ListingFormat::Base64,
		}
	}

	fn as_str(&self) -> &'static str {
		match self {
			ListingFormat::Wasm => "wasm",
			ListingFormat::Json => "json",
			ListingFormat::Base64 => "base64",
		}
	}
}

/// Reads the spec entries embedded in a compiled contract.
pub fn load_listing_from_wasm(wasm: &[u8]) -> Result<ContractListing, ListingError> {
	read::from_wasm(wasm)
		.map(ContractListing::from)
		.map_err(|e| {
			ListingError::parse_error(
				format!("Failed to read contract spec from WASM: {}", e),
				None,
				Some(HashMap::from([("format".to_string(), "wasm".to_string())])),
			)
		})
}

/// Parses a JSON array of spec entries.
pub fn load_listing_from_json(json: &str) -> Result<ContractListing, ListingError> {
	serde_json::from_str::<Vec<ScSpecEntry>>(json)
		.map(ContractListing::from)
		.map_err(|e| {
			ListingError::parse_error(
				"Failed to parse contract spec JSON",
				Some(Box::new(e)),
				Some(HashMap::from([("format".to_string(), "json".to_string())])),
			)
		})
}

/// Parses base64 XDR spec entries, one per non-empty line.
pub fn load_listing_from_base64(text: &str) -> Result<ContractListing, ListingError> {
	let mut entries = Vec::new();
	for (line_no, line) in text.lines().enumerate() {
		let line = line.trim();
		if line.is_empty() {
			continue;
		}
		let entry = ScSpecEntry::from_xdr_base64(line, Limits::none()).map_err(|e| {
			ListingError::parse_error(
				"Failed to decode spec entry",
				Some(Box::new(e)),
				Some(HashMap::from([
					("format".to_string(), "base64".to_string()),
					("line".to_string(), (line_no + 1).to_string()),
				])),
			)
		})?;
		entries.push(entry);
	}
	Ok(ContractListing::from(entries))
}

/// Loads a listing from raw content of a known format.
pub fn load_listing(content: &[u8], format: ListingFormat) -> Result<ContractListing, ListingError> {
	match format {
		ListingFormat::Wasm => load_listing_from_wasm(content),
		ListingFormat::Json | ListingFormat::Base64 => {
			let text = std::str::from_utf8(content).map_err(|e| {
				ListingError::parse_error(
					"Listing is not valid UTF-8",
					Some(Box::new(e)),
					Some(HashMap::from([(
						"format".to_string(),
						format.as_str().to_string(),
					)])),
				)
			})?;
			if format == ListingFormat::Json {
				load_listing_from_json(text)
			} else {
				load_listing_from_base64(text)
			}
		}
	}
}

/// Reads a listing file, detecting its format from the content.
pub fn load_listing_from_file(path: impl AsRef<Path>) -> Result<ContractListing, ListingError> {
	let path = path.as_ref();
	let content = fs::read(path).map_err(|e| {
		ListingError::file_error(
			"Failed to read listing file",
			Some(Box::new(e)),
			Some(HashMap::from([(
				"path".to_string(),
				path.display().to_string(),
			)])),
		)
	})?;

	let format = ListingFormat::detect(&content);
	debug!(
		path = %path.display(),
		format = format.as_str(),
		bytes = content.len(),
		"Loading listing"
	);
	load_listing(&content, format)
}
