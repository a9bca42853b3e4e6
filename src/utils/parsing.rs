//! Parsing utilities for command-line input.

use byte_unit::Byte;
use std::str::FromStr;

/// Parses a human-readable size ("1GB", "500MB", "1024KiB") into bytes.
pub fn parse_string_to_bytes_size(s: &str) -> Result<u64, String> {
	Byte::from_str(s)
		.map(|byte| byte.as_u64())
		.map_err(|e| format!("Invalid size format: '{}'. Error: {}", s, e))
}

/// Strips whitespace, including embedded line breaks, from a base64 blob.
///
/// Base64 copied out of explorers and RPC responses is often wrapped.
pub fn compact_base64(input: &str) -> String {
	input.chars().filter(|c| !c.is_whitespace()).collect()
}
