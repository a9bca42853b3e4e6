//! Error types for interface listing loading.

use crate::utils::logging::error::{BoxedSource, ErrorContext, TraceableError};
use std::collections::HashMap;
use thiserror::Error as ThisError;

/// Represents errors that can occur while loading a contract interface listing
#[derive(ThisError, Debug)]
pub enum ListingError {
	/// The listing file could not be read
	#[error("File error: {0}")]
	FileError(ErrorContext),

	/// The listing content is not a valid spec
	#[error("Parse error: {0}")]
	ParseError(ErrorContext),
}

impl ListingError {
	pub fn file_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::FileError(ErrorContext::new_with_log(msg, source, metadata))
	}

	pub fn parse_error(
		msg: impl Into<String>,
		source: Option<BoxedSource>,
		metadata: Option<HashMap<String, String>>,
	) -> Self {
		Self::ParseError(ErrorContext::new_with_log(msg, source, metadata))
	}
}

impl TraceableError for ListingError {
	fn trace_id(&self) -> String {
		match self {
			Self::FileError(ctx) | Self::ParseError(ctx) => ctx.trace_id.clone(),
		}
	}
}
