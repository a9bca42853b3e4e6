//! Contract interface listings.

use serde::{Deserialize, Serialize};
use stellar_xdr::curr::ScSpecEntry;

/// Raw interface listing of a Soroban contract
///
/// This is the list of `ScSpecEntry` values found in the contract's
/// `contractspecv0` section, in their original order: functions, user-defined
/// types, errors and events alike.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Default)]
pub struct ContractListing(Vec<ScSpecEntry>);

impl ContractListing {
	pub fn entries(&self) -> &[ScSpecEntry] {
		&self.0
	}

	pub fn into_entries(self) -> Vec<ScSpecEntry> {
		self.0
	}

	/// Number of entries tagged as event definitions.
	pub fn event_count(&self) -> usize {
		self.0
			.iter()
			.filter(|entry| matches!(entry, ScSpecEntry::EventV0(_)))
			.count()
	}
}

impl From<Vec<ScSpecEntry>> for ContractListing {
	fn from(entries: Vec<ScSpecEntry>) -> Self {
		ContractListing(entries)
	}
}

impl std::ops::Deref for ContractListing {
	type Target = Vec<ScSpecEntry>;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
