//! Soroban event decoder command line entry point.
//!
//! The binary works on local files only:
//! - `events` lists the events a contract declares, with the native type of
//!   every field and the rules a raw event must satisfy to match
//! - `decode` validates a raw contract event against a contract's events and
//!   prints its fields as JSON
//!
//! Logging is configured from the environment (see [`LoggingConfig`]); the
//! `--log-*` flags override it.

pub mod models;
pub mod services;
pub mod utils;

use crate::{
	models::{RawEventRecord, RpcEvent},
	services::{
		decoder::{DecodedEvent, EventCatalog, EventDecoder},
		listing::load_listing_from_file,
	},
	utils::{
		compact_base64,
		logging::{error::format_error_chain, setup_logging, LogMode, LoggingConfig},
		parse_string_to_bytes_size,
	},
};

use anyhow::{anyhow, Context, Result};
use clap::{ArgGroup, Parser, Subcommand};
use dotenvy::dotenv_override;
use serde_json::{json, Value};
use std::{
	env::{set_var, var},
	fs,
	path::{Path, PathBuf},
};
use tracing::{error, info};

#[derive(Parser)]
#[command(
	name = "soroban-event-decoder",
	about = "Decodes Soroban contract events using the event definitions published in the contract's interface.",
	version
)]
struct Cli {
	/// Write logs to file instead of the console
	#[arg(long)]
	log_file: bool,

	/// Set log level (trace, debug, info, warn, error)
	#[arg(long, value_name = "LEVEL")]
	log_level: Option<String>,

	/// Path to store log files (default: logs/)
	#[arg(long, value_name = "PATH")]
	log_path: Option<String>,

	/// Maximum log file size before rolling (e.g., "1GB", "500MB", "1024KB")
	#[arg(long, value_name = "SIZE", value_parser = parse_string_to_bytes_size)]
	log_max_size: Option<u64>,

	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand)]
enum Command {
	/// Print the events declared in a contract interface
	Events {
		/// Compiled contract (.wasm), JSON spec entries, or base64 XDR entries
		#[arg(value_name = "LISTING")]
		listing: PathBuf,
	},

	/// Decode a raw contract event
	#[command(group(ArgGroup::new("input").required(true).args(["event_xdr", "event_json"])))]
	Decode {
		/// Compiled contract (.wasm), JSON spec entries, or base64 XDR entries
		#[arg(value_name = "LISTING")]
		listing: PathBuf,

		/// Base64 XDR `ContractEvent`
		#[arg(long, value_name = "BASE64")]
		event_xdr: Option<String>,

		/// RPC `getEvents` entry, or an array of them, as JSON
		#[arg(long, value_name = "FILE")]
		event_json: Option<PathBuf>,

		/// Decode as this event instead of matching on topics
		#[arg(long, value_name = "EVENT")]
		name: Option<String>,
	},
}

impl Cli {
	/// Apply CLI options to environment variables, overriding any existing values
	fn apply_to_env(&self) {
		// Reload environment variables from .env file
		dotenv_override().ok();

		if self.log_file {
			set_var("LOG_MODE", "file");
		}

		// Set log level from RUST_LOG if it exists
		if let Ok(level) = var("RUST_LOG") {
			set_var("LOG_LEVEL", level);
		}

		if let Some(level) = &self.log_level {
			set_var("LOG_LEVEL", level);
			set_var("RUST_LOG", level);
		}

		if let Some(path) = &self.log_path {
			set_var("LOG_DATA_DIR", path);
		}

		if let Some(max_size) = &self.log_max_size {
			set_var("LOG_MAX_SIZE", max_size.to_string());
		}
	}
}

fn main() {
	let cli = Cli::parse();
	cli.apply_to_env();

	let config = match LoggingConfig::from_env() {
		Ok(config) => config,
		Err(e) => {
			eprintln!("Invalid logging configuration: {}", e);
			std::process::exit(2);
		}
	};
	if let Err(e) = setup_logging(&config) {
		eprintln!("Failed to setup logging: {}", e);
	}

	let result = match cli.command {
		Command::Events { listing } => print_events(&listing),
		Command::Decode {
			listing,
			event_xdr,
			event_json,
			name,
		} => decode_events(&listing, event_xdr, event_json, name.as_deref()),
	};

	if let Err(e) = result {
		let chain = format_error_chain(&*e);
		error!(error = %chain, "Command failed");
		if config.mode == LogMode::File {
			eprintln!("{}", chain);
		}
		std::process::exit(1);
	}
}

fn load_catalog(path: &Path) -> Result<EventCatalog> {
	let listing = load_listing_from_file(path)
		.with_context(|| format!("Failed to load listing {}", path.display()))?;
	let catalog = EventCatalog::from_listing(&listing);
	info!(
		path = %path.display(),
		entries = listing.len(),
		events = catalog.len(),
		"Loaded contract interface"
	);
	Ok(catalog)
}

fn describe_event(decoder: &EventDecoder) -> Value {
	let descriptor = decoder.descriptor();
	let fields: Vec<Value> = descriptor
		.fields
		.iter()
		.zip(decoder.field_types())
		.map(|(field, (_, native))| {
			json!({
				"name": field.name,
				"location": field.location,
				"wire_type": field.type_.to_string(),
				"native_type": native.to_string(),
				"doc": field.doc,
			})
		})
		.collect();

	json!({
		"name": descriptor.name,
		"prefix_topics": descriptor.prefix_topics,
		"expected_topic_count": descriptor.expected_topic_count(),
		"payload_shape": descriptor.payload_shape,
		"fields": fields,
	})
}

fn print_events(path: &Path) -> Result<()> {
	let catalog = load_catalog(path)?;
	let events: Vec<Value> = catalog.decoders().map(describe_event).collect();
	println!("{}", serde_json::to_string_pretty(&events)?);
	Ok(())
}

fn read_records(event_xdr: Option<String>, event_json: Option<PathBuf>) -> Result<Vec<RawEventRecord>> {
	if let Some(xdr) = event_xdr {
		let record = RawEventRecord::from_contract_event_base64(&compact_base64(&xdr))
			.context("Failed to parse contract event XDR")?;
		return Ok(vec![record]);
	}

	let path = event_json.ok_or_else(|| anyhow!("either --event-xdr or --event-json is required"))?;
	let content = fs::read_to_string(&path)
		.with_context(|| format!("Failed to read {}", path.display()))?;
	let value: Value = serde_json::from_str(&content)
		.with_context(|| format!("Failed to parse {}", path.display()))?;
	let events: Vec<RpcEvent> = match value {
		Value::Array(_) => serde_json::from_value(value)?,
		other => vec![serde_json::from_value(other)?],
	};

	events
		.iter()
		.map(|event| {
			RawEventRecord::try_from(event)
				.with_context(|| format!("Failed to read RPC event {}", event.id))
		})
		.collect()
}

fn decoded_to_json(event: &DecodedEvent) -> Result<Value> {
	Ok(json!({
		"event": event.name(),
		"fields": event.to_json()?,
	}))
}

fn decode_events(
	listing: &Path,
	event_xdr: Option<String>,
	event_json: Option<PathBuf>,
	name: Option<&str>,
) -> Result<()> {
	let catalog = load_catalog(listing)?;
	let records = read_records(event_xdr, event_json)?;

	let mut decoded = Vec::with_capacity(records.len());
	for record in &records {
		let event = match name {
			Some(name) => catalog.decode_as(name, record)?,
			None => catalog.decode(record)?,
		};
		decoded.push(decoded_to_json(&event)?);
	}

	let output = match decoded.len() {
		1 => decoded.remove(0),
		_ => Value::Array(decoded),
	};
	println!("{}", serde_json::to_string_pretty(&output)?);
	Ok(())
}
