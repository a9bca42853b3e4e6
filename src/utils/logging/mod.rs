//! ## Sets up logging by reading configuration from environment variables.
//!
//! Environment variables used:
//! - LOG_MODE: "stdout" (default) or "file"
//! - LOG_LEVEL: log level ("trace", "debug", "info", "warn", "error"); default is "info"
//! - LOG_DATA_DIR: directory for log files; default is "logs/"
//! - LOG_MAX_SIZE: maximum size of log files in bytes; default is 1GB

pub mod error;

use chrono::Utc;
use regex::Regex;
use std::{
	env,
	fs::{create_dir_all, metadata},
	path::{Path, PathBuf},
	sync::OnceLock,
};
use tracing::{debug, Subscriber};
use tracing_subscriber::{
	filter::EnvFilter,
	fmt::{
		self,
		format::Writer,
		FmtContext, FormatEvent, FormatFields,
	},
	prelude::*,
	registry::LookupSpan,
};

const DEFAULT_LOG_DIR: &str = "logs/";
const DEFAULT_MAX_SIZE: u64 = 1_073_741_824;
const LOG_FILE_NAME: &str = "decoder.log";

/// Where log lines are written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogMode {
	Stdout,
	File,
}

/// Logging settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
	pub mode: LogMode,
	pub level: tracing::Level,
	pub data_dir: String,
	pub max_size: u64,
}

impl Default for LoggingConfig {
	fn default() -> Self {
		Self {
			mode: LogMode::Stdout,
			level: tracing::Level::INFO,
			data_dir: DEFAULT_LOG_DIR.to_string(),
			max_size: DEFAULT_MAX_SIZE,
		}
	}
}

impl LoggingConfig {
	/// Reads `LOG_MODE`, `LOG_LEVEL`, `LOG_DATA_DIR` and `LOG_MAX_SIZE`.
	///
	/// Unknown modes and levels fall back to the defaults; an unparsable
	/// `LOG_MAX_SIZE` is an error.
	pub fn from_env() -> Result<Self, String> {
		let mode = match env::var("LOG_MODE") {
			Ok(mode) if mode.eq_ignore_ascii_case("file") => LogMode::File,
			_ => LogMode::Stdout,
		};
		let level = env::var("LOG_LEVEL")
			.map(|level| parse_level(&level))
			.unwrap_or(tracing::Level::INFO);
		let data_dir = env::var("LOG_DATA_DIR").unwrap_or_else(|_| DEFAULT_LOG_DIR.to_string());
		let max_size = match env::var("LOG_MAX_SIZE") {
			Ok(size) => size
				.parse::<u64>()
				.map_err(|_| format!("LOG_MAX_SIZE must be a valid u64 if set, got '{}'", size))?,
			Err(_) => DEFAULT_MAX_SIZE,
		};

		Ok(Self {
			mode,
			level,
			data_dir,
			max_size,
		})
	}

	/// Base path of the log file inside the data directory.
	pub fn base_file_path(&self) -> String {
		format!("{}/{}", self.data_dir.trim_end_matches('/'), LOG_FILE_NAME)
	}
}

fn parse_level(level: &str) -> tracing::Level {
	match level.to_lowercase().as_str() {
		"trace" => tracing::Level::TRACE,
		"debug" => tracing::Level::DEBUG,
		"warn" => tracing::Level::WARN,
		"error" => tracing::Level::ERROR,
		_ => tracing::Level::INFO,
	}
}

/// Formatter wrapper that removes ANSI escape codes, used for file output
struct StripAnsiFormatter<T> {
	inner: T,
}

impl<S, N, T> FormatEvent<S, N> for StripAnsiFormatter<T>
where
	S: Subscriber + for<'a> LookupSpan<'a>,
	N: for<'a> FormatFields<'a> + 'static,
	T: FormatEvent<S, N>,
{
	fn format_event(
		&self,
		ctx: &FmtContext<'_, S, N>,
		mut writer: Writer<'_>,
		event: &tracing::Event<'_>,
	) -> std::fmt::Result {
		let mut buf = String::new();
		self.inner.format_event(ctx, Writer::new(&mut buf), event)?;
		write!(writer, "{}", strip_ansi_escapes(&buf))
	}
}

fn strip_ansi_escapes(s: &str) -> String {
	static ANSI: OnceLock<Regex> = OnceLock::new();
	let re = ANSI.get_or_init(|| {
		Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]").expect("ANSI escape pattern is valid")
	});
	re.replace_all(s, "").to_string()
}

/// Computes the path of a rolled log file: `decoder.log` becomes
/// `decoder-<date>.<index>.log`.
pub fn compute_rolled_file_path(base_file_path: &str, date_str: &str, index: u32) -> String {
	let trimmed = base_file_path
		.strip_suffix(".log")
		.unwrap_or(base_file_path);
	format!("{}-{}.{}.log", trimmed, date_str, index)
}

/// Moves to the next index while the candidate file is larger than `max_size`.
pub fn space_based_rolling(
	file_path: &str,
	base_file_path: &str,
	date_str: &str,
	max_size: u64,
) -> String {
	let mut final_path = file_path.to_string();
	let mut index = 1;
	while let Ok(metadata) = metadata(&final_path) {
		if metadata.len() <= max_size {
			break;
		}
		index += 1;
		final_path = compute_rolled_file_path(base_file_path, date_str, index);
	}
	final_path
}

fn create_log_format(with_ansi: bool) -> fmt::format::Format<fmt::format::Compact> {
	fmt::format()
		.with_level(true)
		.with_target(true)
		.with_thread_ids(false)
		.with_thread_names(false)
		.with_ansi(with_ansi)
		.compact()
}

/// Installs the global subscriber described by `config`.
pub fn setup_logging(config: &LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
	let subscriber =
		tracing_subscriber::registry().with(EnvFilter::new(config.level.to_string()));

	match config.mode {
		LogMode::File => {
			let base_file_path = config.base_file_path();
			let date_str = Utc::now().format("%Y-%m-%d").to_string();
			let time_based_path = compute_rolled_file_path(&base_file_path, &date_str, 1);

			if let Some(parent) = Path::new(&time_based_path).parent() {
				create_dir_all(parent)?;
			}

			let final_path = PathBuf::from(space_based_rolling(
				&time_based_path,
				&base_file_path,
				&date_str,
				config.max_size,
			));
			let file_appender = tracing_appender::rolling::never(
				final_path.parent().unwrap_or(Path::new(".")),
				final_path.file_name().unwrap_or_default(),
			);

			subscriber
				.with(
					fmt::layer()
						.event_format(StripAnsiFormatter {
							inner: create_log_format(false),
						})
						.with_writer(file_appender)
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;
		}
		LogMode::Stdout => {
			// Console logs go to stderr; stdout carries decoded output.
			subscriber
				.with(
					fmt::layer()
						.event_format(create_log_format(true))
						.with_writer(std::io::stderr)
						.fmt_fields(fmt::format::PrettyFields::new()),
				)
				.try_init()?;
		}
	}

	debug!(mode = ?config.mode, level = %config.level, "Logging is configured");
	Ok(())
}
