// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue
// File: app.rs
// Author: hashvalue maintainers

use crate::hv::hash::{DigestEngine, HashAlgorithm, HashError};
use crate::hv::output::{
	assemble_lines, HexStyle, LetterCase, OutputEncoding, OutputError,
	OutputPlan,
};
use clap::error::ErrorKind;
use clap::{crate_name, Arg, ArgAction, ArgGroup, ArgMatches};
use colored::Colorize;
use log::{debug, info, LevelFilter};
use std::ffi::OsString;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

pub const EXIT_OK: i32 = 0;
pub const EXIT_PARAMETER_ERROR: i32 = 1;
pub const EXIT_PROCESSING_ERROR: i32 = 2;

/// Longest accepted `--separator` and `--prefix`, in bytes.
pub const MAX_HEX_PARAMETER_LEN: usize = 8;

const HELP_TEMPLATE: &str = "{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

/// Where the bytes to hash come from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum InputSource {
	Text(String),
	File(PathBuf),
}

/// Validated command line configuration.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
	pub input: InputSource,
	pub algorithm: HashAlgorithm,
	pub plan: OutputPlan,
	pub verbosity: u8,
}

#[derive(Debug)]
pub enum AppError {
	Usage(String),
	Hash(HashError),
	Output(OutputError),
	Io(io::Error),
}

impl AppError {
	pub fn exit_code(&self) -> i32 {
		match self {
			Self::Usage(_)
			| Self::Hash(HashError::UnknownAlgorithm { .. }) => {
				EXIT_PARAMETER_ERROR
			}
			_ => EXIT_PROCESSING_ERROR,
		}
	}

	fn is_usage(&self) -> bool {
		self.exit_code() == EXIT_PARAMETER_ERROR
	}
}

impl fmt::Display for AppError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Usage(message) => write!(f, "{}", message),
			Self::Hash(err @ HashError::UnknownAlgorithm { .. }) => {
				write!(f, "{}", err)
			}
			Self::Hash(err) => write!(f, "Error hashing data: {}", err),
			Self::Output(err) => write!(f, "Error printing result: {}", err),
			Self::Io(err) => write!(f, "Error writing output: {}", err),
		}
	}
}

impl std::error::Error for AppError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Usage(_) => None,
			Self::Hash(err) => Some(err),
			Self::Output(err) => Some(err),
			Self::Io(err) => Some(err),
		}
	}
}

impl From<HashError> for AppError {
	fn from(err: HashError) -> Self {
		Self::Hash(err)
	}
}

impl From<OutputError> for AppError {
	fn from(err: OutputError) -> Self {
		Self::Output(err)
	}
}

impl From<io::Error> for AppError {
	fn from(err: io::Error) -> Self {
		Self::Io(err)
	}
}

fn known_names_line() -> String {
	format!(
		"Valid hash algorithm names: {}",
		HashAlgorithm::known_names().join(", ")
	)
}

pub fn build_cli() -> clap::Command {
	clap::Command::new(crate_name!())
		.color(clap::ColorChoice::Never)
		.help_template(HELP_TEMPLATE)
		.bin_name(crate_name!())
		.args_override_self(true)
		.version(clap::crate_version!())
		.about("Compute the hash value of a text or a file and print it in various encodings")
		.after_help(known_names_line())
		.arg(
			Arg::new("hash")
				.short('a')
				.long("hash")
				.visible_alias("algorithm")
				.value_name("ALGORITHM")
				.help("Name of the hash algorithm")
				.default_value(HashAlgorithm::default().name()),
		)
		.arg(
			Arg::new("source")
				.short('s')
				.long("source")
				.value_name("TEXT")
				.help("Source text to hash (mutually exclusive with 'file')"),
		)
		.arg(
			Arg::new("file")
				.short('f')
				.long("file")
				.value_name("PATH")
				.help("Source file to hash (mutually exclusive with 'source')"),
		)
		.group(
			ArgGroup::new("input")
				.args(["source", "file"])
				.required(true),
		)
		.arg(
			Arg::new("separator")
				.long("separator")
				.value_name("TEXT")
				.help("Separator text between hex bytes"),
		)
		.arg(
			Arg::new("prefix")
				.long("prefix")
				.value_name("TEXT")
				.help("Prefix text in front of each hex byte"),
		)
		.arg(
			Arg::new("lower")
				.long("lower")
				.help("Use lower case for hex output")
				.conflicts_with("upper")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("upper")
				.long("upper")
				.help("Use upper case for hex output (default)")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("hex")
				.long("hex")
				.visible_alias("base16")
				.help("Encode hash in hex format (default, combinable with the other encodings)")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("base32")
				.long("base32")
				.help("Encode hash in base32 format")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("base64")
				.long("base64")
				.help("Encode hash in base64 format")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("z85")
				.long("z85")
				.help("Encode hash in Z85 format")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("no-headers")
				.long("no-headers")
				.alias("noheaders")
				.help("Do not print the type of the output in front of it")
				.action(ArgAction::SetTrue),
		)
		.arg(
			Arg::new("verbose")
				.short('v')
				.long("verbose")
				.help("Increase log output on stderr (repeatable)")
				.action(ArgAction::Count),
		)
}

fn hex_parameter(
	matches: &ArgMatches,
	name: &str,
) -> Result<String, AppError> {
	let value = matches
		.get_one::<String>(name)
		.cloned()
		.unwrap_or_default();
	if value.len() > MAX_HEX_PARAMETER_LEN {
		return Err(AppError::Usage(format!("{name} is too long")));
	}
	Ok(value)
}

/// Turns parsed arguments into validated [`Options`].
pub fn parse_options(matches: &ArgMatches) -> Result<Options, AppError> {
	let input = if let Some(source) = matches.get_one::<String>("source")
	{
		if source.is_empty() {
			return Err(AppError::Usage("Source is empty".to_string()));
		}
		InputSource::Text(source.clone())
	} else if let Some(file) = matches.get_one::<String>("file") {
		if file.is_empty() {
			return Err(AppError::Usage(
				"File name is empty".to_string(),
			));
		}
		InputSource::File(PathBuf::from(file))
	} else {
		return Err(AppError::Usage(
			"Specify either 'source' or 'file'".to_string(),
		));
	};

	let hex_style = HexStyle {
		separator: hex_parameter(matches, "separator")?,
		prefix: hex_parameter(matches, "prefix")?,
		case: if matches.get_flag("lower") {
			LetterCase::Lower
		} else {
			LetterCase::Upper
		},
	};

	let algorithm = HashAlgorithm::from_name(
		matches
			.get_one::<String>("hash")
			.map(String::as_str)
			.unwrap_or_default(),
	)?;

	let encodings = [
		("hex", OutputEncoding::Hex),
		("base32", OutputEncoding::Base32),
		("base64", OutputEncoding::Base64),
		("z85", OutputEncoding::Z85),
	]
	.into_iter()
	.filter(|(flag, _)| matches.get_flag(flag))
	.map(|(_, encoding)| encoding)
	.collect();

	Ok(Options {
		input,
		algorithm,
		plan: OutputPlan::new(
			encodings,
			!matches.get_flag("no-headers"),
			hex_style,
		),
		verbosity: matches.get_count("verbose"),
	})
}

/// Hashes the configured input and writes the result lines to `out`.
pub fn execute<W: Write>(
	options: &Options,
	out: &mut W,
) -> Result<(), AppError> {
	let mut engine = DigestEngine::new(options.algorithm);
	debug!("using hash algorithm {}", engine.algorithm());

	let digest = match &options.input {
		InputSource::Text(text) => {
			debug!("hashing {} bytes of source text", text.len());
			engine.digest_bytes(text.as_bytes())
		}
		InputSource::File(path) => {
			debug!("hashing file {}", path.display());
			engine.digest_file(path)?
		}
	};

	let encodings: Vec<String> = options
		.plan
		.encodings()
		.iter()
		.map(ToString::to_string)
		.collect();
	debug!(
		"printing {} byte digest as {}",
		digest.len(),
		encodings.join(", ")
	);

	for line in assemble_lines(options.algorithm, &digest, &options.plan)? {
		writeln!(out, "{}", line)?;
	}
	out.flush()?;
	info!("{} digest printed", options.algorithm);
	Ok(())
}

fn init_logger(verbosity: u8) {
	let level = match verbosity {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};
	let _ = env_logger::Builder::new()
		.filter_level(level)
		.parse_default_env()
		.try_init();
}

fn report_error<E: Write>(err: &mut E, error: &AppError) {
	let _ = writeln!(err, "{} {}", "error:".red().bold(), error);
	if error.is_usage() {
		let _ = writeln!(err);
		let _ = writeln!(err, "{}", build_cli().render_usage());
		let _ = writeln!(err);
		let _ = writeln!(err, "{}", known_names_line());
	}
}

/// Runs the program with explicit arguments and streams. Returns the
/// process exit code.
pub fn run_from<I, T, W, E>(args: I, out: &mut W, err: &mut E) -> i32
where
	I: IntoIterator<Item = T>,
	T: Into<OsString> + Clone,
	W: Write,
	E: Write,
{
	let matches = match build_cli().try_get_matches_from(args) {
		Ok(matches) => matches,
		Err(e) => {
			return match e.kind() {
				ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
					let _ = write!(out, "{}", e.render());
					EXIT_OK
				}
				_ => {
					let _ = write!(err, "{}", e.render());
					let _ = writeln!(err, "\n{}", known_names_line());
					EXIT_PARAMETER_ERROR
				}
			};
		}
	};

	init_logger(matches.get_count("verbose"));

	let result = parse_options(&matches)
		.and_then(|options| execute(&options, out));
	match result {
		Ok(()) => EXIT_OK,
		Err(error) => {
			report_error(err, &error);
			error.exit_code()
		}
	}
}

pub fn run() -> i32 {
	let stdout = io::stdout();
	let stderr = io::stderr();
	run_from(
		std::env::args_os(),
		&mut stdout.lock(),
		&mut stderr.lock(),
	)
}
