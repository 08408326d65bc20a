// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue
// Module: output
// Purpose: Render digests as hex, base32, base64 and Z85 lines.

use crate::hv::hash::HashAlgorithm;
use crate::hv::z85::{self, Z85Error};
use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use std::fmt;

/// Label printed in front of the algorithm name.
pub const HASH_HEADER: &str = "Hash  : ";

/// Text encodings a digest can be printed in. The declaration order is
/// the order in which lines are printed.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum OutputEncoding {
	Hex,
	Base32,
	Base64,
	Z85,
}

impl OutputEncoding {
	pub fn header(self) -> &'static str {
		match self {
			Self::Hex => "Hex   : ",
			Self::Base32 => "Base32: ",
			Self::Base64 => "Base64: ",
			Self::Z85 => "Z85   : ",
		}
	}

	pub fn encode(
		self,
		digest: &[u8],
		hex_style: &HexStyle,
	) -> Result<String, OutputError> {
		Ok(match self {
			Self::Hex => hex_style.encode(digest),
			Self::Base32 => base32::encode(
				base32::Alphabet::Rfc4648 { padding: false },
				digest,
			),
			Self::Base64 => STANDARD_NO_PAD.encode(digest),
			Self::Z85 => z85::encode(digest)?,
		})
	}
}

impl fmt::Display for OutputEncoding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let label = match self {
			Self::Hex => "hex",
			Self::Base32 => "base32",
			Self::Base64 => "base64",
			Self::Z85 => "z85",
		};
		write!(f, "{}", label)
	}
}

/// Case of the letters `a`-`f` in hex output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LetterCase {
	Lower,
	#[default]
	Upper,
}

/// Formatting knobs for hex output.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HexStyle {
	pub separator: String,
	pub prefix: String,
	pub case: LetterCase,
}

impl HexStyle {
	pub fn encode(&self, digest: &[u8]) -> String {
		let per_byte = self.prefix.len() + 2 + self.separator.len();
		let mut result = String::with_capacity(digest.len() * per_byte);
		for (index, byte) in digest.iter().enumerate() {
			if index > 0 {
				result.push_str(&self.separator);
			}
			result.push_str(&self.prefix);
			let pair = match self.case {
				LetterCase::Lower => hex::encode([*byte]),
				LetterCase::Upper => hex::encode_upper([*byte]),
			};
			result.push_str(&pair);
		}
		result
	}
}

/// Which lines to print and how.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OutputPlan {
	encodings: Vec<OutputEncoding>,
	headers: bool,
	hex_style: HexStyle,
}

impl OutputPlan {
	/// Sorts and de-duplicates `encodings`; an empty selection means hex.
	pub fn new(
		mut encodings: Vec<OutputEncoding>,
		headers: bool,
		hex_style: HexStyle,
	) -> Self {
		if encodings.is_empty() {
			encodings.push(OutputEncoding::Hex);
		}
		encodings.sort_unstable();
		encodings.dedup();
		Self {
			encodings,
			headers,
			hex_style,
		}
	}

	pub fn encodings(&self) -> &[OutputEncoding] {
		&self.encodings
	}

	pub fn headers(&self) -> bool {
		self.headers
	}

	pub fn hex_style(&self) -> &HexStyle {
		&self.hex_style
	}
}

impl Default for OutputPlan {
	fn default() -> Self {
		Self::new(Vec::new(), true, HexStyle::default())
	}
}

/// Error type emitted while rendering output lines.
#[derive(Debug)]
pub enum OutputError {
	Z85(Z85Error),
}

impl fmt::Display for OutputError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Z85(err) => write!(f, "Z85 encoding failed: {}", err),
		}
	}
}

impl std::error::Error for OutputError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Z85(err) => Some(err),
		}
	}
}

impl From<Z85Error> for OutputError {
	fn from(err: Z85Error) -> Self {
		Self::Z85(err)
	}
}

/// Builds the printable lines for one digest: the algorithm name first,
/// then one line per selected encoding.
pub fn assemble_lines(
	algorithm: HashAlgorithm,
	digest: &[u8],
	plan: &OutputPlan,
) -> Result<Vec<String>, OutputError> {
	let header = |label: &str| {
		if plan.headers() {
			label.to_string()
		} else {
			String::new()
		}
	};

	let mut lines = Vec::with_capacity(plan.encodings().len() + 1);
	lines.push(format!("{}{}", header(HASH_HEADER), algorithm));
	for encoding in plan.encodings() {
		let encoded = encoding.encode(digest, plan.hex_style())?;
		lines.push(format!("{}{}", header(encoding.header()), encoded));
	}
	Ok(lines)
}

#[cfg(test)]
mod tests {
	use super::*;
	use hex_literal::hex;

	const DIGEST: [u8; 8] = hex!("864fd26fb559f75b");

	#[test]
	fn hex_defaults_to_upper_case_without_decoration() {
		assert_eq!(HexStyle::default().encode(&DIGEST), "864FD26FB559F75B");
	}

	#[test]
	fn hex_applies_prefix_separator_and_case() {
		let style = HexStyle {
			separator: ", ".to_string(),
			prefix: "0x".to_string(),
			case: LetterCase::Lower,
		};
		assert_eq!(style.encode(&DIGEST[..3]), "0x86, 0x4f, 0xd2");
		assert_eq!(style.encode(&[]), "");
	}

	#[test]
	fn base32_and_base64_are_unpadded() {
		let style = HexStyle::default();
		assert_eq!(
			OutputEncoding::Base32.encode(b"f", &style).unwrap(),
			"MY"
		);
		assert_eq!(
			OutputEncoding::Base64.encode(b"f", &style).unwrap(),
			"Zg"
		);
	}

	#[test]
	fn z85_failure_is_wrapped() {
		let err = OutputEncoding::Z85
			.encode(&[1, 2, 3], &HexStyle::default())
			.unwrap_err();
		assert!(matches!(
			err,
			OutputError::Z85(Z85Error::InvalidLength {
				expected_multiple_of: 4
			})
		));
		assert!(std::error::Error::source(&err).is_some());
	}

	#[test]
	fn plan_orders_and_deduplicates() {
		let plan = OutputPlan::new(
			vec![
				OutputEncoding::Z85,
				OutputEncoding::Hex,
				OutputEncoding::Z85,
				OutputEncoding::Base32,
			],
			true,
			HexStyle::default(),
		);
		assert_eq!(
			plan.encodings(),
			&[
				OutputEncoding::Hex,
				OutputEncoding::Base32,
				OutputEncoding::Z85
			]
		);
		assert_eq!(OutputPlan::default().encodings(), &[OutputEncoding::Hex]);
	}

	#[test]
	fn lines_with_and_without_headers() {
		let plan = OutputPlan::new(
			vec![OutputEncoding::Hex, OutputEncoding::Z85],
			true,
			HexStyle::default(),
		);
		assert!(plan.headers());
		let lines =
			assemble_lines(HashAlgorithm::Md5, &DIGEST, &plan).unwrap();
		assert_eq!(
			lines,
			vec![
				"Hash  : md5",
				"Hex   : 864FD26FB559F75B",
				"Z85   : HelloWorld"
			]
		);

		let bare = OutputPlan::new(
			vec![OutputEncoding::Z85],
			false,
			HexStyle::default(),
		);
		assert!(!bare.headers());
		let lines =
			assemble_lines(HashAlgorithm::Md5, &DIGEST, &bare).unwrap();
		assert_eq!(lines, vec!["md5", "HelloWorld"]);
	}
}
