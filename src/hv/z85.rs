// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue
// Module: z85
// Purpose: Z85 encoding as specified in https://rfc.zeromq.org/spec/32.

//! Encode-only Z85. Every 4 input bytes become 5 characters from an
//! 85-symbol alphabet. There is no padded variant: inputs must be a
//! multiple of 4 bytes long.

use std::fmt;

/// Number of characters in the encoding alphabet.
const CODE_SIZE: u32 = 85;

/// Number of source bytes that form one chunk.
pub const BYTE_CHUNK_SIZE: usize = 4;

/// Number of characters produced for one chunk.
const ENCODED_CHUNK_SIZE: usize = 5;

/// Largest length a Rust allocation can have.
const MAX_REPRESENTABLE_LENGTH: usize = isize::MAX as usize;

/// The Z85 alphabet. Index `i` is the character for base-85 digit `i`.
pub const ALPHABET: &[u8; 85] =
	b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ.-:+=^!/*?&<>()[]{}@%$#";

/// Reasons why a byte sequence can not be Z85 encoded.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Z85Error {
	/// The encoded length would not be representable.
	TooLong,
	/// The input length is not a multiple of the chunk size.
	InvalidLength { expected_multiple_of: usize },
}

impl fmt::Display for Z85Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::TooLong => write!(f, "input is too long"),
			Self::InvalidLength {
				expected_multiple_of,
			} => write!(
				f,
				"input length is not a multiple of {}",
				expected_multiple_of
			),
		}
	}
}

impl std::error::Error for Z85Error {}

/// Validates a source length and returns the length of its encoding.
pub fn encoded_len(source_len: usize) -> Result<usize, Z85Error> {
	if source_len > MAX_REPRESENTABLE_LENGTH / ENCODED_CHUNK_SIZE {
		return Err(Z85Error::TooLong);
	}

	if source_len % BYTE_CHUNK_SIZE != 0 {
		return Err(Z85Error::InvalidLength {
			expected_multiple_of: BYTE_CHUNK_SIZE,
		});
	}

	Ok(source_len + source_len / BYTE_CHUNK_SIZE)
}

/// Encodes `source` into a Z85 string.
///
/// The length of `source` must be a multiple of 4. An empty slice yields
/// an empty string.
pub fn encode(source: &[u8]) -> Result<String, Z85Error> {
	let mut result = vec![0u8; encoded_len(source.len())?];

	for (chunk, destination) in source
		.chunks_exact(BYTE_CHUNK_SIZE)
		.zip(result.chunks_exact_mut(ENCODED_CHUNK_SIZE))
	{
		let mut value =
			u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);

		// Most significant digit ends up in the first slot.
		for slot in destination.iter_mut().rev() {
			*slot = ALPHABET[(value % CODE_SIZE) as usize];
			value /= CODE_SIZE;
		}
	}

	// Every byte was taken from ALPHABET, which is plain ASCII.
	Ok(result.into_iter().map(char::from).collect())
}
