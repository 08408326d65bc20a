// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue
// File: hash.rs
// Author: hashvalue maintainers

use digest::consts::{U32, U48, U64};
use digest::{Digest, DynDigest};
use std::fmt;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use strum::{EnumIter, IntoEnumIterator};

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Digest algorithms known to the registry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, EnumIter)]
pub enum HashAlgorithm {
	Md5,
	Sha1,
	Sha2_224,
	Sha2_256,
	Sha2_384,
	Sha2_512,
	Sha2_512_224,
	Sha2_512_256,
	Sha3_224,
	#[default]
	Sha3_256,
	Sha3_384,
	Sha3_512,
	Blake2b256,
	Blake2b384,
	Blake2b512,
	Blake2s256,
}

impl HashAlgorithm {
	/// Canonical name as accepted on the command line.
	pub fn name(self) -> &'static str {
		match self {
			Self::Md5 => "md5",
			Self::Sha1 => "sha1",
			Self::Sha2_224 => "sha2-224",
			Self::Sha2_256 => "sha2-256",
			Self::Sha2_384 => "sha2-384",
			Self::Sha2_512 => "sha2-512",
			Self::Sha2_512_224 => "sha2-512_224",
			Self::Sha2_512_256 => "sha2-512_256",
			Self::Sha3_224 => "sha3-224",
			Self::Sha3_256 => "sha3-256",
			Self::Sha3_384 => "sha3-384",
			Self::Sha3_512 => "sha3-512",
			Self::Blake2b256 => "blake2b-256",
			Self::Blake2b384 => "blake2b-384",
			Self::Blake2b512 => "blake2b-512",
			Self::Blake2s256 => "blake2s-256",
		}
	}

	/// Looks up an algorithm by name. Surrounding whitespace and case are
	/// ignored; an unknown name is reported as given.
	pub fn from_name(name: &str) -> Result<Self, HashError> {
		let normalized = name.trim().to_lowercase();
		Self::iter()
			.find(|algorithm| algorithm.name() == normalized)
			.ok_or_else(|| HashError::UnknownAlgorithm {
				name: name.to_string(),
			})
	}

	/// All canonical names, sorted.
	pub fn known_names() -> Vec<&'static str> {
		let mut names: Vec<&'static str> =
			Self::iter().map(Self::name).collect();
		names.sort_unstable();
		names
	}

	/// Size of the produced digest in bytes.
	pub fn digest_len(self) -> usize {
		match self {
			Self::Md5 => 16,
			Self::Sha1 => 20,
			Self::Sha2_224 | Self::Sha2_512_224 | Self::Sha3_224 => 28,
			Self::Sha2_256
			| Self::Sha2_512_256
			| Self::Sha3_256
			| Self::Blake2b256
			| Self::Blake2s256 => 32,
			Self::Sha2_384 | Self::Sha3_384 | Self::Blake2b384 => 48,
			Self::Sha2_512 | Self::Sha3_512 | Self::Blake2b512 => 64,
		}
	}

	fn create_digest(self) -> Box<dyn DynDigest> {
		match self {
			Self::Md5 => Box::new(md5::Md5::new()),
			Self::Sha1 => Box::new(sha1::Sha1::new()),
			Self::Sha2_224 => Box::new(sha2::Sha224::new()),
			Self::Sha2_256 => Box::new(sha2::Sha256::new()),
			Self::Sha2_384 => Box::new(sha2::Sha384::new()),
			Self::Sha2_512 => Box::new(sha2::Sha512::new()),
			Self::Sha2_512_224 => Box::new(sha2::Sha512_224::new()),
			Self::Sha2_512_256 => Box::new(sha2::Sha512_256::new()),
			Self::Sha3_224 => Box::new(sha3::Sha3_224::new()),
			Self::Sha3_256 => Box::new(sha3::Sha3_256::new()),
			Self::Sha3_384 => Box::new(sha3::Sha3_384::new()),
			Self::Sha3_512 => Box::new(sha3::Sha3_512::new()),
			Self::Blake2b256 => Box::new(blake2::Blake2b::<U32>::new()),
			Self::Blake2b384 => Box::new(blake2::Blake2b::<U48>::new()),
			Self::Blake2b512 => Box::new(blake2::Blake2b::<U64>::new()),
			Self::Blake2s256 => Box::new(blake2::Blake2s256::new()),
		}
	}
}

impl fmt::Display for HashAlgorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.name())
	}
}

/// Error type for digest lookups and file hashing.
#[derive(Debug)]
pub enum HashError {
	UnknownAlgorithm { name: String },
	Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for HashError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::UnknownAlgorithm { name } => {
				write!(f, "Invalid hash algorithm: '{}'", name)
			}
			Self::Io { path, source } => write!(
				f,
				"error reading file '{}': {}",
				path.display(),
				source
			),
		}
	}
}

impl std::error::Error for HashError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self {
			Self::Io { source, .. } => Some(source),
			_ => None,
		}
	}
}

/// A reusable hasher for one algorithm. Each call finalizes and resets.
#[derive(Clone)]
pub struct DigestEngine {
	algorithm: HashAlgorithm,
	digest: Box<dyn DynDigest>,
}

impl DigestEngine {
	pub fn new(algorithm: HashAlgorithm) -> Self {
		Self {
			algorithm,
			digest: algorithm.create_digest(),
		}
	}

	pub fn algorithm(&self) -> HashAlgorithm {
		self.algorithm
	}

	pub fn digest_bytes(&mut self, data: &[u8]) -> Vec<u8> {
		self.digest.update(data);
		self.digest.finalize_reset().to_vec()
	}

	/// Streams `reader` through the digest until EOF.
	pub fn digest_reader<R: Read>(
		&mut self,
		mut reader: R,
	) -> io::Result<Vec<u8>> {
		let mut buffer = vec![0; READ_BUFFER_SIZE];
		loop {
			let count = match reader.read(&mut buffer) {
				Ok(0) => break,
				Ok(count) => count,
				Err(e) if e.kind() == io::ErrorKind::Interrupted => {
					continue
				}
				Err(e) => {
					self.digest.reset();
					return Err(e);
				}
			};
			self.digest.update(&buffer[..count]);
		}
		Ok(self.digest.finalize_reset().to_vec())
	}

	pub fn digest_file(
		&mut self,
		path: &Path,
	) -> Result<Vec<u8>, HashError> {
		let to_error = |source| HashError::Io {
			path: path.to_path_buf(),
			source,
		};
		let file = std::fs::File::open(path).map_err(to_error)?;
		self.digest_reader(file).map_err(to_error)
	}
}
