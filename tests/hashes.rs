// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue

use hashvalue::hv::hash::{DigestEngine, HashAlgorithm, HashError};
use hashvalue::hv::output::{assemble_lines, HexStyle, OutputEncoding, OutputPlan};
use hex_literal::hex;
use std::io::Write;
use tempfile::NamedTempFile;

const PHRASE: &str = "Hello, World!";

#[test]
fn file_digest_matches_text_digest() {
	let mut file = NamedTempFile::new().expect("create temp file");
	file.write_all(PHRASE.as_bytes()).expect("write temp file");

	let mut engine = DigestEngine::new(HashAlgorithm::Sha3_256);
	let from_file = engine.digest_file(file.path()).expect("file hashed");
	let from_text = engine.digest_bytes(PHRASE.as_bytes());
	assert_eq!(from_file, from_text);
	assert_eq!(
		from_file,
		hex!("1af17a664e3fa8e419b8ba05c2a173169df76162a5a286e0c405b460d478f7ef")
	);
}

#[test]
fn missing_file_reports_path() {
	let dir = tempfile::tempdir().expect("create temp dir");
	let path = dir.path().join("absent.txt");
	let err = DigestEngine::new(HashAlgorithm::Md5)
		.digest_file(&path)
		.expect_err("missing file");
	match &err {
		HashError::Io { path: reported, .. } => assert_eq!(reported, &path),
		other => panic!("unexpected error: {other:?}"),
	}
	assert!(err.to_string().starts_with("error reading file '"));
	assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn all_encodings_for_sha2_256() {
	let digest = DigestEngine::new(HashAlgorithm::Sha2_256)
		.digest_bytes(PHRASE.as_bytes());
	let plan = OutputPlan::new(
		vec![
			OutputEncoding::Z85,
			OutputEncoding::Base64,
			OutputEncoding::Base32,
			OutputEncoding::Hex,
		],
		true,
		HexStyle::default(),
	);
	let lines = assemble_lines(HashAlgorithm::Sha2_256, &digest, &plan)
		.expect("lines assembled");
	assert_eq!(
		lines,
		vec![
			"Hash  : sha2-256",
			"Hex   : DFFD6021BB2BD5B0AF676290809EC3A53191DD81C7F70A4B28688A362182986F",
			"Base32: 376WAIN3FPK3BL3HMKIIBHWDUUYZDXMBY73QUSZINCFDMIMCTBXQ",
			"Base64: 3/1gIbsr1bCvZ2KQgJ7DpTGR3YHH9wpLKGiKNiGCmG8",
			"Z85   : ?#c}aYdqBoUv?saFs:VPf{gpy:m/{lc$[F@a+D81",
		]
	);
}

#[test]
fn every_algorithm_digest_is_z85_encodable() {
	for name in HashAlgorithm::known_names() {
		let algorithm = HashAlgorithm::from_name(name).unwrap();
		let digest = DigestEngine::new(algorithm).digest_bytes(b"x");
		let encoded = OutputEncoding::Z85
			.encode(&digest, &HexStyle::default())
			.unwrap_or_else(|err| panic!("{name}: {err}"));
		assert_eq!(encoded.len(), digest.len() * 5 / 4);
	}
}
