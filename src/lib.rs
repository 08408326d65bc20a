// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue
// File: lib.rs
// Author: hashvalue maintainers

pub mod hv {
	pub mod app;
	pub mod hash;
	pub mod output;
	pub mod z85;
}
