// SPDX-License-Identifier: MIT OR Apache-2.0
// Project: hashvalue
// File: main.rs
// Author: hashvalue maintainers

use hashvalue::hv::app;

fn main() {
	std::process::exit(app::run());
}
