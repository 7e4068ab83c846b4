//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use heart_pulse::{init_logging, start, when_ready};

fn main() {
	init_logging();
	when_ready(start);
}
