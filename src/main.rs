//! Client entrypoint for the CSR build.

// Bin target reuses lib deps, silence noisy lint.
#![allow(unused_crate_dependencies)]

use log::error;
use prereq_tree::{init_logging, run};

fn main() {
	init_logging();

	if let Err(e) = run() {
		error!("prereq-tree: {}", e);
	}
}
