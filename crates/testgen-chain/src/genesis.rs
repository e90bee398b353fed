// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use alloy_genesis::Genesis;
use std::{fs::File, io::BufReader, path::Path};

/// Reads a genesis specification from a JSON file.
///
/// # Arguments
/// * `path` - Location of the genesis file.
pub fn read_genesis(path: &Path) -> Result<Genesis, Error> {
	let file = File::open(path)?;
	Ok(serde_json::from_reader(BufReader::new(file))?)
}
