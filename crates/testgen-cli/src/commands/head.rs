// SPDX-License-Identifier: GPL-3.0

use crate::ChainArgs;
use anyhow::Result;
use testgen_chain::Blockchain;

/// Validates the chain and prints the current head header as JSON.
pub(crate) fn execute(chain: &ChainArgs) -> Result<()> {
	let blockchain = Blockchain::open(&chain.genesis, &chain.chain)?;
	println!("{}", serde_json::to_string_pretty(blockchain.head())?);
	Ok(())
}
