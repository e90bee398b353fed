// SPDX-License-Identifier: GPL-3.0

//! Fixtures shared across module tests.

use alloy_consensus::{constants::EMPTY_ROOT_HASH, Block, BlockBody, Header, TxEnvelope};
use alloy_eips::eip4895::Withdrawals;
use alloy_primitives::B256;
use alloy_rlp::Encodable;
use std::path::{Path, PathBuf};

/// A post-merge genesis with all forks up to cancun active from the start.
pub(crate) const GENESIS_JSON: &str = r#"{
  "config": {
    "chainId": 1337,
    "homesteadBlock": 0,
    "eip150Block": 0,
    "eip155Block": 0,
    "eip158Block": 0,
    "byzantiumBlock": 0,
    "constantinopleBlock": 0,
    "petersburgBlock": 0,
    "istanbulBlock": 0,
    "berlinBlock": 0,
    "londonBlock": 0,
    "mergeNetsplitBlock": 0,
    "shanghaiTime": 0,
    "cancunTime": 0,
    "terminalTotalDifficulty": 0,
    "terminalTotalDifficultyPassed": true
  },
  "nonce": "0x0",
  "timestamp": "0x0",
  "extraData": "0x",
  "gasLimit": "0x1c9c380",
  "difficulty": "0x0",
  "mixHash": "0x0000000000000000000000000000000000000000000000000000000000000000",
  "coinbase": "0x0000000000000000000000000000000000000000",
  "alloc": {
    "a94f5374fce5edbc8e2a8697c15331677e6ebf0b": {
      "balance": "0xc097ce7bc90715b34b9f1000000000"
    }
  }
}"#;

/// A structurally complete cancun block to seed a chain file with.
pub(crate) fn seed_block() -> Block<TxEnvelope> {
	let header = Header {
		number: 1,
		timestamp: 10,
		gas_limit: 30_000_000,
		base_fee_per_gas: Some(875_000_000),
		withdrawals_root: Some(EMPTY_ROOT_HASH),
		blob_gas_used: Some(0),
		excess_blob_gas: Some(0),
		parent_beacon_block_root: Some(B256::ZERO),
		..Default::default()
	};
	let body =
		BlockBody { transactions: vec![], ommers: vec![], withdrawals: Some(Withdrawals::default()) };
	Block { header, body }
}

/// Writes a genesis file and a single-block chain file, returning both paths.
pub(crate) fn write_fixtures(dir: &Path) -> (PathBuf, PathBuf) {
	let genesis = dir.join("genesis.json");
	std::fs::write(&genesis, GENESIS_JSON).expect("fixture write failed");

	let mut encoded = Vec::new();
	seed_block().encode(&mut encoded);
	let chain = dir.join("chain.rlp");
	std::fs::write(&chain, &encoded).expect("fixture write failed");
	(genesis, chain)
}
