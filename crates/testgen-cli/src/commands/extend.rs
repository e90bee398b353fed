// SPDX-License-Identifier: GPL-3.0

use crate::ChainArgs;
use anyhow::Result;
use clap::{Args, ValueEnum};
use testgen_chain::{generate_blocks, BlockRecipe, Blockchain, TxVariant};

#[derive(Args)]
pub(crate) struct ExtendArgs {
	/// Number of blocks to append.
	#[arg(short = 'n', long = "blocks", default_value_t = 1)]
	blocks: u64,
	/// Transaction variant carried by each appended block.
	#[arg(short, long, value_enum, default_value_t = TxType::Blob)]
	tx_type: TxType,
	/// Attach a withdrawal record to each appended block.
	#[arg(short, long)]
	withdrawal: bool,
}

impl Default for ExtendArgs {
	fn default() -> Self {
		Self { blocks: 1, tx_type: TxType::Blob, withdrawal: false }
	}
}

#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum TxType {
	/// An EIP-4844 blob transaction.
	Blob,
	/// An EIP-1559 transaction with an access list.
	DynamicFee,
}

impl From<TxType> for TxVariant {
	fn from(tx_type: TxType) -> Self {
		match tx_type {
			TxType::Blob => TxVariant::Blob,
			TxType::DynamicFee => TxVariant::DynamicFee,
		}
	}
}

impl ExtendArgs {
	/// Executes the command.
	pub(crate) fn execute(self, chain: &ChainArgs) -> Result<()> {
		let mut blockchain = Blockchain::open(&chain.genesis, &chain.chain)?;
		let recipe = BlockRecipe { tx: self.tx_type.into(), withdrawal: self.withdrawal };
		let blocks = generate_blocks(&blockchain, self.blocks, &recipe)?;
		let inserted = blockchain.insert(blocks)?;
		println!(
			"Inserted {inserted} blocks. New head is:\n{}",
			serde_json::to_string_pretty(blockchain.head())?
		);
		blockchain.export(&chain.output)?;
		Ok(())
	}
}
