// SPDX-License-Identifier: GPL-3.0

use crate::{errors::Error, genesis::read_genesis};
use alloy_consensus::{Block, Header, TxEnvelope};
use alloy_genesis::{ChainConfig, Genesis};
use alloy_rlp::{Decodable, Encodable};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use std::{
	fs::File,
	io::{Read, Write},
	path::Path,
};

/// An in-process chain instance: a genesis specification together with the blocks replayed from
/// a chain file. Block semantics (execution, consensus rules) are not validated here; only the
/// structural linkage between blocks is.
pub struct Blockchain {
	genesis: Genesis,
	blocks: Vec<Block<TxEnvelope>>,
}

impl Blockchain {
	/// Opens a chain by reading a genesis file and replaying the blocks of a chain file.
	///
	/// # Arguments
	/// * `genesis_path` - Location of the genesis file.
	/// * `chain_path` - Location of the chain file, a concatenated RLP stream of blocks.
	///   Transparently decompressed when the path ends in `.gz`.
	pub fn open(genesis_path: &Path, chain_path: &Path) -> Result<Self, Error> {
		let genesis = read_genesis(genesis_path)?;
		let data = read_chain_file(chain_path)?;

		let mut blocks = Vec::new();
		let mut buf = data.as_slice();
		while !buf.is_empty() {
			let block = Block::<TxEnvelope>::decode(&mut buf)?;
			if let Some(head) = blocks.last() {
				check_extends(head, &block)?;
			}
			blocks.push(block);
		}
		if blocks.is_empty() {
			return Err(Error::EmptyChain);
		}

		let chain = Self { genesis, blocks };
		log::info!(
			"imported {} blocks from {}, head is #{}",
			chain.blocks.len(),
			chain_path.display(),
			chain.head().number
		);
		Ok(chain)
	}

	/// The chain configuration from the genesis specification.
	pub fn config(&self) -> &ChainConfig {
		&self.genesis.config
	}

	/// The blocks of the chain, in ascending order.
	pub fn blocks(&self) -> &[Block<TxEnvelope>] {
		&self.blocks
	}

	/// The header of the current chain head.
	pub fn head(&self) -> &Header {
		// `open` rejects empty chain files, so there is always a last block
		let head = self.blocks.last().expect("chain is never empty");
		&head.header
	}

	/// Validates and appends blocks on top of the current head, returning how many were inserted.
	///
	/// # Arguments
	/// * `blocks` - The blocks to append, in ascending order.
	pub fn insert(&mut self, blocks: Vec<Block<TxEnvelope>>) -> Result<usize, Error> {
		let inserted = blocks.len();
		for block in blocks {
			check_extends(self.blocks.last().expect("chain is never empty"), &block)?;
			self.blocks.push(block);
		}
		Ok(inserted)
	}

	/// Serializes the whole chain back to a file as a concatenated RLP stream, gzip-compressed
	/// when the path ends in `.gz`.
	///
	/// # Arguments
	/// * `path` - Location of the output file.
	pub fn export(&self, path: &Path) -> Result<(), Error> {
		let mut out = Vec::new();
		for block in &self.blocks {
			block.encode(&mut out);
		}
		if is_gzipped(path) {
			let mut encoder = GzEncoder::new(File::create(path)?, Compression::default());
			encoder.write_all(&out)?;
			encoder.finish()?;
		} else {
			std::fs::write(path, &out)?;
		}
		log::info!("exported {} blocks to {}", self.blocks.len(), path.display());
		Ok(())
	}
}

fn check_extends(parent: &Block<TxEnvelope>, block: &Block<TxEnvelope>) -> Result<(), Error> {
	let (parent, header) = (&parent.header, &block.header);
	if header.parent_hash != parent.hash_slow() ||
		header.number != parent.number + 1 ||
		header.timestamp <= parent.timestamp
	{
		return Err(Error::BrokenLink { number: header.number });
	}
	Ok(())
}

fn is_gzipped(path: &Path) -> bool {
	path.extension().is_some_and(|extension| extension == "gz")
}

fn read_chain_file(path: &Path) -> Result<Vec<u8>, Error> {
	let mut data = Vec::new();
	let mut file = File::open(path)?;
	if is_gzipped(path) {
		GzDecoder::new(file).read_to_end(&mut data)?;
	} else {
		file.read_to_end(&mut data)?;
	}
	Ok(data)
}
