// SPDX-License-Identifier: GPL-3.0

use crate::{chain::Blockchain, errors::Error};
use alloy_consensus::{
	constants::EMPTY_OMMER_ROOT_HASH,
	proofs::{calculate_receipt_root, calculate_transaction_root, calculate_withdrawals_root},
	transaction::SignerRecoverable,
	Block, BlockBody, BlockHeader, Header, Receipt, ReceiptEnvelope, SignableTransaction,
	TxEip1559, TxEip4844, TxEnvelope,
};
use alloy_eips::{
	eip1559::BaseFeeParams,
	eip2930::{AccessList, AccessListItem},
	eip4844::DATA_GAS_PER_BLOB,
	eip4895::{Withdrawal, Withdrawals, GWEI_TO_WEI},
	eip7840::BlobParams,
};
use alloy_primitives::{address, b256, bytes, Address, Bytes, TxKind, B256, U256};
use alloy_signer::SignerSync;
use alloy_signer_local::PrivateKeySigner;

/// Well-known developer account used to sign the generated transactions.
const DEV_KEY: &str = "45a915e4d060149eb4365960e6a7a45f334393093061116b197e3240065ff2d8";
/// Destination contract of the generated transactions.
const DEST: Address = address!("6295ee1b4f6dd65047762f924ecd367c17eabf8f");
/// Recipient of generated withdrawal records.
const WITHDRAWAL_DEST: Address = address!("0000000000000000000000000000000000000dad");
/// Gas limit of each generated transaction.
const TX_GAS: u64 = 50_000;
/// Seconds between consecutive generated blocks.
const BLOCK_TIME: u64 = 10;

const GWEI: u128 = 1_000_000_000;

/// The transaction variant carried by a generated block.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TxVariant {
	/// An EIP-4844 blob transaction carrying two blob hashes.
	Blob,
	/// An EIP-1559 transaction with an access list on the destination contract.
	DynamicFee,
}

/// What each generated block carries.
#[derive(Clone, Debug)]
pub struct BlockRecipe {
	/// The transaction variant included in the block.
	pub tx: TxVariant,
	/// Whether a withdrawal record is attached to the block.
	pub withdrawal: bool,
}

/// Generates `count` blocks on top of the current chain head, each carrying one signed
/// transaction per the recipe. The blocks are returned without being inserted.
///
/// # Arguments
/// * `chain` - The chain to extend.
/// * `count` - The number of blocks to generate.
/// * `recipe` - What each block carries.
pub fn generate_blocks(
	chain: &Blockchain,
	count: u64,
	recipe: &BlockRecipe,
) -> Result<Vec<Block<TxEnvelope>>, Error> {
	let config = chain.config();
	let signer: PrivateKeySigner = DEV_KEY.parse()?;
	let mut nonce = next_nonce(chain, signer.address());
	let mut withdrawal_index = next_withdrawal_index(chain);
	let mut parent = chain.head().clone();

	let mut blocks = Vec::with_capacity(count as usize);
	for _ in 0..count {
		let timestamp = parent.timestamp + BLOCK_TIME;
		let Some(base_fee) = parent.next_block_base_fee(BaseFeeParams::ethereum()) else {
			return Err(Error::ForkNotActive { fork: "london" });
		};
		let shanghai = config.is_shanghai_active_at_timestamp(timestamp);
		let cancun = config.is_cancun_active_at_timestamp(timestamp);
		if recipe.withdrawal && !shanghai {
			return Err(Error::ForkNotActive { fork: "shanghai" });
		}
		if recipe.tx == TxVariant::Blob && !cancun {
			return Err(Error::ForkNotActive { fork: "cancun" });
		}

		let tx = match recipe.tx {
			TxVariant::Blob => sign_blob_tx(&signer, config.chain_id, nonce)?,
			TxVariant::DynamicFee => sign_dynamic_fee_tx(&signer, config.chain_id, nonce)?,
		};
		nonce += 1;

		let withdrawals = shanghai.then(|| {
			let mut withdrawals = Vec::new();
			if recipe.withdrawal {
				withdrawals.push(Withdrawal {
					index: withdrawal_index,
					validator_index: 0,
					address: WITHDRAWAL_DEST,
					amount: GWEI_TO_WEI,
				});
				withdrawal_index += 1;
			}
			Withdrawals::new(withdrawals)
		});

		// Execution is delegated to the consuming node, so the header commits to a single
		// successful receipt and carries the parent state root forward.
		let gas_used = TX_GAS;
		let receipt = Receipt { status: true.into(), cumulative_gas_used: gas_used, logs: vec![] };
		let receipts_root = calculate_receipt_root(&[match recipe.tx {
			TxVariant::Blob => ReceiptEnvelope::Eip4844(receipt.with_bloom()),
			TxVariant::DynamicFee => ReceiptEnvelope::Eip1559(receipt.with_bloom()),
		}]);

		let header = Header {
			parent_hash: parent.hash_slow(),
			ommers_hash: EMPTY_OMMER_ROOT_HASH,
			state_root: parent.state_root,
			transactions_root: calculate_transaction_root(std::slice::from_ref(&tx)),
			receipts_root,
			number: parent.number + 1,
			gas_limit: parent.gas_limit,
			gas_used,
			timestamp,
			base_fee_per_gas: Some(base_fee),
			withdrawals_root: withdrawals.as_ref().map(|w| calculate_withdrawals_root(w)),
			blob_gas_used: cancun.then(|| match recipe.tx {
				TxVariant::Blob => 2 * DATA_GAS_PER_BLOB,
				TxVariant::DynamicFee => 0,
			}),
			excess_blob_gas: cancun.then(|| {
				parent.next_block_excess_blob_gas(BlobParams::cancun()).unwrap_or_default()
			}),
			parent_beacon_block_root: cancun.then_some(B256::ZERO),
			..Default::default()
		};

		let block = Block {
			header,
			body: BlockBody { transactions: vec![tx], ommers: vec![], withdrawals },
		};
		parent = block.header.clone();
		blocks.push(block);
	}
	Ok(blocks)
}

fn sign_blob_tx(
	signer: &PrivateKeySigner,
	chain_id: u64,
	nonce: u64,
) -> Result<TxEnvelope, Error> {
	let tx = TxEip4844 {
		chain_id,
		nonce,
		gas_limit: TX_GAS,
		max_fee_per_gas: 3 * GWEI,
		max_priority_fee_per_gas: GWEI,
		to: DEST,
		value: U256::ZERO,
		access_list: AccessList::default(),
		blob_versioned_hashes: vec![
			b256!("0100000000000000000000000000000000000000000000000000000000000000"),
			b256!("0102000000000000000000000000000000000000000000000000000000000000"),
		],
		max_fee_per_blob_gas: GWEI,
		input: calldata(),
	};
	let signature = signer.sign_hash_sync(&tx.signature_hash())?;
	Ok(tx.into_signed(signature).into())
}

fn sign_dynamic_fee_tx(
	signer: &PrivateKeySigner,
	chain_id: u64,
	nonce: u64,
) -> Result<TxEnvelope, Error> {
	let tx = TxEip1559 {
		chain_id,
		nonce,
		gas_limit: TX_GAS,
		max_fee_per_gas: 3 * GWEI,
		max_priority_fee_per_gas: GWEI,
		to: TxKind::Call(DEST),
		value: U256::ZERO,
		access_list: AccessList(vec![AccessListItem {
			address: DEST,
			storage_keys: vec![B256::ZERO],
		}]),
		input: calldata(),
	};
	let signature = signer.sign_hash_sync(&tx.signature_hash())?;
	Ok(tx.into_signed(signature).into())
}

fn calldata() -> Bytes {
	bytes!("12a7b914")
}

// The engine has no account state, so the dev account's next nonce is the count of its prior
// transactions in the chain, recovered from signatures.
fn next_nonce(chain: &Blockchain, sender: Address) -> u64 {
	chain
		.blocks()
		.iter()
		.flat_map(|block| block.body.transactions.iter())
		.filter(|tx| tx.recover_signer().is_ok_and(|signer| signer == sender))
		.count() as u64
}

fn next_withdrawal_index(chain: &Blockchain) -> u64 {
	chain
		.blocks()
		.iter()
		.filter_map(|block| block.body.withdrawals.as_ref())
		.flat_map(|withdrawals| withdrawals.iter())
		.map(|withdrawal| withdrawal.index + 1)
		.max()
		.unwrap_or_default()
}
