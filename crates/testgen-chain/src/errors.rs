// SPDX-License-Identifier: GPL-3.0

use std::process::ExitStatus;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("block {number} does not extend its parent")]
	BrokenLink { number: u64 },

	#[error("command `{command}` failed with {status}")]
	CommandFailed { command: String, status: ExitStatus },

	#[error("chain file contains no blocks")]
	EmptyChain,

	#[error("{fork} is not active at the chain head")]
	ForkNotActive { fork: &'static str },

	#[error("invalid genesis file: {0}")]
	Genesis(#[from] serde_json::Error),

	#[error("HTTP error: {0}")]
	HttpError(#[from] reqwest::Error),

	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),

	#[error("invalid chain file: {0}")]
	Rlp(#[from] alloy_rlp::Error),

	#[error("Signer error: {0}")]
	Signer(#[from] alloy_signer::Error),

	#[error("Signer key error: {0}")]
	SignerKey(#[from] alloy_signer_local::LocalSignerError),
}
