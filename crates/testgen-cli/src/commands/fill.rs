// SPDX-License-Identifier: GPL-3.0

use crate::ChainArgs;
use anyhow::Result;
use clap::Args;
use std::{fs, path::PathBuf};
use testgen_chain::{send_graphql_request, NodeClient};

#[derive(Args)]
pub(crate) struct FillArgs {
	/// Path to the node binary.
	#[arg(short, long, default_value = "geth")]
	bin: PathBuf,
	/// Path to the request file.
	#[arg(short, long, default_value = "request.gql")]
	request: PathBuf,
	/// Path to the response file.
	#[arg(short = 's', long, default_value = "response.gql")]
	response: PathBuf,
	/// Verbosity of the node.
	#[arg(short, long, default_value_t = 3)]
	verbosity: u8,
}

impl FillArgs {
	/// Executes the command.
	pub(crate) async fn execute(self, chain: &ChainArgs) -> Result<()> {
		let request = fs::read_to_string(&self.request)?;
		let mut client = NodeClient::new(&self.bin, &chain.genesis, &chain.chain, self.verbosity)?;
		client.start()?;
		client.wait_until_ready().await;

		// Tear the node down before surfacing any query error.
		let response = send_graphql_request(&client.graphql_addr(), &request).await;
		client.close()?;

		fs::write(&self.response, response?)?;
		println!("Wrote response to {}", self.response.display());
		Ok(())
	}
}
