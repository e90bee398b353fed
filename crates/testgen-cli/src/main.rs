// SPDX-License-Identifier: GPL-3.0

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about = "Extend a blockchain for graphql testing")]
pub(crate) struct Cli {
	#[command(flatten)]
	chain: ChainArgs,
	#[command(subcommand)]
	command: Option<Command>,
}

/// Arguments shared by every command.
#[derive(Args)]
pub(crate) struct ChainArgs {
	/// Path to the genesis file.
	#[arg(short, long, global = true, default_value = "genesis.json")]
	pub(crate) genesis: PathBuf,
	/// Path to the chain file.
	#[arg(short, long, global = true, default_value = "chain.rlp")]
	pub(crate) chain: PathBuf,
	/// Path to the output file.
	#[arg(short, long, global = true, default_value = "newchain.rlp")]
	pub(crate) output: PathBuf,
}

#[derive(Subcommand)]
enum Command {
	/// Extend the chain with generated blocks and export it. Runs by default.
	#[clap(alias = "e")]
	Extend(commands::extend::ExtendArgs),
	/// Validate the chain and print the current head header.
	Head,
	/// Fill the response file for a graphql query served by a node.
	#[clap(alias = "f")]
	Fill(commands::fill::FillArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
	env_logger::init();
	let cli = Cli::parse();
	match cli.command {
		Some(Command::Extend(args)) => args.execute(&cli.chain),
		Some(Command::Head) => commands::head::execute(&cli.chain),
		Some(Command::Fill(args)) => args.execute(&cli.chain).await,
		None => commands::extend::ExtendArgs::default().execute(&cli.chain),
	}
}

#[test]
fn verify_cli() {
	// https://docs.rs/clap/latest/clap/_derive/_tutorial/chapter_4/index.html
	use clap::CommandFactory;
	Cli::command().debug_assert()
}
