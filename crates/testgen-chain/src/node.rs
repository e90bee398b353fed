// SPDX-License-Identifier: GPL-3.0

use crate::errors::Error;
use std::{
	path::{Path, PathBuf},
	process::{Child, Command, Stdio},
	time::Duration,
};
use tempfile::TempDir;
use tokio::time::sleep;

const HOST: &str = "127.0.0.1";
const PORT: u16 = 9546;
const NETWORK_PORT: u16 = 30303;
const STARTUP: Duration = Duration::from_secs(5);

/// A wrapper around a node subprocess serving a GraphQL endpoint.
///
/// The node's data directory is a temporary location initialized with the genesis and the
/// provided chain file; it is removed again when the client is dropped.
pub struct NodeClient {
	binary: PathBuf,
	verbosity: u8,
	workdir: TempDir,
	process: Option<Child>,
}

impl NodeClient {
	/// Instantiates a new client by initializing a temporary data directory with the genesis
	/// file and importing the chain file into it.
	///
	/// # Arguments
	/// * `binary` - Path to the node binary. Can be the binary name itself if in PATH.
	/// * `genesis` - Path to the genesis file.
	/// * `chain` - Path to the chain file.
	/// * `verbosity` - Verbosity of the node. Its output is discarded when zero.
	pub fn new(binary: &Path, genesis: &Path, chain: &Path, verbosity: u8) -> Result<Self, Error> {
		let workdir = tempfile::Builder::new().prefix("graphql-testgen-").tempdir()?;
		let datadir = format!("--datadir={}", workdir.path().display());
		let (genesis, chain) = (genesis.display().to_string(), chain.display().to_string());

		run(binary, verbosity > 0, &[datadir.as_str(), "--gcmode=archive", "init", genesis.as_str()])?;
		run(binary, verbosity > 0, &[datadir.as_str(), "--gcmode=archive", "import", chain.as_str()])?;

		Ok(Self { binary: binary.to_path_buf(), verbosity, workdir, process: None })
	}

	/// Starts the node with its HTTP and GraphQL endpoints enabled, without waiting for the
	/// command to exit.
	pub fn start(&mut self) -> Result<(), Error> {
		log::info!("starting node");
		let mut command = Command::new(&self.binary);
		command
			.arg(format!("--datadir={}", self.workdir.path().display()))
			.arg(format!("--verbosity={}", self.verbosity))
			.arg(format!("--port={NETWORK_PORT}"))
			.arg("--gcmode=archive")
			.arg("--nodiscover")
			.arg("--http")
			.arg("--graphql")
			.arg(format!("--http.addr={HOST}"))
			.arg(format!("--http.port={PORT}"));
		if self.verbosity == 0 {
			command.stdout(Stdio::null()).stderr(Stdio::null());
		}
		self.process = Some(command.spawn()?);
		Ok(())
	}

	/// Waits until the node is ready to serve requests.
	pub async fn wait_until_ready(&self) {
		sleep(STARTUP).await;
	}

	/// The address where the node is serving its GraphQL endpoint.
	pub fn graphql_addr(&self) -> String {
		format!("http://{HOST}:{PORT}/graphql")
	}

	/// Closes the client, killing the node if it is still running.
	pub fn close(&mut self) -> Result<(), Error> {
		if let Some(mut process) = self.process.take() {
			process.kill()?;
			process.wait()?;
		}
		Ok(())
	}
}

impl Drop for NodeClient {
	fn drop(&mut self) {
		// The temporary data directory cannot be removed while the node still holds it open.
		if let Some(process) = self.process.as_mut() {
			let _ = process.kill();
			let _ = process.wait();
		}
	}
}

/// Sends a GraphQL query to the provided endpoint, returning the raw response body.
///
/// # Arguments
/// * `endpoint` - The GraphQL endpoint of a running node.
/// * `query` - The query to send, wrapped into a `{"query": …}` JSON request.
pub async fn send_graphql_request(endpoint: &str, query: &str) -> Result<String, Error> {
	let response = reqwest::Client::new()
		.post(endpoint)
		.json(&serde_json::json!({ "query": query }))
		.send()
		.await?;
	Ok(response.text().await?)
}

// Runs a command to completion, discarding its output unless verbose is set.
fn run(binary: &Path, verbose: bool, args: &[&str]) -> Result<(), Error> {
	log::debug!("running {} {}", binary.display(), args.join(" "));
	let mut command = Command::new(binary);
	command.args(args);
	if !verbose {
		command.stdout(Stdio::null()).stderr(Stdio::null());
	}
	let status = command.status()?;
	if !status.success() {
		return Err(Error::CommandFailed {
			command: format!("{} {}", binary.display(), args.join(" ")),
			status,
		});
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use anyhow::Result;

	#[test]
	fn graphql_addr_works() -> Result<()> {
		let temp_dir = tempfile::tempdir()?;
		let genesis = temp_dir.path().join("genesis.json");
		let chain = temp_dir.path().join("chain.rlp");
		std::fs::write(&genesis, "{}")?;
		std::fs::write(&chain, "")?;

		// `true` accepts any arguments, so initialization succeeds without a real node.
		let client = NodeClient::new(Path::new("true"), &genesis, &chain, 0)?;
		assert_eq!(client.graphql_addr(), "http://127.0.0.1:9546/graphql");
		Ok(())
	}

	#[test]
	fn new_fails_on_missing_binary() {
		let result =
			NodeClient::new(Path::new("/nonexistent/node"), Path::new("g"), Path::new("c"), 0);
		assert!(matches!(result, Err(Error::IO(_))));
	}

	#[test]
	fn new_propagates_command_failure() {
		let result = NodeClient::new(Path::new("false"), Path::new("g"), Path::new("c"), 0);
		assert!(matches!(result, Err(Error::CommandFailed { .. })));
	}

	#[test]
	fn close_without_start_is_noop() -> Result<()> {
		let temp_dir = tempfile::tempdir()?;
		let genesis = temp_dir.path().join("genesis.json");
		let chain = temp_dir.path().join("chain.rlp");
		std::fs::write(&genesis, "{}")?;
		std::fs::write(&chain, "")?;

		let mut client = NodeClient::new(Path::new("true"), &genesis, &chain, 0)?;
		client.close()?;
		Ok(())
	}

	#[tokio::test]
	async fn send_graphql_request_posts_query() -> Result<()> {
		let mut server = mockito::Server::new_async().await;
		let body = r#"{"data":{"block":{"number":2}}}"#;
		let mock = server
			.mock("POST", "/graphql")
			.match_header("content-type", "application/json")
			.match_body(mockito::Matcher::Json(
				serde_json::json!({ "query": "{ block { number } }" }),
			))
			.with_body(body)
			.create_async()
			.await;

		let endpoint = format!("{}/graphql", server.url());
		let response = send_graphql_request(&endpoint, "{ block { number } }").await?;
		assert_eq!(response, body);
		mock.assert_async().await;
		Ok(())
	}
}
