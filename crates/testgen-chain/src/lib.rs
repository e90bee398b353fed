// SPDX-License-Identifier: GPL-3.0

#![doc = include_str!("../README.md")]
mod chain;
mod errors;
mod generate;
mod genesis;
mod node;
#[cfg(test)]
mod test_utils;

pub use chain::Blockchain;
pub use errors::Error;
pub use generate::{generate_blocks, BlockRecipe, TxVariant};
pub use genesis::read_genesis;
pub use node::{send_graphql_request, NodeClient};
