// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.

//! odyssey-contracts: catalog and project contracts for a permissioned
//! ledger, plus an audit-trail reconstructor over the block history.

pub mod config;
pub mod error;
pub mod codec;
pub mod types;
pub mod verify;
pub mod proof;
pub mod ledger;
pub mod auth;
pub mod contract;
pub mod catalog;
pub mod project;
pub mod audit;

pub use error::{ContractError, Result};

#[cfg(test)]
pub mod tests;
