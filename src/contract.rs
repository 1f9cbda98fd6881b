// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Contract dispatch.

use crate::auth::{AuthRequest, Policy};
use crate::catalog::CatalogContract;
use crate::config::{CATALOG_CONTRACT_ID, PROJECT_CONTRACT_ID};
use crate::error::{ContractError, Result};
use crate::ledger::instruction::{Instruction, StateChange};
use crate::project::ProjectContract;

/// A state-transition handler bound to one instance's current state.
///
/// Implementations are pure: they read the instruction and their own state
/// and return the writes to apply; they never touch the ledger themselves.
pub trait Contract {
    fn contract_id(&self) -> &'static str;

    fn verify(&self, instruction: &Instruction, policy: &dyn Policy) -> Result<()> {
        policy.check(&AuthRequest::from_instruction(instruction)?)
    }

    fn spawn(&self, instruction: &Instruction) -> Result<Vec<StateChange>>;

    fn invoke(&self, instruction: &Instruction) -> Result<Vec<StateChange>>;
}

/// Builds the contract for `contract_id`, from stored state when given.
pub fn load_contract(contract_id: &str, stored: Option<&[u8]>) -> Result<Box<dyn Contract>> {
    match (contract_id, stored) {
        (CATALOG_CONTRACT_ID, None) => Ok(Box::new(CatalogContract::default())),
        (CATALOG_CONTRACT_ID, Some(bytes)) => Ok(Box::new(CatalogContract::from_bytes(bytes)?)),
        (PROJECT_CONTRACT_ID, None) => Ok(Box::new(ProjectContract::default())),
        (PROJECT_CONTRACT_ID, Some(bytes)) => Ok(Box::new(ProjectContract::from_bytes(bytes)?)),
        (other, _) => Err(ContractError::Validation(format!("unknown contract {other:?}"))),
    }
}
