// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Catalog state transitions.

use crate::catalog::command::{CatalogCommand, UpdateDataset, UpdateOwner};
use crate::catalog::state::{CatalogRecord, OwnerRecord};
use crate::config::CATALOG_CONTRACT_ID;
use crate::contract::Contract;
use crate::error::Result;
use crate::ledger::instruction::{Instruction, StateChange};

/// Applies `command` to a copy of `state`.
///
/// The input is never modified, so a command that fails halfway leaves no
/// trace.
pub fn apply(state: &CatalogRecord, command: &CatalogCommand) -> Result<CatalogRecord> {
    let mut next = state.clone();

    match command {
        CatalogCommand::AddOwner(add) => {
            next.owners.insert(
                add.identity.clone(),
                OwnerRecord::new(&add.first_name, &add.last_name, &add.identity),
            );
        }
        CatalogCommand::UpdateOwner(update) => update_owner(&mut next, update)?,
        CatalogCommand::DeleteOwner { identity } => {
            next.owner_mut(identity)?;
            next.owners.remove(identity);
        }
        CatalogCommand::AddDataset(add) => {
            let owner = next.owner_mut(&add.owner)?;
            owner.datasets.insert(add.id.clone(), add.dataset.clone());
        }
        CatalogCommand::UpdateDataset(update) => update_dataset(&mut next, update)?,
        CatalogCommand::ArchiveDataset(key) => {
            next.owner_mut(&key.owner)?.dataset_mut(&key.id)?.archived = true;
        }
        CatalogCommand::DeleteDataset(key) => {
            let owner = next.owner_mut(&key.owner)?;
            owner.dataset_mut(&key.id)?;
            owner.datasets.remove(&key.id);
        }
        CatalogCommand::UpdateMetadata(metadata) => {
            next.metadata = Some(metadata.clone());
        }
    }

    tracing::debug!(command = command.name(), owners = next.owners.len(), "catalog command applied");
    Ok(next)
}

fn update_owner(state: &mut CatalogRecord, update: &UpdateOwner) -> Result<()> {
    let owner = state.owner_mut(&update.identity)?;
    owner.first_name = update.first_name.clone();
    owner.last_name = update.last_name.clone();

    if let Some(new_identity) = &update.new_identity {
        if let Some(mut moved) = state.owners.remove(&update.identity) {
            moved.identity = new_identity.clone();
            if state.owners.insert(new_identity.clone(), moved).is_some() {
                tracing::warn!(from = %update.identity, to = %new_identity, "owner rename replaced an existing owner");
            }
        }
    }
    Ok(())
}

fn update_dataset(state: &mut CatalogRecord, update: &UpdateDataset) -> Result<()> {
    let owner = state.owner_mut(&update.owner)?;
    let dataset = owner.dataset_mut(&update.id)?;

    update.title.clone().apply_to(&mut dataset.title);
    update.description.clone().apply_to(&mut dataset.description);
    update.cloud_url.clone().apply_to(&mut dataset.cloud_url);
    update.sha2.clone().apply_to(&mut dataset.sha2);
    update.metadata.clone().apply_to_option(&mut dataset.metadata);

    if let Some(new_id) = &update.new_id {
        if let Some(moved) = owner.datasets.remove(&update.id) {
            if owner.datasets.insert(new_id.clone(), moved).is_some() {
                tracing::warn!(owner = %update.owner, from = %update.id, to = %new_id, "dataset rename replaced an existing dataset");
            }
        }
    }
    Ok(())
}

/// Catalog contract bound to one instance's state.
#[derive(Clone, Debug, Default)]
pub struct CatalogContract {
    pub record: CatalogRecord,
}

impl CatalogContract {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            record: CatalogRecord::from_bytes(bytes)?,
        })
    }
}

impl Contract for CatalogContract {
    fn contract_id(&self) -> &'static str {
        CATALOG_CONTRACT_ID
    }

    fn spawn(&self, instruction: &Instruction) -> Result<Vec<StateChange>> {
        let id = instruction.derive_id("")?;
        let record = CatalogRecord::default();
        tracing::debug!(instance = %id, "catalog spawned");
        Ok(vec![StateChange::create(id, CATALOG_CONTRACT_ID, record.to_bytes()?)])
    }

    fn invoke(&self, instruction: &Instruction) -> Result<Vec<StateChange>> {
        let (command, args) = instruction.invoke_parts()?;
        let command = CatalogCommand::parse(command, args)?;
        let next = apply(&self.record, &command)?;
        Ok(vec![StateChange::update(
            instruction.instance_id,
            CATALOG_CONTRACT_ID,
            next.to_bytes()?,
        )])
    }
}
