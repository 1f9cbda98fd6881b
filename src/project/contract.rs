// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Project state transitions and authorization.

use crate::auth::{AnyOf, AuthRequest, IdentityOverride, Policy};
use crate::config::PROJECT_CONTRACT_ID;
use crate::contract::Contract;
use crate::error::Result;
use crate::ledger::instruction::{Instruction, StateChange};
use crate::project::command::{ProjectCommand, SpawnProject};
use crate::project::state::ProjectRecord;
use crate::types::{Metadata, ProjectStatus};

/// Initial record of a freshly spawned project.
pub fn spawn_record(spawn: &SpawnProject) -> ProjectRecord {
    ProjectRecord {
        dataset_refs: spawn.dataset_refs.clone(),
        metadata: Some(Metadata::default()),
        access_pub_key: spawn.access_pub_key.clone(),
        enclave_pub_key: String::new(),
        status: ProjectStatus::Empty,
        enclave_url: String::new(),
    }
}

/// Applies `command` to a copy of `state`.
pub fn apply(state: &ProjectRecord, command: &ProjectCommand) -> Result<ProjectRecord> {
    let mut next = state.clone();

    match command {
        ProjectCommand::Update(record) => next = record.clone(),
        ProjectCommand::UpdateStatus(status) => {
            if next.status != *status {
                tracing::debug!(from = %next.status, to = %status, "project status change");
            }
            next.status = *status;
        }
        ProjectCommand::UpdateMetadata(metadata) => next.metadata = Some(metadata.clone()),
        ProjectCommand::SetUrl(url) => next.enclave_url = url.clone(),
        ProjectCommand::SetAccessPubKey(key) => next.access_pub_key = key.clone(),
        ProjectCommand::SetEnclavePubKey(key) => next.enclave_pub_key = key.clone(),
    }

    tracing::debug!(command = command.name(), "project command applied");
    Ok(next)
}

#[derive(Clone, Debug, Default)]
pub struct ProjectContract {
    pub record: ProjectRecord,
}

impl ProjectContract {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self {
            record: ProjectRecord::from_bytes(bytes)?,
        })
    }
}

impl Contract for ProjectContract {
    fn contract_id(&self) -> &'static str {
        PROJECT_CONTRACT_ID
    }

    /// The registered enclave may sign anything on its project; everyone
    /// else goes through the standard policy.
    fn verify(&self, instruction: &Instruction, policy: &dyn Policy) -> Result<()> {
        let request = AuthRequest::from_instruction(instruction)?;
        AnyOf::new(IdentityOverride::new(&self.record.enclave_pub_key), policy).check(&request)
    }

    fn spawn(&self, instruction: &Instruction) -> Result<Vec<StateChange>> {
        let spawn = SpawnProject::parse(instruction.spawn_args()?)?;
        let id = instruction.derive_id("")?;
        let record = spawn_record(&spawn);
        tracing::debug!(instance = %id, datasets = record.dataset_refs.len(), "project spawned");
        Ok(vec![StateChange::create(id, PROJECT_CONTRACT_ID, record.to_bytes()?)])
    }

    fn invoke(&self, instruction: &Instruction) -> Result<Vec<StateChange>> {
        let (command, args) = instruction.invoke_parts()?;
        let command = ProjectCommand::parse(command, args)?;
        let next = apply(&self.record, &command)?;
        Ok(vec![StateChange::update(
            instruction.instance_id,
            PROJECT_CONTRACT_ID,
            next.to_bytes()?,
        )])
    }
}
