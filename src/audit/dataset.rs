// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Human-readable usage audit of one dataset.
//!
//! Lists every instruction touching the dataset instance and every project
//! spawned over it. For those projects the current state is fetched through
//! a [`StateReader`] and printed alongside.

use crate::audit::scan::{scan, touches, MatchedTransaction, ScanVisitor};
use crate::config::{arg, ScanConfig, PROJECT_CONTRACT_ID};
use crate::error::{ContractError, Result};
use crate::ledger::instruction::{Action, Instruction};
use crate::ledger::stream::BlockStream;
use crate::project::{parse_dataset_ids, ProjectRecord};
use crate::proof::StateReader;
use crate::types::InstanceId;
use std::fmt;

/// Current state of a project found in the audit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectLookup {
    Found { instance_id: InstanceId, record: ProjectRecord },
    /// The ledger has no (verifiable) value under this id.
    Missing { instance_id: InstanceId },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetAuditEntry {
    pub block_index: u64,
    pub accepted: bool,
    pub action: String,
    pub instance_id: InstanceId,
    pub project: Option<ProjectLookup>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DatasetAudit {
    pub target: InstanceId,
    pub blocks_checked: u64,
    pub entries: Vec<DatasetAuditEntry>,
}

/// A project spawn whose dataset list names `target`.
fn spawns_project_over(instruction: &Instruction, target: &InstanceId) -> bool {
    let Action::Spawn { contract_id, args } = &instruction.action else {
        return false;
    };
    if contract_id != PROJECT_CONTRACT_ID {
        return false;
    }
    match args.optional_str(arg::DATASET_IDS) {
        Ok(Some(csv)) => parse_dataset_ids(csv).is_ok_and(|ids| ids.contains(target)),
        _ => false,
    }
}

struct UsageCollector<'r, R: ?Sized> {
    reader: &'r R,
    entries: Vec<DatasetAuditEntry>,
}

impl<R: StateReader + ?Sized> UsageCollector<'_, R> {
    fn lookup(&self, instance_id: InstanceId) -> Result<ProjectLookup> {
        let proof = self.reader.proof(&instance_id)?;
        match proof.decode_as::<ProjectRecord>(PROJECT_CONTRACT_ID) {
            Ok(record) => Ok(ProjectLookup::Found { instance_id, record }),
            Err(ContractError::ProofInvalid(_)) => Ok(ProjectLookup::Missing { instance_id }),
            Err(e) => Err(e),
        }
    }
}

impl<R: StateReader + ?Sized> ScanVisitor for UsageCollector<'_, R> {
    fn matches(&self, instruction: &Instruction, target: &InstanceId) -> Result<bool> {
        Ok(touches(instruction, target)? || spawns_project_over(instruction, target))
    }

    fn on_block(&mut self, block_index: u64, transactions: Vec<MatchedTransaction>) -> Result<()> {
        for tx in transactions {
            for instruction in tx.instructions {
                let project = match instruction.spawned_id()? {
                    Some(id) if instruction.contract_id() == PROJECT_CONTRACT_ID => Some(self.lookup(id)?),
                    _ => None,
                };
                self.entries.push(DatasetAuditEntry {
                    block_index,
                    accepted: tx.accepted,
                    action: instruction.action_name(),
                    instance_id: instruction.instance_id,
                    project,
                });
            }
        }
        Ok(())
    }
}

pub fn audit_dataset<S, R>(
    stream: &mut S,
    target: &InstanceId,
    reader: &R,
    config: &ScanConfig,
) -> Result<DatasetAudit>
where
    S: BlockStream + ?Sized,
    R: StateReader + ?Sized,
{
    let mut collector = UsageCollector {
        reader,
        entries: Vec::new(),
    };
    let summary = scan(stream, target, config, &mut collector)?;

    Ok(DatasetAudit {
        target: *target,
        blocks_checked: summary.blocks_checked,
        entries: collector.entries,
    })
}

impl fmt::Display for DatasetAudit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "dataset {}: {} occurrence(s) in {} block(s)",
            self.target,
            self.entries.len(),
            self.blocks_checked
        )?;
        for entry in &self.entries {
            writeln!(
                f,
                "- block {} [{}] {} on {}",
                entry.block_index,
                if entry.accepted { "accepted" } else { "refused" },
                entry.action,
                entry.instance_id
            )?;
            match &entry.project {
                Some(ProjectLookup::Found { instance_id, record }) => {
                    writeln!(f, "    project {instance_id}")?;
                    writeln!(f, "      status:        {}", record.status)?;
                    let listed = if record.references(&self.target) { "listed" } else { "dropped" };
                    writeln!(
                        f,
                        "      datasets:      {} (this dataset {listed})",
                        record.dataset_refs.len()
                    )?;
                    writeln!(f, "      accessPubKey:  {}", record.access_pub_key)?;
                    writeln!(f, "      enclavePubKey: {}", record.enclave_pub_key)?;
                    writeln!(f, "      enclaveURL:    {}", record.enclave_url)?;
                }
                Some(ProjectLookup::Missing { instance_id }) => {
                    writeln!(f, "    project {instance_id} (not in current state)")?;
                }
                None => {}
            }
        }
        Ok(())
    }
}
