// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! In-memory ledger.
//!
//! Executes transactions through the contracts, keeps the resulting instance
//! values and records every transaction, accepted or not, into a block.
//! Blocks are served back through [`VecBlockStream`] for audits.
//!
//! Each signer has a counter; a signed instruction must carry the signer's
//! next counter, which makes every signed instruction unique and stops
//! replays.

use crate::auth::Policy;
use crate::codec;
use crate::contract::load_contract;
use crate::error::{ContractError, Result};
use crate::ledger::block::{Block, ClientTransaction, TxResult};
use crate::ledger::instruction::{Action, Instruction, StateAction, StateChange};
use crate::ledger::stream::VecBlockStream;
use crate::proof::{Proof, StateReader};
use crate::types::{Identity, InstanceId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredInstance {
    pub contract_id: String,
    pub value: Vec<u8>,
}

type Instances = BTreeMap<InstanceId, StoredInstance>;
type Counters = BTreeMap<Identity, u64>;

/// Instances and signer counters; staged as a whole per transaction.
#[derive(Clone, Debug, Default)]
struct LedgerState {
    instances: Instances,
    counters: Counters,
}

#[derive(Clone, Debug, Default)]
pub struct MemoryLedger {
    state: LedgerState,
    blocks: Vec<Block>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, instance_id: &InstanceId) -> Option<&StoredInstance> {
        self.state.instances.get(instance_id)
    }

    /// Counter the next instruction signed by `signer` must carry.
    pub fn next_counter(&self, signer: &Identity) -> u64 {
        self.state.counters.get(signer).copied().unwrap_or(0) + 1
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Executes `transactions` in order and records them as one block.
    ///
    /// A transaction is all-or-nothing: its instructions run against a
    /// staged copy of the state, which is kept only if every instruction
    /// succeeds.
    pub fn execute(
        &mut self,
        transactions: Vec<ClientTransaction>,
        policy: &dyn Policy,
    ) -> Result<Vec<TxResult>> {
        let mut results = Vec::with_capacity(transactions.len());

        for transaction in transactions {
            let accepted = match self.stage(&transaction, policy) {
                Ok(staged) => {
                    self.state = staged;
                    true
                }
                Err(e) => {
                    tracing::debug!(error = %e, "transaction rejected");
                    false
                }
            };
            results.push(TxResult {
                accepted,
                transaction,
            });
        }

        let block = Block::new(self.blocks.len() as u64, &results)?;
        tracing::debug!(index = block.index, transactions = results.len(), "block appended");
        self.blocks.push(block);
        Ok(results)
    }

    /// Executes one transaction in its own block and reports why it was
    /// rejected, if it was.
    pub fn submit(&mut self, transaction: ClientTransaction, policy: &dyn Policy) -> Result<()> {
        let outcome = self
            .stage(&transaction, policy)
            .map(|staged| self.state = staged);

        let results = [TxResult {
            accepted: outcome.is_ok(),
            transaction,
        }];
        let block = Block::new(self.blocks.len() as u64, &results)?;
        self.blocks.push(block);
        outcome
    }

    pub fn submit_instruction(&mut self, instruction: Instruction, policy: &dyn Policy) -> Result<()> {
        self.submit(ClientTransaction::new(vec![instruction]), policy)
    }

    fn stage(&self, transaction: &ClientTransaction, policy: &dyn Policy) -> Result<LedgerState> {
        let mut staged = self.state.clone();
        for instruction in &transaction.instructions {
            bump_counters(&mut staged.counters, instruction)?;
            let changes = run_instruction(&staged.instances, instruction, policy)?;
            for change in changes {
                apply_change(&mut staged.instances, change)?;
            }
        }
        Ok(staged)
    }

    /// Serves the recorded blocks, `page_size` per page.
    pub fn stream(&self, page_size: usize) -> VecBlockStream {
        VecBlockStream::new(self.blocks.clone(), page_size)
    }

    pub fn dump(&self) -> LedgerDump {
        LedgerDump {
            instances: self
                .state
                .instances
                .iter()
                .map(|(id, stored)| DumpedInstance {
                    instance_id: *id,
                    contract_id: stored.contract_id.clone(),
                    value: stored.value.clone(),
                })
                .collect(),
            counters: self
                .state
                .counters
                .iter()
                .map(|(signer, counter)| (signer.clone(), *counter))
                .collect(),
            blocks: self.blocks.clone(),
        }
    }

    pub fn from_dump(dump: LedgerDump) -> Self {
        Self {
            state: LedgerState {
                instances: dump
                    .instances
                    .into_iter()
                    .map(|i| {
                        (
                            i.instance_id,
                            StoredInstance {
                                contract_id: i.contract_id,
                                value: i.value,
                            },
                        )
                    })
                    .collect(),
                counters: dump.counters.into_iter().collect(),
            },
            blocks: dump.blocks,
        }
    }
}

/// Checks and advances the counter of every signer on `instruction`.
fn bump_counters(counters: &mut Counters, instruction: &Instruction) -> Result<()> {
    if instruction.signer_counters.len() != instruction.signatures.len() {
        return Err(ContractError::Validation(format!(
            "{} signature(s) but {} signer counter(s)",
            instruction.signatures.len(),
            instruction.signer_counters.len()
        )));
    }

    for (signature, &counter) in instruction.signatures.iter().zip(&instruction.signer_counters) {
        let last = counters.get(&signature.signer).copied().unwrap_or(0);
        if counter != last + 1 {
            return Err(ContractError::Validation(format!(
                "counter {counter} for {} (expected {})",
                signature.signer,
                last + 1
            )));
        }
        counters.insert(signature.signer.clone(), counter);
    }
    Ok(())
}

fn run_instruction(
    instances: &Instances,
    instruction: &Instruction,
    policy: &dyn Policy,
) -> Result<Vec<StateChange>> {
    match &instruction.action {
        Action::Spawn { contract_id, .. } => {
            let contract = load_contract(contract_id, None)?;
            contract.verify(instruction, policy)?;
            contract.spawn(instruction)
        }
        Action::Invoke { contract_id, .. } => {
            let stored = lookup(instances, instruction, contract_id)?;
            let contract = load_contract(contract_id, Some(&stored.value))?;
            contract.verify(instruction, policy)?;
            contract.invoke(instruction)
        }
        Action::Delete { contract_id } => {
            let stored = lookup(instances, instruction, contract_id)?;
            let contract = load_contract(contract_id, Some(&stored.value))?;
            contract.verify(instruction, policy)?;
            Ok(vec![StateChange::remove(instruction.instance_id, contract_id)])
        }
    }
}

fn lookup<'a>(
    instances: &'a Instances,
    instruction: &Instruction,
    contract_id: &str,
) -> Result<&'a StoredInstance> {
    let stored = instances
        .get(&instruction.instance_id)
        .ok_or_else(|| ContractError::NotFound(format!("instance {}", instruction.instance_id)))?;
    if stored.contract_id != contract_id {
        return Err(ContractError::Validation(format!(
            "instance {} belongs to contract {:?}, not {contract_id:?}",
            instruction.instance_id, stored.contract_id
        )));
    }
    Ok(stored)
}

fn apply_change(instances: &mut Instances, change: StateChange) -> Result<()> {
    match change.action {
        StateAction::Create => {
            if instances.contains_key(&change.instance_id) {
                return Err(ContractError::Validation(format!(
                    "instance {} already exists",
                    change.instance_id
                )));
            }
            instances.insert(
                change.instance_id,
                StoredInstance {
                    contract_id: change.contract_id,
                    value: change.value,
                },
            );
        }
        StateAction::Update => {
            instances.insert(
                change.instance_id,
                StoredInstance {
                    contract_id: change.contract_id,
                    value: change.value,
                },
            );
        }
        StateAction::Remove => {
            instances.remove(&change.instance_id);
        }
    }
    Ok(())
}

impl StateReader for MemoryLedger {
    fn proof(&self, instance_id: &InstanceId) -> Result<Proof> {
        Ok(match self.state.instances.get(instance_id) {
            Some(stored) => Proof::present(*instance_id, &stored.contract_id, stored.value.clone()),
            None => Proof::absent(*instance_id),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpedInstance {
    pub instance_id: InstanceId,
    pub contract_id: String,
    pub value: Vec<u8>,
}

/// Snapshot of a [`MemoryLedger`], as written to disk by the CLI.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerDump {
    pub instances: Vec<DumpedInstance>,
    pub counters: Vec<(Identity, u64)>,
    pub blocks: Vec<Block>,
}

impl LedgerDump {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec::encode(self)
    }
}
