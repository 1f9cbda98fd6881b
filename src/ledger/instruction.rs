// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Instructions and the state changes they produce.
//!
//! An instruction targets one instance. A spawn creates a new instance whose
//! id is derived from the instruction digest and its signers; an invoke runs
//! a named command against existing state; a delete removes the instance at
//! ledger level.
//!
//! Signed instructions carry one counter per signature. The ledger accepts a
//! counter only if it is one past the last counter it saw for that signer.

use crate::codec;
use crate::error::{ContractError, Result};
use crate::types::{Arguments, Identity, InstanceId};
use ed25519_dalek::{Signer, SigningKey};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    Spawn {
        contract_id: String,
        args: Arguments,
    },
    Invoke {
        contract_id: String,
        command: String,
        args: Arguments,
    },
    Delete {
        contract_id: String,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionSignature {
    pub signer: Identity,
    pub signature: Vec<u8>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    pub instance_id: InstanceId,
    pub action: Action,
    /// One per signature, in signature order. Part of the digest.
    pub signer_counters: Vec<u64>,
    pub signatures: Vec<InstructionSignature>,
}

impl Instruction {
    /// Spawn authorized against `instance_id` (the parent instance).
    pub fn spawn(instance_id: InstanceId, contract_id: &str, args: Arguments) -> Self {
        Self {
            instance_id,
            action: Action::Spawn {
                contract_id: contract_id.to_string(),
                args,
            },
            signer_counters: Vec::new(),
            signatures: Vec::new(),
        }
    }

    pub fn invoke(instance_id: InstanceId, contract_id: &str, command: &str, args: Arguments) -> Self {
        Self {
            instance_id,
            action: Action::Invoke {
                contract_id: contract_id.to_string(),
                command: command.to_string(),
                args,
            },
            signer_counters: Vec::new(),
            signatures: Vec::new(),
        }
    }

    pub fn delete(instance_id: InstanceId, contract_id: &str) -> Self {
        Self {
            instance_id,
            action: Action::Delete {
                contract_id: contract_id.to_string(),
            },
            signer_counters: Vec::new(),
            signatures: Vec::new(),
        }
    }

    /// Sets the signer counters. Call before signing.
    pub fn with_counters(mut self, counters: Vec<u64>) -> Self {
        self.signer_counters = counters;
        self
    }

    pub fn contract_id(&self) -> &str {
        match &self.action {
            Action::Spawn { contract_id, .. }
            | Action::Invoke { contract_id, .. }
            | Action::Delete { contract_id } => contract_id.as_str(),
        }
    }

    pub fn is_spawn(&self) -> bool {
        matches!(self.action, Action::Spawn { .. })
    }

    /// Action string used by access policies, e.g. `invoke:project.updateStatus`.
    pub fn action_name(&self) -> String {
        match &self.action {
            Action::Spawn { contract_id, .. } => format!("spawn:{contract_id}"),
            Action::Invoke { contract_id, command, .. } => format!("invoke:{contract_id}.{command}"),
            Action::Delete { contract_id } => format!("delete:{contract_id}"),
        }
    }

    pub fn spawn_args(&self) -> Result<&Arguments> {
        match &self.action {
            Action::Spawn { args, .. } => Ok(args),
            _ => Err(ContractError::Validation(format!(
                "{} is not a spawn",
                self.action_name()
            ))),
        }
    }

    pub fn invoke_parts(&self) -> Result<(&str, &Arguments)> {
        match &self.action {
            Action::Invoke { command, args, .. } => Ok((command.as_str(), args)),
            _ => Err(ContractError::Validation(format!(
                "{} is not an invoke",
                self.action_name()
            ))),
        }
    }

    /// BLAKE3 over the unsigned instruction; this is the signed message.
    pub fn digest(&self) -> Result<[u8; 32]> {
        let bytes = codec::encode(&(&self.instance_id, &self.action, &self.signer_counters))?;
        Ok(blake3::hash(&bytes).into())
    }

    /// Digest plus signer identities, so equal instructions from different
    /// signers never derive the same id.
    pub fn derive_id(&self, label: &str) -> Result<InstanceId> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.digest()?);
        for signature in &self.signatures {
            let signer = signature.signer.as_str();
            hasher.update(&(signer.len() as u64).to_le_bytes());
            hasher.update(signer.as_bytes());
        }
        hasher.update(&(label.len() as u64).to_le_bytes());
        hasher.update(label.as_bytes());
        Ok(InstanceId(*hasher.finalize().as_bytes()))
    }

    /// Id of the instance this instruction creates, for spawns.
    pub fn spawned_id(&self) -> Result<Option<InstanceId>> {
        if self.is_spawn() {
            self.derive_id("").map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn sign_with(&mut self, key: &SigningKey) -> Result<()> {
        let digest = self.digest()?;
        self.signatures.push(InstructionSignature {
            signer: Identity::from_verifying_key(&key.verifying_key()),
            signature: key.sign(&digest).to_bytes().to_vec(),
        });
        Ok(())
    }

    pub fn signed(mut self, key: &SigningKey) -> Result<Self> {
        self.sign_with(key)?;
        Ok(self)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateAction {
    Create,
    Update,
    Remove,
}

/// One write produced by a contract, applied by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    pub action: StateAction,
    pub instance_id: InstanceId,
    pub contract_id: String,
    pub value: Vec<u8>,
}

impl StateChange {
    pub fn create(instance_id: InstanceId, contract_id: &str, value: Vec<u8>) -> Self {
        Self {
            action: StateAction::Create,
            instance_id,
            contract_id: contract_id.to_string(),
            value,
        }
    }

    pub fn update(instance_id: InstanceId, contract_id: &str, value: Vec<u8>) -> Self {
        Self {
            action: StateAction::Update,
            instance_id,
            contract_id: contract_id.to_string(),
            value,
        }
    }

    pub fn remove(instance_id: InstanceId, contract_id: &str) -> Self {
        Self {
            action: StateAction::Remove,
            instance_id,
            contract_id: contract_id.to_string(),
            value: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Instruction {
        Instruction::invoke(
            InstanceId([1; 32]),
            "project",
            "setURL",
            Arguments::new().with("enclaveURL", "https://enclave"),
        )
    }

    #[test]
    fn test_digest_ignores_signatures() {
        let key = SigningKey::from_bytes(&[3u8; 32]);
        let unsigned = sample();
        let signed = sample().signed(&key).unwrap();

        assert_eq!(unsigned.digest().unwrap(), signed.digest().unwrap());
        assert_eq!(signed.signatures.len(), 1);
    }

    #[test]
    fn test_spawned_id_is_deterministic() {
        let spawn = Instruction::spawn(InstanceId::ZERO, "catalog", Arguments::new());

        let id1 = spawn.spawned_id().unwrap().unwrap();
        let id2 = spawn.clone().spawned_id().unwrap().unwrap();
        assert_eq!(id1, id2);
        assert_ne!(id1, spawn.derive_id("other").unwrap());
        assert_eq!(sample().spawned_id().unwrap(), None);
    }

    #[test]
    fn test_spawned_id_depends_on_signers_and_counters() {
        let spawn = || Instruction::spawn(InstanceId::ZERO, "project", Arguments::new().with("accessPubKey", "K"));
        let key1 = SigningKey::from_bytes(&[1u8; 32]);
        let key2 = SigningKey::from_bytes(&[2u8; 32]);

        let by_one = spawn().with_counters(vec![1]).signed(&key1).unwrap();
        let by_two = spawn().with_counters(vec![1]).signed(&key2).unwrap();
        let by_one_again = spawn().with_counters(vec![2]).signed(&key1).unwrap();

        let id = by_one.spawned_id().unwrap();
        assert_ne!(id, by_two.spawned_id().unwrap());
        assert_ne!(id, by_one_again.spawned_id().unwrap());
        assert_ne!(by_one.digest().unwrap(), by_one_again.digest().unwrap());
    }

    #[test]
    fn test_action_names() {
        assert_eq!(sample().action_name(), "invoke:project.setURL");
        assert_eq!(
            Instruction::spawn(InstanceId::ZERO, "catalog", Arguments::new()).action_name(),
            "spawn:catalog"
        );
        assert_eq!(Instruction::delete(InstanceId::ZERO, "project").action_name(), "delete:project");
    }
}
