//! Verified state lookups.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec;
use crate::error::{ContractError, Result};
use crate::types::InstanceId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Answer of the ledger to "what is stored under this instance id".
///
/// The ledger verifies the inclusion proof before handing this out; the
/// contracts only look at the two flags and, when both hold, at the value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Proof {
    pub instance_id: InstanceId,

    /// The key is present in the state trie.
    pub exists: bool,

    /// The proven key is the requested key.
    pub matches: bool,

    /// Contract that owns the value (empty when absent).
    pub contract_id: String,

    /// Raw stored value (empty when absent).
    pub value: Vec<u8>,
}

impl Proof {
    pub fn present(instance_id: InstanceId, contract_id: &str, value: Vec<u8>) -> Self {
        Self {
            instance_id,
            exists: true,
            matches: true,
            contract_id: contract_id.to_string(),
            value,
        }
    }

    pub fn absent(instance_id: InstanceId) -> Self {
        Self {
            instance_id,
            exists: false,
            matches: false,
            contract_id: String::new(),
            value: Vec::new(),
        }
    }

    /// Returns `(value, contract_id)` once both flags are checked.
    pub fn verified_value(&self) -> Result<(&[u8], &str)> {
        if !self.exists || !self.matches {
            return Err(ContractError::ProofInvalid(self.instance_id.to_hex()));
        }
        Ok((self.value.as_slice(), self.contract_id.as_str()))
    }

    /// Decodes the proven value, requiring it to belong to `contract_id`.
    pub fn decode_as<T: DeserializeOwned>(&self, contract_id: &str) -> Result<T> {
        let (value, owner) = self.verified_value()?;
        if owner != contract_id {
            return Err(ContractError::Validation(format!(
                "instance {} belongs to contract {owner:?}, not {contract_id:?}",
                self.instance_id
            )));
        }
        codec::decode(value)
    }
}

/// Source of verified lookups against the current state snapshot.
pub trait StateReader {
    fn proof(&self, instance_id: &InstanceId) -> Result<Proof>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_is_proof_invalid_not_decode_error() {
        let proof = Proof::absent(InstanceId([9; 32]));
        assert!(matches!(
            proof.decode_as::<u64>("catalog"),
            Err(ContractError::ProofInvalid(_))
        ));
    }

    #[test]
    fn test_mismatch_checked_before_value() {
        let mut proof = Proof::present(InstanceId([9; 32]), "catalog", vec![0xff, 0xff]);
        proof.matches = false;
        assert!(matches!(proof.verified_value(), Err(ContractError::ProofInvalid(_))));

        proof.matches = true;
        assert!(matches!(
            proof.decode_as::<u64>("catalog"),
            Err(ContractError::MalformedEncoding(_))
        ));
    }

    #[test]
    fn test_wrong_contract_rejected() {
        let value = codec::encode(&7u64).unwrap();
        let proof = Proof::present(InstanceId([9; 32]), "project", value);
        assert!(matches!(
            proof.decode_as::<u64>("catalog"),
            Err(ContractError::Validation(_))
        ));
        assert_eq!(proof.decode_as::<u64>("project").unwrap(), 7);
    }
}
