// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Project state.

use crate::codec;
use crate::config::DATASET_ID_HEX_LEN;
use crate::error::{ContractError, Result};
use crate::types::{InstanceId, Metadata, ProjectStatus};
use crate::verify::state_hash;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRecord {
    /// Datasets the project computes over, in spawn order.
    pub dataset_refs: Vec<InstanceId>,
    pub metadata: Option<Metadata>,
    pub access_pub_key: String,
    pub enclave_pub_key: String,
    pub status: ProjectStatus,
    pub enclave_url: String,
}

impl ProjectRecord {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec::encode(self)
    }

    pub fn state_hash(&self) -> Result<[u8; 32]> {
        state_hash(self)
    }

    pub fn references(&self, dataset: &InstanceId) -> bool {
        self.dataset_refs.contains(dataset)
    }
}

/// Parses a comma-separated list of dataset references.
///
/// Surrounding whitespace of the whole list is ignored; every element must
/// be exactly 64 lowercase hex characters.
pub fn parse_dataset_ids(csv: &str) -> Result<Vec<InstanceId>> {
    let csv = csv.trim();
    if csv.is_empty() {
        return Err(ContractError::Validation("empty dataset id list".into()));
    }

    csv.split(',').map(parse_dataset_id).collect()
}

fn parse_dataset_id(element: &str) -> Result<InstanceId> {
    let well_formed = element.len() == DATASET_ID_HEX_LEN
        && element
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
    if !well_formed {
        return Err(ContractError::Validation(format!(
            "dataset id {element:?} is not {DATASET_ID_HEX_LEN} lowercase hex characters"
        )));
    }
    InstanceId::from_hex(element)
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
    const B: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

    #[test]
    fn test_parse_list() {
        let ids = parse_dataset_ids(&format!(" {A},{B}\n")).unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0].to_hex(), A);
        assert_eq!(ids[1].to_hex(), B);
    }

    #[test]
    fn test_rejects_malformed_elements() {
        let upper = A.to_uppercase();
        let short = &A[..63];
        let padded = format!("{A}, {B}");
        let trailing = format!("{A},");

        for bad in [upper.as_str(), short, padded.as_str(), "", ",", trailing.as_str()] {
            assert!(
                matches!(parse_dataset_ids(bad), Err(ContractError::Validation(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
