// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Catalog state: owners, their datasets, and catalog-level metadata.

use crate::codec;
use crate::error::{ContractError, Result};
use crate::types::Metadata;
use crate::verify::state_hash;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Keyed by owner identity string.
    pub owners: BTreeMap<String, OwnerRecord>,
    pub metadata: Option<Metadata>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRecord {
    pub first_name: String,
    pub last_name: String,
    pub identity: String,
    /// Keyed by calypso write-id.
    pub datasets: BTreeMap<String, DatasetRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub title: String,
    pub description: String,
    pub cloud_url: String,
    pub sha2: String,
    pub metadata: Option<Metadata>,
    pub archived: bool,
}

impl CatalogRecord {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec::encode(self)
    }

    pub fn state_hash(&self) -> Result<[u8; 32]> {
        state_hash(self)
    }

    pub fn get_owner(&self, identity: &str) -> Option<&OwnerRecord> {
        self.owners.get(identity)
    }

    pub(crate) fn owner_mut(&mut self, identity: &str) -> Result<&mut OwnerRecord> {
        if self.owners.is_empty() {
            return Err(ContractError::NotFound(format!(
                "owner {identity:?}: catalog has no owners"
            )));
        }
        self.owners
            .get_mut(identity)
            .ok_or_else(|| ContractError::NotFound(format!("owner {identity:?}")))
    }

    /// First dataset with this id, scanning owners in map order.
    ///
    /// The same id may exist under several owners; which one is returned
    /// then is not part of the contract.
    pub fn find_dataset(&self, id: &str) -> Option<(&OwnerRecord, &DatasetRecord)> {
        self.owners
            .values()
            .find_map(|owner| owner.datasets.get(id).map(|dataset| (owner, dataset)))
    }

    /// Every dataset as `(owner identity, dataset id, record)`.
    pub fn all_datasets(&self) -> impl Iterator<Item = (&str, &str, &DatasetRecord)> {
        self.owners.iter().flat_map(|(identity, owner)| {
            owner
                .datasets
                .iter()
                .map(move |(id, dataset)| (identity.as_str(), id.as_str(), dataset))
        })
    }
}

impl OwnerRecord {
    pub fn new(first_name: &str, last_name: &str, identity: &str) -> Self {
        Self {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            identity: identity.to_string(),
            datasets: BTreeMap::new(),
        }
    }

    pub fn get_dataset(&self, id: &str) -> Result<&DatasetRecord> {
        self.datasets.get(id).ok_or_else(|| {
            ContractError::NotFound(format!("dataset {id:?} of owner {:?}", self.identity))
        })
    }

    pub(crate) fn dataset_mut(&mut self, id: &str) -> Result<&mut DatasetRecord> {
        let identity = &self.identity;
        self.datasets
            .get_mut(id)
            .ok_or_else(|| ContractError::NotFound(format!("dataset {id:?} of owner {identity:?}")))
    }
}
