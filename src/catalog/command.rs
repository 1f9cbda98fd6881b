// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Catalog commands, decoded from the wire into typed variants.

use crate::catalog::state::DatasetRecord;
use crate::config::{arg, CLEAR_SENTINEL};
use crate::error::{ContractError, Result};
use crate::types::{Arguments, Metadata};

/// Update of one optional field, decoded from its wire string:
/// `""` leaves the field alone, `"_"` clears it, anything else replaces it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unset,
    Clear,
    Set(T),
}

impl FieldUpdate<String> {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => FieldUpdate::Unset,
            CLEAR_SENTINEL => FieldUpdate::Clear,
            value => FieldUpdate::Set(value.to_string()),
        }
    }
}

impl FieldUpdate<Metadata> {
    pub fn parse_json(raw: &str) -> Result<Self> {
        Ok(match raw {
            "" => FieldUpdate::Unset,
            CLEAR_SENTINEL => FieldUpdate::Clear,
            json => FieldUpdate::Set(Metadata::from_json(json.as_bytes())?),
        })
    }
}

impl<T: Default> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut T) {
        match self {
            FieldUpdate::Unset => {}
            FieldUpdate::Clear => *field = T::default(),
            FieldUpdate::Set(value) => *field = value,
        }
    }
}

impl<T> FieldUpdate<T> {
    pub fn apply_to_option(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::Unset => {}
            FieldUpdate::Clear => *field = None,
            FieldUpdate::Set(value) => *field = Some(value),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddOwner {
    pub first_name: String,
    pub last_name: String,
    pub identity: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateOwner {
    pub identity: String,
    pub first_name: String,
    pub last_name: String,
    /// Moves the owner under a new identity key.
    pub new_identity: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddDataset {
    pub owner: String,
    pub id: String,
    pub dataset: DatasetRecord,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpdateDataset {
    pub owner: String,
    pub id: String,
    pub title: FieldUpdate<String>,
    pub description: FieldUpdate<String>,
    pub cloud_url: FieldUpdate<String>,
    pub sha2: FieldUpdate<String>,
    pub metadata: FieldUpdate<Metadata>,
    /// Moves the dataset under a new calypso write-id key.
    pub new_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DatasetKey {
    pub owner: String,
    pub id: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogCommand {
    AddOwner(AddOwner),
    UpdateOwner(UpdateOwner),
    DeleteOwner { identity: String },
    AddDataset(AddDataset),
    UpdateDataset(UpdateDataset),
    ArchiveDataset(DatasetKey),
    DeleteDataset(DatasetKey),
    UpdateMetadata(Metadata),
}

impl CatalogCommand {
    pub const ADD_OWNER: &'static str = "addOwner";
    pub const UPDATE_OWNER: &'static str = "updateOwner";
    pub const DELETE_OWNER: &'static str = "deleteOwner";
    pub const ADD_DATASET: &'static str = "addDataset";
    pub const UPDATE_DATASET: &'static str = "updateDataset";
    pub const ARCHIVE_DATASET: &'static str = "archiveDataset";
    pub const DELETE_DATASET: &'static str = "deleteDataset";
    pub const UPDATE_METADATA: &'static str = "updateMetadata";

    pub fn name(&self) -> &'static str {
        match self {
            CatalogCommand::AddOwner(_) => Self::ADD_OWNER,
            CatalogCommand::UpdateOwner(_) => Self::UPDATE_OWNER,
            CatalogCommand::DeleteOwner { .. } => Self::DELETE_OWNER,
            CatalogCommand::AddDataset(_) => Self::ADD_DATASET,
            CatalogCommand::UpdateDataset(_) => Self::UPDATE_DATASET,
            CatalogCommand::ArchiveDataset(_) => Self::ARCHIVE_DATASET,
            CatalogCommand::DeleteDataset(_) => Self::DELETE_DATASET,
            CatalogCommand::UpdateMetadata(_) => Self::UPDATE_METADATA,
        }
    }

    /// Decodes a named command and its arguments.
    pub fn parse(command: &str, args: &Arguments) -> Result<Self> {
        match command {
            Self::ADD_OWNER => Ok(CatalogCommand::AddOwner(AddOwner {
                first_name: args.str_or_empty(arg::FIRST_NAME)?.to_string(),
                last_name: args.str_or_empty(arg::LAST_NAME)?.to_string(),
                identity: args.require_str(arg::IDENTITY)?.to_string(),
            })),
            Self::UPDATE_OWNER => Ok(CatalogCommand::UpdateOwner(UpdateOwner {
                identity: args.require_str(arg::IDENTITY)?.to_string(),
                first_name: args.str_or_empty(arg::FIRST_NAME)?.to_string(),
                last_name: args.str_or_empty(arg::LAST_NAME)?.to_string(),
                new_identity: non_empty(args.optional_str(arg::NEW_IDENTITY)?),
            })),
            Self::DELETE_OWNER => Ok(CatalogCommand::DeleteOwner {
                identity: args.require_str(arg::IDENTITY)?.to_string(),
            }),
            Self::ADD_DATASET => {
                let metadata = match args.optional_str(arg::METADATA_JSON)? {
                    Some(json) if !json.is_empty() => Some(Metadata::from_json(json.as_bytes())?),
                    _ => None,
                };
                Ok(CatalogCommand::AddDataset(AddDataset {
                    owner: args.require_str(arg::IDENTITY)?.to_string(),
                    id: args.require_str(arg::CALYPSO_WRITE_ID)?.to_string(),
                    dataset: DatasetRecord {
                        title: args.require_str(arg::TITLE)?.to_string(),
                        description: args.require_str(arg::DESCRIPTION)?.to_string(),
                        cloud_url: args.require_str(arg::CLOUD_URL)?.to_string(),
                        sha2: args.require_str(arg::SHA2)?.to_string(),
                        metadata,
                        archived: false,
                    },
                }))
            }
            Self::UPDATE_DATASET => Ok(CatalogCommand::UpdateDataset(UpdateDataset {
                owner: args.require_str(arg::IDENTITY)?.to_string(),
                id: args.require_str(arg::CALYPSO_WRITE_ID)?.to_string(),
                title: FieldUpdate::parse(args.str_or_empty(arg::TITLE)?),
                description: FieldUpdate::parse(args.str_or_empty(arg::DESCRIPTION)?),
                cloud_url: FieldUpdate::parse(args.str_or_empty(arg::CLOUD_URL)?),
                sha2: FieldUpdate::parse(args.str_or_empty(arg::SHA2)?),
                metadata: FieldUpdate::parse_json(args.str_or_empty(arg::METADATA_JSON)?)?,
                new_id: non_empty(args.optional_str(arg::NEW_CALYPSO_WRITE_ID)?),
            })),
            Self::ARCHIVE_DATASET => Ok(CatalogCommand::ArchiveDataset(dataset_key(args)?)),
            Self::DELETE_DATASET => Ok(CatalogCommand::DeleteDataset(dataset_key(args)?)),
            Self::UPDATE_METADATA => Ok(CatalogCommand::UpdateMetadata(Metadata::from_json(
                args.require(arg::METADATA_JSON)?,
            )?)),
            other => Err(ContractError::Validation(format!(
                "unknown catalog command {other:?}"
            ))),
        }
    }
}

fn dataset_key(args: &Arguments) -> Result<DatasetKey> {
    Ok(DatasetKey {
        owner: args.require_str(arg::IDENTITY)?.to_string(),
        id: args.require_str(arg::CALYPSO_WRITE_ID)?.to_string(),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
