// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::config::arg;
use crate::error::{ContractError, Result};
use crate::project::state::{parse_dataset_ids, ProjectRecord};
use crate::types::{Arguments, InstanceId, Metadata, ProjectStatus};

/// Arguments of a project spawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SpawnProject {
    pub dataset_refs: Vec<InstanceId>,
    pub access_pub_key: String,
}

impl SpawnProject {
    pub fn parse(args: &Arguments) -> Result<Self> {
        Ok(Self {
            dataset_refs: parse_dataset_ids(args.require_str(arg::DATASET_IDS)?)?,
            access_pub_key: args.require_str(arg::ACCESS_PUB_KEY)?.to_string(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProjectCommand {
    /// Replaces the whole record.
    Update(ProjectRecord),
    UpdateStatus(ProjectStatus),
    UpdateMetadata(Metadata),
    SetUrl(String),
    SetAccessPubKey(String),
    SetEnclavePubKey(String),
}

impl ProjectCommand {
    pub const UPDATE: &'static str = "update";
    pub const UPDATE_STATUS: &'static str = "updateStatus";
    pub const UPDATE_METADATA: &'static str = "updateMetadata";
    pub const SET_URL: &'static str = "setURL";
    pub const SET_ACCESS_PUB_KEY: &'static str = "setAccessPubKey";
    pub const SET_ENCLAVE_PUB_KEY: &'static str = "setEnclavePubKey";

    pub fn name(&self) -> &'static str {
        match self {
            ProjectCommand::Update(_) => Self::UPDATE,
            ProjectCommand::UpdateStatus(_) => Self::UPDATE_STATUS,
            ProjectCommand::UpdateMetadata(_) => Self::UPDATE_METADATA,
            ProjectCommand::SetUrl(_) => Self::SET_URL,
            ProjectCommand::SetAccessPubKey(_) => Self::SET_ACCESS_PUB_KEY,
            ProjectCommand::SetEnclavePubKey(_) => Self::SET_ENCLAVE_PUB_KEY,
        }
    }

    pub fn parse(command: &str, args: &Arguments) -> Result<Self> {
        match command {
            Self::UPDATE => Ok(ProjectCommand::Update(ProjectRecord::from_bytes(
                args.require(arg::PROJECT_BUF)?,
            )?)),
            Self::UPDATE_STATUS => Ok(ProjectCommand::UpdateStatus(
                args.require_str(arg::STATUS)?.parse()?,
            )),
            Self::UPDATE_METADATA => Ok(ProjectCommand::UpdateMetadata(Metadata::from_json(
                args.require(arg::METADATA_JSON)?,
            )?)),
            Self::SET_URL => Ok(ProjectCommand::SetUrl(
                args.require_str(arg::ENCLAVE_URL)?.to_string(),
            )),
            Self::SET_ACCESS_PUB_KEY => Ok(ProjectCommand::SetAccessPubKey(
                args.require_str(arg::ACCESS_PUB_KEY)?.to_string(),
            )),
            Self::SET_ENCLAVE_PUB_KEY => Ok(ProjectCommand::SetEnclavePubKey(
                args.require_str(arg::ENCLAVE_PUB_KEY)?.to_string(),
            )),
            other => Err(ContractError::Validation(format!(
                "unknown project command {other:?}"
            ))),
        }
    }
}
