// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Configuration constants.

/// Wire value that clears a dataset field during `updateDataset`.
pub const CLEAR_SENTINEL: &str = "_";

/// Number of lowercase hex characters in one dataset reference.
pub const DATASET_ID_HEX_LEN: usize = 64;

/// Contract identifier of catalog instances.
pub const CATALOG_CONTRACT_ID: &str = "catalog";

/// Contract identifier of project instances.
pub const PROJECT_CONTRACT_ID: &str = "project";

/// Upper bound on pages read by one audit scan.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Blocks requested per page from the block stream.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Named instruction arguments, as they appear on the wire.
pub mod arg {
    pub const FIRST_NAME: &str = "firstname";
    pub const LAST_NAME: &str = "lastname";
    pub const IDENTITY: &str = "identityStr";
    pub const NEW_IDENTITY: &str = "newIdentityStr";
    pub const CALYPSO_WRITE_ID: &str = "calypsoWriteID";
    pub const NEW_CALYPSO_WRITE_ID: &str = "newCalypsoWriteID";
    pub const TITLE: &str = "title";
    pub const DESCRIPTION: &str = "description";
    pub const CLOUD_URL: &str = "cloudURL";
    pub const SHA2: &str = "sha2";
    pub const METADATA_JSON: &str = "metadataJSON";
    pub const DATASET_IDS: &str = "datasetIDs";
    pub const ACCESS_PUB_KEY: &str = "accessPubKey";
    pub const ENCLAVE_PUB_KEY: &str = "enclavePubKey";
    pub const ENCLAVE_URL: &str = "enclaveURL";
    pub const STATUS: &str = "status";
    pub const PROJECT_BUF: &str = "projectBuf";
}

/// Bounds applied to an audit scan over the block stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Hard limit on `next_page` calls; the scan stops here even if the
    /// stream never reports end of chain.
    pub max_pages: usize,
    pub page_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}
