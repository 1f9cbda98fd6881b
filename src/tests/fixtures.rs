// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Shared builders for the unit tests.

use crate::catalog::{apply, CatalogCommand, CatalogRecord};
use crate::config::arg;
use crate::types::{Arguments, Identity};
use ed25519_dalek::SigningKey;

pub const DATASET_A: &str = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const DATASET_B: &str = "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef";

pub const OWNER: &str = "ed25519:0101";
pub const WRITE_ID: &str = "cw-0001";

pub fn key(seed: u8) -> SigningKey {
    SigningKey::from_bytes(&[seed; 32])
}

pub fn identity(key: &SigningKey) -> Identity {
    Identity::from_verifying_key(&key.verifying_key())
}

pub fn add_owner_args(identity: &str) -> Arguments {
    Arguments::new()
        .with(arg::FIRST_NAME, "Ada")
        .with(arg::LAST_NAME, "Lovelace")
        .with(arg::IDENTITY, identity)
}

pub fn add_dataset_args(owner: &str, id: &str) -> Arguments {
    Arguments::new()
        .with(arg::IDENTITY, owner)
        .with(arg::CALYPSO_WRITE_ID, id)
        .with(arg::TITLE, "Hospital admissions")
        .with(arg::DESCRIPTION, "Admissions 2019-2021")
        .with(arg::CLOUD_URL, "https://cloud.example/admissions")
        .with(arg::SHA2, "5d41402abc4b2a76b9719d911017c592")
}

pub fn run(state: &CatalogRecord, command: &str, args: &Arguments) -> crate::Result<CatalogRecord> {
    apply(state, &CatalogCommand::parse(command, args)?)
}

/// Catalog with `OWNER` holding one dataset under `WRITE_ID`.
pub fn catalog_with_dataset() -> CatalogRecord {
    let state = run(
        &CatalogRecord::default(),
        CatalogCommand::ADD_OWNER,
        &add_owner_args(OWNER),
    )
    .unwrap();
    run(&state, CatalogCommand::ADD_DATASET, &add_dataset_args(OWNER, WRITE_ID)).unwrap()
}

pub fn project_spawn_args(datasets: &str, access_key: &str) -> Arguments {
    Arguments::new()
        .with(arg::DATASET_IDS, datasets)
        .with(arg::ACCESS_PUB_KEY, access_key)
}
