// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::catalog::{CatalogCommand, CatalogContract, CatalogRecord, DatasetRecord};
use crate::config::arg;
use crate::contract::Contract;
use crate::error::ContractError;
use crate::ledger::Instruction;
use crate::tests::fixtures::*;
use crate::types::{Arguments, InstanceId, Metadata};

const META: &str = r#"{"attributesGroups":[{"title":"Use","attributes":[{"id":"use_restricted","value":"true"}]}]}"#;

#[test]
fn test_catalog_binary_roundtrip() {
    let mut state = catalog_with_dataset();
    state.metadata = Some(Metadata::from_json(META.as_bytes()).unwrap());

    let bytes = state.to_bytes().unwrap();
    let decoded = CatalogRecord::from_bytes(&bytes).unwrap();

    assert_eq!(decoded, state);
    assert_eq!(decoded.to_bytes().unwrap(), bytes);
    assert_eq!(decoded.state_hash().unwrap(), state.state_hash().unwrap());
}

#[test]
fn test_add_owner_is_upsert() {
    let state = catalog_with_dataset();
    let args = Arguments::new()
        .with(arg::FIRST_NAME, "Grace")
        .with(arg::IDENTITY, OWNER);

    let state = run(&state, CatalogCommand::ADD_OWNER, &args).unwrap();
    let owner = state.get_owner(OWNER).unwrap();

    assert_eq!(owner.first_name, "Grace");
    assert_eq!(owner.last_name, "");
    assert!(owner.datasets.is_empty(), "re-adding an owner resets its datasets");
}

#[test]
fn test_add_owner_requires_identity() {
    let args = Arguments::new().with(arg::FIRST_NAME, "Ada");
    let err = run(&CatalogRecord::default(), CatalogCommand::ADD_OWNER, &args);

    assert!(matches!(err, Err(ContractError::MissingArgument(n)) if n == arg::IDENTITY));
}

#[test]
fn test_add_then_get_dataset() {
    let state = catalog_with_dataset();
    let dataset = state.get_owner(OWNER).unwrap().get_dataset(WRITE_ID).unwrap();

    let expected = DatasetRecord {
        title: "Hospital admissions".into(),
        description: "Admissions 2019-2021".into(),
        cloud_url: "https://cloud.example/admissions".into(),
        sha2: "5d41402abc4b2a76b9719d911017c592".into(),
        metadata: None,
        archived: false,
    };
    assert_eq!(dataset, &expected);
}

#[test]
fn test_add_dataset_unknown_owner() {
    let state = catalog_with_dataset();
    let err = run(&state, CatalogCommand::ADD_DATASET, &add_dataset_args("ed25519:ffff", "x"));
    assert!(matches!(err, Err(ContractError::NotFound(_))));
}

#[test]
fn test_add_dataset_with_metadata() {
    let state = catalog_with_dataset();
    let args = add_dataset_args(OWNER, "cw-0002").with(arg::METADATA_JSON, META);

    let state = run(&state, CatalogCommand::ADD_DATASET, &args).unwrap();
    let dataset = state.get_owner(OWNER).unwrap().get_dataset("cw-0002").unwrap();

    let metadata = dataset.metadata.as_ref().unwrap();
    assert_eq!(metadata.attribute("Use", "use_restricted").unwrap().value, "true");
}

#[test]
fn test_update_owner_requires_owners() {
    let args = Arguments::new().with(arg::IDENTITY, OWNER);
    let err = run(&CatalogRecord::default(), CatalogCommand::UPDATE_OWNER, &args);
    assert!(matches!(err, Err(ContractError::NotFound(_))));
}

#[test]
fn test_update_owner_renames_key() {
    let state = catalog_with_dataset();
    let args = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::FIRST_NAME, "Augusta")
        .with(arg::LAST_NAME, "King")
        .with(arg::NEW_IDENTITY, "ed25519:0202");

    let state = run(&state, CatalogCommand::UPDATE_OWNER, &args).unwrap();

    assert!(state.get_owner(OWNER).is_none());
    let owner = state.get_owner("ed25519:0202").unwrap();
    assert_eq!(owner.identity, "ed25519:0202");
    assert_eq!(owner.first_name, "Augusta");
    assert!(owner.get_dataset(WRITE_ID).is_ok(), "datasets follow the rename");
}

#[test]
fn test_delete_owner() {
    let state = catalog_with_dataset();
    let args = Arguments::new().with(arg::IDENTITY, OWNER);

    let state = run(&state, CatalogCommand::DELETE_OWNER, &args).unwrap();
    assert!(state.owners.is_empty());

    let err = run(&state, CatalogCommand::DELETE_OWNER, &args);
    assert!(matches!(err, Err(ContractError::NotFound(_))));
}

#[test]
fn test_update_dataset_sentinel_semantics() {
    let state = catalog_with_dataset();
    let args = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::CALYPSO_WRITE_ID, WRITE_ID)
        .with(arg::TITLE, "_")
        .with(arg::DESCRIPTION, "")
        .with(arg::CLOUD_URL, "https://mirror.example/admissions");

    let state = run(&state, CatalogCommand::UPDATE_DATASET, &args).unwrap();
    let dataset = state.get_owner(OWNER).unwrap().get_dataset(WRITE_ID).unwrap();

    // 1. "_" clears
    assert_eq!(dataset.title, "");
    // 2. "" leaves the field alone
    assert_eq!(dataset.description, "Admissions 2019-2021");
    // 3. anything else overwrites
    assert_eq!(dataset.cloud_url, "https://mirror.example/admissions");
    // 4. absent arguments behave like ""
    assert_eq!(dataset.sha2, "5d41402abc4b2a76b9719d911017c592");
}

#[test]
fn test_update_dataset_metadata_set_then_clear() {
    let state = catalog_with_dataset();
    let base = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::CALYPSO_WRITE_ID, WRITE_ID);

    let state = run(&state, CatalogCommand::UPDATE_DATASET, &base.clone().with(arg::METADATA_JSON, META)).unwrap();
    assert!(state.get_owner(OWNER).unwrap().get_dataset(WRITE_ID).unwrap().metadata.is_some());

    let state = run(&state, CatalogCommand::UPDATE_DATASET, &base.with(arg::METADATA_JSON, "_")).unwrap();
    assert!(state.get_owner(OWNER).unwrap().get_dataset(WRITE_ID).unwrap().metadata.is_none());
}

#[test]
fn test_update_dataset_rename_preserves_record() {
    let state = catalog_with_dataset();
    let before = state.get_owner(OWNER).unwrap().get_dataset(WRITE_ID).unwrap().clone();
    let args = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::CALYPSO_WRITE_ID, WRITE_ID)
        .with(arg::NEW_CALYPSO_WRITE_ID, "cw-9999");

    let state = run(&state, CatalogCommand::UPDATE_DATASET, &args).unwrap();
    let owner = state.get_owner(OWNER).unwrap();

    assert!(matches!(owner.get_dataset(WRITE_ID), Err(ContractError::NotFound(_))));
    assert_eq!(owner.get_dataset("cw-9999").unwrap(), &before);
}

#[test]
fn test_failed_update_leaves_state_untouched() {
    let state = catalog_with_dataset();
    let args = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::CALYPSO_WRITE_ID, "missing")
        .with(arg::TITLE, "New");

    let err = run(&state, CatalogCommand::UPDATE_DATASET, &args);

    assert!(matches!(err, Err(ContractError::NotFound(_))));
    assert_eq!(state, catalog_with_dataset());
}

#[test]
fn test_archive_keeps_record() {
    let state = catalog_with_dataset();
    let key = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::CALYPSO_WRITE_ID, WRITE_ID);

    let state = run(&state, CatalogCommand::ARCHIVE_DATASET, &key).unwrap();
    let dataset = state.get_owner(OWNER).unwrap().get_dataset(WRITE_ID).unwrap();

    assert!(dataset.archived);
    assert_eq!(dataset.title, "Hospital admissions");
}

#[test]
fn test_delete_then_get_dataset() {
    let state = catalog_with_dataset();
    let key = Arguments::new()
        .with(arg::IDENTITY, OWNER)
        .with(arg::CALYPSO_WRITE_ID, WRITE_ID);

    let state = run(&state, CatalogCommand::DELETE_DATASET, &key).unwrap();
    let owner = state.get_owner(OWNER).unwrap();

    assert!(matches!(owner.get_dataset(WRITE_ID), Err(ContractError::NotFound(_))));

    let err = run(&state, CatalogCommand::DELETE_DATASET, &key);
    assert!(matches!(err, Err(ContractError::NotFound(_))));
}

#[test]
fn test_update_catalog_metadata() {
    let state = catalog_with_dataset();

    let args = Arguments::new().with(arg::METADATA_JSON, META);
    let state = run(&state, CatalogCommand::UPDATE_METADATA, &args).unwrap();
    assert_eq!(state.metadata.as_ref().unwrap().attributes_groups.len(), 1);

    let bad = Arguments::new().with(arg::METADATA_JSON, "[not an object");
    let err = run(&state, CatalogCommand::UPDATE_METADATA, &bad);
    assert!(matches!(err, Err(ContractError::MalformedEncoding(_))));
}

#[test]
fn test_find_dataset_and_listing() {
    let state = catalog_with_dataset();
    let state = run(&state, CatalogCommand::ADD_OWNER, &add_owner_args("ed25519:0202")).unwrap();
    let state = run(&state, CatalogCommand::ADD_DATASET, &add_dataset_args("ed25519:0202", WRITE_ID)).unwrap();
    let state = run(&state, CatalogCommand::ADD_DATASET, &add_dataset_args("ed25519:0202", "cw-0003")).unwrap();

    let (owner, _) = state.find_dataset(WRITE_ID).unwrap();
    assert!(owner.identity == OWNER || owner.identity == "ed25519:0202");
    assert!(state.find_dataset("nope").is_none());

    let listed: Vec<(&str, &str)> = state.all_datasets().map(|(o, id, _)| (o, id)).collect();
    assert_eq!(
        listed,
        vec![(OWNER, WRITE_ID), ("ed25519:0202", "cw-0001"), ("ed25519:0202", "cw-0003")]
    );
}

#[test]
fn test_contract_spawn_and_invoke() {
    let spawn = Instruction::spawn(InstanceId::ZERO, "catalog", Arguments::new());
    let changes = CatalogContract::default().spawn(&spawn).unwrap();

    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].instance_id, spawn.spawned_id().unwrap().unwrap());
    let empty = CatalogRecord::from_bytes(&changes[0].value).unwrap();
    assert!(empty.owners.is_empty());

    let contract = CatalogContract::from_bytes(&changes[0].value).unwrap();
    let invoke = Instruction::invoke(
        changes[0].instance_id,
        "catalog",
        CatalogCommand::ADD_OWNER,
        add_owner_args(OWNER),
    );
    let changes = contract.invoke(&invoke).unwrap();
    let state = CatalogRecord::from_bytes(&changes[0].value).unwrap();

    assert!(state.get_owner(OWNER).is_some());
}
