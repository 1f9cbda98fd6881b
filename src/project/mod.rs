// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Projects: a computation over a set of datasets, run inside an enclave.

pub mod command;
pub mod contract;
pub mod state;

pub use command::{ProjectCommand, SpawnProject};
pub use contract::{apply, spawn_record, ProjectContract};
pub use state::{parse_dataset_ids, ProjectRecord};
