// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Catalog of data owners and the datasets they publish.

pub mod command;
pub mod contract;
pub mod state;

pub use command::{CatalogCommand, FieldUpdate};
pub use contract::{apply, CatalogContract};
pub use state::{CatalogRecord, DatasetRecord, OwnerRecord};
