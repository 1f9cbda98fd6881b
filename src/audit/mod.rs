// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Audit trails rebuilt from the block history.

pub mod dataset;
pub mod project;
pub mod record;
pub mod scan;

pub use dataset::{audit_dataset, DatasetAudit, DatasetAuditEntry, ProjectLookup};
pub use project::audit_project;
pub use record::{link_deltas, AuditBlock, AuditRecord, AuditTransaction};
pub use scan::{scan, touches, MatchedTransaction, ScanSummary, ScanVisitor};
