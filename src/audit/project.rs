// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Structured lifecycle audit of one instance.

use crate::audit::record::{link_deltas, AuditBlock, AuditRecord, AuditTransaction};
use crate::audit::scan::{scan, MatchedTransaction, ScanVisitor};
use crate::config::ScanConfig;
use crate::error::Result;
use crate::ledger::stream::BlockStream;
use crate::types::InstanceId;

#[derive(Default)]
struct Collector {
    blocks: Vec<AuditBlock>,
    occurrences: u64,
}

impl ScanVisitor for Collector {
    fn on_block(&mut self, block_index: u64, transactions: Vec<MatchedTransaction>) -> Result<()> {
        let transactions: Vec<AuditTransaction> = transactions
            .into_iter()
            .map(|tx| AuditTransaction {
                accepted: tx.accepted,
                instructions: tx.instructions,
            })
            .collect();

        self.occurrences += transactions
            .iter()
            .map(|tx| tx.instructions.len() as u64)
            .sum::<u64>();
        self.blocks.push(AuditBlock {
            block_index,
            delta_previous: -1,
            delta_next: -1,
            transactions,
        });
        Ok(())
    }
}

/// Every instruction that touched `target`, grouped by transaction and
/// block, with the gaps between blocks.
pub fn audit_project<S: BlockStream + ?Sized>(
    stream: &mut S,
    target: &InstanceId,
    config: &ScanConfig,
) -> Result<AuditRecord> {
    let mut collector = Collector::default();
    let summary = scan(stream, target, config, &mut collector)?;

    link_deltas(&mut collector.blocks);
    Ok(AuditRecord {
        blocks_checked: summary.blocks_checked,
        occurrences_found: collector.occurrences,
        blocks: collector.blocks,
    })
}
