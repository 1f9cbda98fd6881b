// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Block scan shared by the audit variants.

use crate::config::ScanConfig;
use crate::error::{ContractError, Result};
use crate::ledger::block::Block;
use crate::ledger::instruction::Instruction;
use crate::ledger::stream::{BlockStream, PageStatus};
use crate::types::InstanceId;

/// Whether `instruction` targets `target`, or would create it.
pub fn touches(instruction: &Instruction, target: &InstanceId) -> Result<bool> {
    if instruction.instance_id == *target {
        return Ok(true);
    }
    Ok(instruction.spawned_id()?.as_ref() == Some(target))
}

/// The matching instructions of one transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchedTransaction {
    pub accepted: bool,
    pub instructions: Vec<Instruction>,
}

pub trait ScanVisitor {
    fn matches(&self, instruction: &Instruction, target: &InstanceId) -> Result<bool> {
        touches(instruction, target)
    }

    /// Called once per block holding at least one match, in stream order.
    fn on_block(&mut self, block_index: u64, transactions: Vec<MatchedTransaction>) -> Result<()>;
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub blocks_checked: u64,
    pub pages_read: usize,
    /// False when the page bound stopped the scan.
    pub reached_end: bool,
}

/// Reads pages until end of chain or `config.max_pages`, handing matches to
/// `visitor`.
///
/// A failed page or a failed read aborts the scan with a stream failure;
/// nothing collected so far is returned.
pub fn scan<S, V>(
    stream: &mut S,
    target: &InstanceId,
    config: &ScanConfig,
    visitor: &mut V,
) -> Result<ScanSummary>
where
    S: BlockStream + ?Sized,
    V: ScanVisitor + ?Sized,
{
    tracing::info!(target_instance = %target, max_pages = config.max_pages, "audit scan started");
    let mut summary = ScanSummary::default();

    while summary.pages_read < config.max_pages {
        let page = stream.next_page().map_err(|e| {
            tracing::error!(page = summary.pages_read + 1, error = %e, "block stream read failed");
            match e {
                ContractError::StreamFailure(_) => e,
                other => ContractError::StreamFailure(other.to_string()),
            }
        })?;
        summary.pages_read += 1;

        let last = match &page.status {
            PageStatus::Ok if page.blocks.is_empty() => {
                tracing::error!(page = summary.pages_read, "block stream returned an empty page");
                return Err(ContractError::StreamFailure(
                    "empty page without end of chain".into(),
                ));
            }
            PageStatus::Ok => false,
            PageStatus::EndOfChain => true,
            PageStatus::Failed { code, message } => {
                tracing::error!(page = summary.pages_read, code, %message, "block stream failed");
                return Err(ContractError::StreamFailure(format!("status {code}: {message}")));
            }
        };

        tracing::debug!(page = summary.pages_read, blocks = page.blocks.len(), "page received");
        for block in &page.blocks {
            scan_block(block, target, visitor)?;
            summary.blocks_checked += 1;
        }

        if last {
            summary.reached_end = true;
            break;
        }
    }

    if !summary.reached_end {
        tracing::warn!(
            max_pages = config.max_pages,
            blocks = summary.blocks_checked,
            "page bound reached before end of chain"
        );
    }
    tracing::info!(blocks = summary.blocks_checked, pages = summary.pages_read, "audit scan finished");
    Ok(summary)
}

fn scan_block<V: ScanVisitor + ?Sized>(block: &Block, target: &InstanceId, visitor: &mut V) -> Result<()> {
    let mut matched = Vec::new();

    for tx in block.transactions()? {
        let mut instructions = Vec::new();
        for instruction in tx.transaction.instructions {
            if visitor.matches(&instruction, target)? {
                instructions.push(instruction);
            }
        }
        if !instructions.is_empty() {
            matched.push(MatchedTransaction {
                accepted: tx.accepted,
                instructions,
            });
        }
    }

    if matched.is_empty() {
        return Ok(());
    }
    visitor.on_block(block.index, matched)
}
