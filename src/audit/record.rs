// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec;
use crate::error::Result;
use crate::ledger::instruction::Instruction;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditTransaction {
    pub accepted: bool,
    pub instructions: Vec<Instruction>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditBlock {
    pub block_index: u64,
    /// Blocks without a match since the previous audit block; `-1` on the first.
    pub delta_previous: i64,
    /// Blocks without a match until the next audit block; `-1` on the last.
    pub delta_next: i64,
    pub transactions: Vec<AuditTransaction>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditRecord {
    pub blocks_checked: u64,
    pub occurrences_found: u64,
    pub blocks: Vec<AuditBlock>,
}

impl AuditRecord {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        codec::decode(bytes)
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        codec::encode(self)
    }
}

/// Fills in the gap deltas between consecutive audit blocks.
///
/// A delta is `next - previous - 1`, computed without overflow and clamped to
/// the `i64` range. When the stream yields the same block index twice in a
/// row the gap between them is also `-1`, indistinguishable from the
/// end-of-list sentinel.
pub fn link_deltas(blocks: &mut [AuditBlock]) {
    let indices: Vec<u64> = blocks.iter().map(|b| b.block_index).collect();

    for (i, block) in blocks.iter_mut().enumerate() {
        block.delta_previous = match i {
            0 => -1,
            _ => gap(indices[i - 1], indices[i]),
        };
        block.delta_next = match indices.get(i + 1) {
            Some(&next) => gap(indices[i], next),
            None => -1,
        };
    }
}

fn gap(from: u64, to: u64) -> i64 {
    let gap = i128::from(to) - i128::from(from) - 1;
    i64::try_from(gap).unwrap_or(if gap < 0 { i64::MIN } else { i64::MAX })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocks(indices: &[u64]) -> Vec<AuditBlock> {
        indices
            .iter()
            .map(|&block_index| AuditBlock {
                block_index,
                delta_previous: 0,
                delta_next: 0,
                transactions: Vec::new(),
            })
            .collect()
    }

    fn deltas(blocks: &[AuditBlock]) -> Vec<(i64, i64)> {
        blocks.iter().map(|b| (b.delta_previous, b.delta_next)).collect()
    }

    #[test]
    fn test_single_block_has_open_ends() {
        let mut b = blocks(&[7]);
        link_deltas(&mut b);
        assert_eq!(deltas(&b), vec![(-1, -1)]);
    }

    #[test]
    fn test_gaps_counted_exactly() {
        let mut b = blocks(&[2, 5, 6, 10]);
        link_deltas(&mut b);
        assert_eq!(deltas(&b), vec![(-1, 2), (2, 0), (0, 3), (3, -1)]);
    }

    #[test]
    fn test_indices_beyond_i64() {
        let mut b = blocks(&[0, u64::MAX - 1, u64::MAX]);
        link_deltas(&mut b);
        assert_eq!(deltas(&b), vec![(-1, i64::MAX), (i64::MAX, 0), (0, -1)]);
    }

    #[test]
    fn test_empty_is_noop() {
        let mut b = blocks(&[]);
        link_deltas(&mut b);
        assert!(b.is_empty());
    }
}
