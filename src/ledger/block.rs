// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec;
use crate::error::Result;
use crate::ledger::instruction::Instruction;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientTransaction {
    pub instructions: Vec<Instruction>,
}

impl ClientTransaction {
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self { instructions }
    }
}

/// A transaction as recorded in a block, with the ledger's verdict.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxResult {
    pub accepted: bool,
    pub transaction: ClientTransaction,
}

/// A block as delivered by the block stream. The body stays encoded until
/// a consumer asks for the transactions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub payload: Vec<u8>,
}

impl Block {
    pub fn new(index: u64, transactions: &[TxResult]) -> Result<Self> {
        Ok(Self {
            index,
            payload: codec::encode(transactions)?,
        })
    }

    pub fn transactions(&self) -> Result<Vec<TxResult>> {
        codec::decode(&self.payload)
    }
}
