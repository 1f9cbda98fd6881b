// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! The slice of the ledger the contracts and the audit see.

pub mod block;
pub mod instruction;
pub mod memory;
pub mod stream;

pub use block::{Block, ClientTransaction, TxResult};
pub use instruction::{Action, Instruction, InstructionSignature, StateAction, StateChange};
pub use memory::{LedgerDump, MemoryLedger};
pub use stream::{BlockStream, Page, PageStatus, VecBlockStream};
