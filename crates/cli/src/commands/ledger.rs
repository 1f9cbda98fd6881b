//! Local ledger simulation over a dump file.
//!
//! Every instruction runs under an allow-all policy; the point is to build
//! block histories for `audit`, not to enforce access control.

use anyhow::Context;
use odyssey_contracts::auth::AllowAll;
use odyssey_contracts::ledger::{Instruction, LedgerDump, MemoryLedger};
use odyssey_contracts::types::InstanceId;

use super::{parse_args, read_file, write_file};

pub fn init(out: &str) -> anyhow::Result<()> {
    write_file(out, &MemoryLedger::new().dump().to_bytes()?)?;
    println!("Empty ledger written to {out}");
    Ok(())
}

/// Spawns when `command` is `None`, invokes otherwise. The instruction is
/// recorded in a new block whether or not it is accepted.
pub fn exec(
    ledger_path: &str,
    contract: &str,
    instance: Option<&str>,
    command: Option<&str>,
    pairs: &[String],
) -> anyhow::Result<()> {
    let mut ledger = load(ledger_path)?;
    let args = parse_args(pairs)?;
    let instance_id = match instance {
        Some(hex) => InstanceId::from_hex(hex)?,
        None => InstanceId::ZERO,
    };

    let instruction = match command {
        Some(command) => Instruction::invoke(instance_id, contract, command, args),
        None => Instruction::spawn(instance_id, contract, args),
    };
    let action = instruction.action_name();
    let spawned = instruction.spawned_id()?;

    let outcome = ledger.submit_instruction(instruction, &AllowAll);
    write_file(ledger_path, &ledger.dump().to_bytes()?)?;

    let block = ledger.blocks().len().saturating_sub(1);
    match (outcome, spawned) {
        (Ok(()), Some(id)) => println!("block {block}: {action} accepted, new instance {id}"),
        (Ok(()), None) => println!("block {block}: {action} accepted"),
        (Err(e), _) => {
            tracing::warn!(%action, error = %e, "instruction refused");
            println!("block {block}: {action} refused: {e}");
        }
    }
    Ok(())
}

pub fn load(path: &str) -> anyhow::Result<MemoryLedger> {
    let bytes = read_file(path)?;
    let dump = LedgerDump::from_bytes(&bytes).with_context(|| format!("{path} is not a ledger dump"))?;
    Ok(MemoryLedger::from_dump(dump))
}
