use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use odyssey_contracts::audit::{audit_dataset, audit_project, AuditRecord};
use odyssey_contracts::config::ScanConfig;
use odyssey_contracts::types::InstanceId;
use serde::Serialize;

use super::ledger::load;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InstructionView {
    action: String,
    instance_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransactionView {
    accepted: bool,
    instructions: Vec<InstructionView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BlockView {
    block_index: u64,
    delta_previous: i64,
    delta_next: i64,
    transactions: Vec<TransactionView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AuditView {
    target: String,
    blocks_checked: u64,
    occurrences_found: u64,
    blocks: Vec<BlockView>,
}

impl AuditView {
    fn new(target: &InstanceId, record: &AuditRecord) -> Self {
        Self {
            target: target.to_hex(),
            blocks_checked: record.blocks_checked,
            occurrences_found: record.occurrences_found,
            blocks: record
                .blocks
                .iter()
                .map(|b| BlockView {
                    block_index: b.block_index,
                    delta_previous: b.delta_previous,
                    delta_next: b.delta_next,
                    transactions: b
                        .transactions
                        .iter()
                        .map(|tx| TransactionView {
                            accepted: tx.accepted,
                            instructions: tx
                                .instructions
                                .iter()
                                .map(|i| InstructionView {
                                    action: i.action_name(),
                                    instance_id: i.instance_id.to_hex(),
                                })
                                .collect(),
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}

fn scan_config(max_pages: Option<usize>) -> ScanConfig {
    let mut config = ScanConfig::default();
    if let Some(max_pages) = max_pages {
        config.max_pages = max_pages;
    }
    config
}

pub fn project(ledger_path: &str, target: &str, max_pages: Option<usize>, json: bool) -> anyhow::Result<()> {
    let ledger = load(ledger_path)?;
    let target = InstanceId::from_hex(target)?;
    let config = scan_config(max_pages);

    let mut stream = ledger.stream(config.page_size);
    let record = audit_project(&mut stream, &target, &config)?;
    let view = AuditView::new(&target, &record);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Block", "Δ prev", "Δ next", "Accepted", "Instructions"]);

    for block in &view.blocks {
        for tx in &block.transactions {
            let actions: Vec<&str> = tx.instructions.iter().map(|i| i.action.as_str()).collect();
            table.add_row(vec![
                block.block_index.to_string(),
                block.delta_previous.to_string(),
                block.delta_next.to_string(),
                tx.accepted.to_string(),
                actions.join(", "),
            ]);
        }
    }

    println!("\nAudit of {}\n", view.target);
    println!("{table}\n");
    println!(
        "{} block(s) checked, {} occurrence(s) found",
        view.blocks_checked, view.occurrences_found
    );
    Ok(())
}

pub fn dataset(ledger_path: &str, target: &str, max_pages: Option<usize>) -> anyhow::Result<()> {
    let ledger = load(ledger_path)?;
    let target = InstanceId::from_hex(target)?;
    let config = scan_config(max_pages);

    let mut stream = ledger.stream(config.page_size);
    let audit = audit_dataset(&mut stream, &target, &ledger, &config)?;

    print!("{audit}");
    Ok(())
}
