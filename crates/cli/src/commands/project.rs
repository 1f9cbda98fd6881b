use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use odyssey_contracts::config::arg;
use odyssey_contracts::project::{apply, spawn_record, ProjectCommand, ProjectRecord, SpawnProject};
use odyssey_contracts::types::Arguments;

use super::{parse_args, read_file, write_file};

pub fn spawn(datasets: &str, access_key: &str, out: &str) -> anyhow::Result<()> {
    let args = Arguments::new()
        .with(arg::DATASET_IDS, datasets)
        .with(arg::ACCESS_PUB_KEY, access_key);
    let record = spawn_record(&SpawnProject::parse(&args)?);

    write_file(out, &record.to_bytes()?)?;
    println!("Project over {} dataset(s) written to {out}", record.dataset_refs.len());
    Ok(())
}

pub fn invoke(state_path: &str, command: &str, pairs: &[String]) -> anyhow::Result<()> {
    let state = load(state_path)?;
    let command = ProjectCommand::parse(command, &parse_args(pairs)?)?;

    let next = apply(&state, &command)?;
    write_file(state_path, &next.to_bytes()?)?;

    tracing::info!(command = command.name(), state = state_path, "project updated");
    println!("{} applied, status {}", command.name(), next.status);
    Ok(())
}

pub fn show(state_path: &str) -> anyhow::Result<()> {
    let state = load(state_path)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Field", "Value"]);

    table.add_row(vec!["Status".to_string(), format!("{} ({})", state.status, state.status.index())]);
    table.add_row(vec!["Access key".to_string(), state.access_pub_key.clone()]);
    table.add_row(vec!["Enclave key".to_string(), state.enclave_pub_key.clone()]);
    table.add_row(vec!["Enclave URL".to_string(), state.enclave_url.clone()]);
    for (i, dataset) in state.dataset_refs.iter().enumerate() {
        table.add_row(vec![format!("Dataset #{i}"), dataset.to_hex()]);
    }

    println!("\nProject {}\n", hex::encode(state.state_hash()?));
    println!("{table}\n");
    if let Some(metadata) = state.metadata.as_ref().filter(|m| !m.is_empty()) {
        println!("Metadata:\n{}\n", metadata.to_json_pretty()?);
    }
    Ok(())
}

fn load(path: &str) -> anyhow::Result<ProjectRecord> {
    let bytes = read_file(path)?;
    ProjectRecord::from_bytes(&bytes).with_context(|| format!("{path} is not a project state file"))
}
