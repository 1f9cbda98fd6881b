use anyhow::Context;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use odyssey_contracts::catalog::{apply, CatalogCommand, CatalogRecord};

use super::{parse_args, read_file, write_file};

pub fn spawn(out: &str) -> anyhow::Result<()> {
    let record = CatalogRecord::default();
    write_file(out, &record.to_bytes()?)?;
    println!("Empty catalog written to {out}");
    Ok(())
}

pub fn invoke(state_path: &str, command: &str, pairs: &[String]) -> anyhow::Result<()> {
    let state = load(state_path)?;
    let command = CatalogCommand::parse(command, &parse_args(pairs)?)?;

    let next = apply(&state, &command).with_context(|| format!("{} failed", command.name()))?;
    write_file(state_path, &next.to_bytes()?)?;

    tracing::info!(command = command.name(), state = state_path, "catalog updated");
    println!("{} applied, state hash {}", command.name(), hex::encode(next.state_hash()?));
    Ok(())
}

pub fn show(state_path: &str) -> anyhow::Result<()> {
    let state = load(state_path)?;

    let mut owners = Table::new();
    owners
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Identity", "First name", "Last name", "Datasets"]);
    for owner in state.owners.values() {
        owners.add_row(vec![
            owner.identity.clone(),
            owner.first_name.clone(),
            owner.last_name.clone(),
            owner.datasets.len().to_string(),
        ]);
    }

    let mut datasets = Table::new();
    datasets
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Owner", "Write ID", "Title", "Cloud URL", "SHA2", "Archived"]);
    for (owner, id, dataset) in state.all_datasets() {
        datasets.add_row(vec![
            owner.to_string(),
            id.to_string(),
            dataset.title.clone(),
            dataset.cloud_url.clone(),
            dataset.sha2.clone(),
            if dataset.archived { "yes" } else { "no" }.to_string(),
        ]);
    }

    println!("\nCatalog {}\n", hex::encode(state.state_hash()?));
    println!("{owners}\n");
    println!("{datasets}\n");
    if let Some(metadata) = &state.metadata {
        println!("Metadata:\n{}\n", metadata.to_json_pretty()?);
    }
    Ok(())
}

fn load(path: &str) -> anyhow::Result<CatalogRecord> {
    let bytes = read_file(path)?;
    CatalogRecord::from_bytes(&bytes).with_context(|| format!("{path} is not a catalog state file"))
}
