use anyhow::Context;
use odyssey_contracts::types::Metadata;

use super::read_file;

/// Decodes a metadata document and prints its normalized form.
pub fn check(json_path: &str) -> anyhow::Result<()> {
    let bytes = read_file(json_path)?;
    let metadata = Metadata::from_json(&bytes).with_context(|| format!("{json_path} is not valid metadata"))?;

    let attributes: usize = metadata.attributes_groups.iter().map(|g| g.attributes.len()).sum();
    println!(
        "{json_path}: {} group(s), {attributes} attribute(s)",
        metadata.attributes_groups.len()
    );
    println!("{}", metadata.to_json_pretty()?);
    Ok(())
}
