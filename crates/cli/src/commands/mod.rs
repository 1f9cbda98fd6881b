pub mod audit;
pub mod catalog;
pub mod ledger;
pub mod metadata;
pub mod project;

use anyhow::{bail, Context};
use odyssey_contracts::types::Arguments;
use std::path::Path;

/// Builds instruction arguments from `name=value` pairs.
///
/// A value of the form `@path` is replaced by the contents of that file,
/// which is how binary arguments such as `projectBuf` are passed.
pub fn parse_args(pairs: &[String]) -> anyhow::Result<Arguments> {
    let mut args = Arguments::new();
    for pair in pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("argument {pair:?} is not of the form name=value");
        };
        match value.strip_prefix('@') {
            Some(path) => args.push(name, read_file(path)?),
            None => args.push(name, value),
        }
    }
    Ok(args)
}

pub fn read_file(path: impl AsRef<Path>) -> anyhow::Result<Vec<u8>> {
    let path = path.as_ref();
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

pub fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> anyhow::Result<()> {
    let path = path.as_ref();
    std::fs::write(path, bytes).with_context(|| format!("failed to write {}", path.display()))
}
