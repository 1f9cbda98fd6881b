// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Named byte-string arguments carried by instructions.

use crate::error::{ContractError, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub value: Vec<u8>,
}

/// Ordered argument list. Lookups return the first argument with a given name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arguments(Vec<Argument>);

impl Arguments {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn with(mut self, name: &str, value: impl AsRef<[u8]>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: &str, value: impl AsRef<[u8]>) {
        self.0.push(Argument {
            name: name.to_string(),
            value: value.as_ref().to_vec(),
        });
    }

    pub fn search(&self, name: &str) -> Option<&[u8]> {
        self.0
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_slice())
    }

    /// Returns the argument, failing when it is absent or empty.
    pub fn require(&self, name: &str) -> Result<&[u8]> {
        match self.search(name) {
            Some(value) if !value.is_empty() => Ok(value),
            _ => Err(ContractError::MissingArgument(name.to_string())),
        }
    }

    pub fn require_str(&self, name: &str) -> Result<&str> {
        utf8(name, self.require(name)?)
    }

    /// `None` when absent; an empty argument is `Some("")`.
    pub fn optional_str(&self, name: &str) -> Result<Option<&str>> {
        self.search(name).map(|value| utf8(name, value)).transpose()
    }

    /// Absent and empty both read as `""`.
    pub fn str_or_empty(&self, name: &str) -> Result<&str> {
        Ok(self.optional_str(name)?.unwrap_or(""))
    }
}

fn utf8<'a>(name: &str, value: &'a [u8]) -> Result<&'a str> {
    core::str::from_utf8(value)
        .map_err(|e| ContractError::MalformedEncoding(format!("argument {name}: {e}")))
}
