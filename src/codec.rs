// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Binary codec for stored state, instructions and blocks.
//!
//! Every record goes through bincode's standard configuration. Decoding is
//! strict: a buffer with bytes left over after the value is rejected, so a
//! successful decode always re-encodes to the same bytes.

use crate::error::{ContractError, Result};
use serde::{de::DeserializeOwned, Serialize};

pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    bincode::serde::encode_to_vec(value, bincode::config::standard())
        .map_err(|e| ContractError::Codec(e.to_string()))
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let (value, read) = bincode::serde::decode_from_slice(bytes, bincode::config::standard())
        .map_err(|e| ContractError::MalformedEncoding(e.to_string()))?;

    if read != bytes.len() {
        return Err(ContractError::MalformedEncoding(format!(
            "{} trailing bytes after value",
            bytes.len() - read
        )));
    }

    Ok(value)
}
