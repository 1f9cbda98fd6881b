//! Deterministic state hashing.

// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use crate::codec;
use crate::error::Result;
use serde::Serialize;

/// Computes the BLAKE3 hash of a record's canonical binary encoding.
///
/// Two records hash equal iff they encode to the same bytes, which for the
/// map-backed catalog means: same owners, same datasets, same field values,
/// independent of the order in which they were inserted.
pub fn state_hash<T: Serialize + ?Sized>(value: &T) -> Result<[u8; 32]> {
    Ok(hash_bytes(&codec::encode(value)?))
}

pub fn hash_bytes(bytes: &[u8]) -> [u8; 32] {
    blake3::hash(bytes).into()
}
