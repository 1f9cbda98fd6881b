//! Identity types.

use crate::error::{ContractError, Result};
use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

/// Address of one unit of ledger state.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct InstanceId(pub [u8; 32]);

impl InstanceId {
    pub const ZERO: InstanceId = InstanceId([0u8; 32]);

    pub fn from_hex(s: &str) -> Result<Self> {
        let mut bytes = [0u8; 32];
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|e| ContractError::MalformedEncoding(format!("instance id {s:?}: {e}")))?;
        Ok(InstanceId(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InstanceId({})", self.to_hex())
    }
}

impl FromStr for InstanceId {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self> {
        InstanceId::from_hex(s)
    }
}
