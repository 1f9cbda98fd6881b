// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Signer identities in their textual `ed25519:<hex>` form.

use crate::error::{ContractError, Result};
use core::fmt;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};

pub const ED25519_PREFIX: &str = "ed25519:";

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Identity(String);

impl Identity {
    pub fn from_verifying_key(key: &VerifyingKey) -> Self {
        Identity(format!("{}{}", ED25519_PREFIX, hex::encode(key.as_bytes())))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn verifying_key(&self) -> Result<VerifyingKey> {
        let encoded = self.0.strip_prefix(ED25519_PREFIX).ok_or_else(|| {
            ContractError::MalformedEncoding(format!("identity {:?} is not an ed25519 key", self.0))
        })?;

        let mut bytes = [0u8; 32];
        hex::decode_to_slice(encoded, &mut bytes)
            .map_err(|e| ContractError::MalformedEncoding(format!("identity {:?}: {e}", self.0)))?;

        VerifyingKey::from_bytes(&bytes)
            .map_err(|e| ContractError::MalformedEncoding(format!("identity {:?}: {e}", self.0)))
    }

    /// Checks `signature` over `message` against this identity's key.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> Result<()> {
        let key = self.verifying_key()?;
        let signature = Signature::from_slice(signature)
            .map_err(|e| ContractError::MalformedEncoding(format!("signature: {e}")))?;

        key.verify(message, &signature)
            .map_err(|_| ContractError::Unauthorized(format!("bad signature from {}", self.0)))
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Identity(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Identity(s)
    }
}

impl PartialEq<str> for Identity {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    #[test]
    fn test_sign_and_verify() {
        let key = SigningKey::from_bytes(&[7u8; 32]);
        let identity = Identity::from_verifying_key(&key.verifying_key());
        assert!(identity.as_str().starts_with(ED25519_PREFIX));

        let signature = key.sign(b"message").to_bytes();
        assert!(identity.verify(b"message", &signature).is_ok());
        assert!(matches!(
            identity.verify(b"other message", &signature),
            Err(ContractError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_non_ed25519_identity() {
        let identity = Identity::from("x509ec:abcdef");
        assert!(matches!(
            identity.verifying_key(),
            Err(ContractError::MalformedEncoding(_))
        ));
    }
}
