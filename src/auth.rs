// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
//! Instruction authorization.
//!
//! A [`Policy`] decides whether the signatures on an instruction are enough
//! to run it. The standard policy is the ledger's access-control document;
//! [`IdentityOverride`] grants one registered identity every action and is
//! composed in front of the standard policy with [`AnyOf`].

use crate::error::{ContractError, Result};
use crate::ledger::instruction::{Instruction, InstructionSignature};
use crate::types::Identity;
use std::collections::BTreeMap;

/// What a policy gets to see: the action string, the signed digest and the
/// signatures as supplied (not yet verified).
pub struct AuthRequest<'a> {
    pub action: String,
    pub message: [u8; 32],
    pub signatures: &'a [InstructionSignature],
}

impl<'a> AuthRequest<'a> {
    pub fn from_instruction(instruction: &'a Instruction) -> Result<Self> {
        Ok(Self {
            action: instruction.action_name(),
            message: instruction.digest()?,
            signatures: &instruction.signatures,
        })
    }

    /// Signers whose signature verifies over the message.
    pub fn verified_signers(&self) -> impl Iterator<Item = &Identity> + '_ {
        self.signatures
            .iter()
            .filter(|s| s.signer.verify(&self.message, &s.signature).is_ok())
            .map(|s| &s.signer)
    }
}

pub trait Policy {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()>;
}

impl<P: Policy + ?Sized> Policy for &P {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()> {
        (**self).check(request)
    }
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()> {
        (**self).check(request)
    }
}

/// Accepts any instruction carrying a valid signature from one identity.
#[derive(Clone, Debug, Default)]
pub struct IdentityOverride {
    identity: Option<Identity>,
}

impl IdentityOverride {
    /// An empty string registers nothing; the override then never applies.
    pub fn new(identity: &str) -> Self {
        Self {
            identity: (!identity.is_empty()).then(|| Identity::from(identity)),
        }
    }
}

impl Policy for IdentityOverride {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()> {
        let Some(identity) = &self.identity else {
            return Err(ContractError::Unauthorized("no override identity registered".into()));
        };

        for signature in request.signatures {
            if signature.signer.verify(&request.message, &signature.signature).is_ok()
                && &signature.signer == identity
            {
                tracing::debug!(action = %request.action, signer = %identity, "authorized by override identity");
                return Ok(());
            }
        }

        Err(ContractError::Unauthorized(format!(
            "{} not signed by override identity",
            request.action
        )))
    }
}

/// Passes when `first` passes, otherwise defers to `second`.
pub struct AnyOf<A, B> {
    first: A,
    second: B,
}

impl<A: Policy, B: Policy> AnyOf<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: Policy, B: Policy> Policy for AnyOf<A, B> {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()> {
        match self.first.check(request) {
            Ok(()) => Ok(()),
            Err(_) => self.second.check(request),
        }
    }
}

/// Minimal access-control document: each action lists the identities
/// allowed to sign it. One valid signature from a listed identity suffices.
#[derive(Clone, Debug, Default)]
pub struct RulePolicy {
    rules: BTreeMap<String, Vec<Identity>>,
}

impl RulePolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allow(mut self, action: &str, identity: Identity) -> Self {
        self.rules.entry(action.to_string()).or_default().push(identity);
        self
    }

    pub fn allowed(&self, action: &str) -> &[Identity] {
        self.rules.get(action).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Policy for RulePolicy {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()> {
        let allowed = self.allowed(&request.action);
        if allowed.is_empty() {
            return Err(ContractError::Unauthorized(format!(
                "no rule for action {}",
                request.action
            )));
        }

        if request.verified_signers().any(|signer| allowed.contains(signer)) {
            return Ok(());
        }

        Err(ContractError::Unauthorized(format!(
            "{} requires a signature from one of {} identities",
            request.action,
            allowed.len()
        )))
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AllowAll;

impl Policy for AllowAll {
    fn check(&self, _request: &AuthRequest<'_>) -> Result<()> {
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct DenyAll;

impl Policy for DenyAll {
    fn check(&self, request: &AuthRequest<'_>) -> Result<()> {
        Err(ContractError::Unauthorized(format!("{} denied", request.action)))
    }
}
