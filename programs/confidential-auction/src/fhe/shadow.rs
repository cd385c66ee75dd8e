//! Plaintext-shadowing coprocessor.
//!
//! Each handle maps to the value it would decrypt to. Access control and the
//! input/decryption proofs are enforced the same way a real coprocessor would
//! enforce them, which makes this backend suitable for tests and local
//! simulation of a full auction. It provides no confidentiality.

use std::collections::{BTreeSet, HashMap};

use anchor_lang::prelude::*;
use sha2::{Digest, Sha256};

use crate::{
    constants::{DECRYPTION_PROOF_DOMAIN, INPUT_PROOF_DOMAIN},
    error::AuctionError,
    fhe::{Ebool, Euint32, FheOps},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Plain {
    Uint32(u32),
    Bool(bool),
}

/// Number of coprocessor operations issued, per kind.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct OpCounts {
    pub inputs: usize,
    pub trivial: usize,
    pub comparisons: usize,
    pub selects: usize,
}

#[derive(Debug)]
pub struct ShadowFhe {
    next_handle: u128,
    values: HashMap<u128, Plain>,
    acl: HashMap<u128, BTreeSet<Pubkey>>,
    ops: OpCounts,
}

impl Default for ShadowFhe {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowFhe {
    pub fn new() -> Self {
        Self {
            // handle 0 is never issued
            next_handle: 1,
            values: HashMap::new(),
            acl: HashMap::new(),
            ops: OpCounts::default(),
        }
    }

    /// Client side: encrypts `value` into an external ciphertext and its input proof.
    pub fn encrypt_input(value: u32) -> (Vec<u8>, Vec<u8>) {
        let ciphertext = value.to_le_bytes().to_vec();
        let proof = digest(INPUT_PROOF_DOMAIN, &[&ciphertext]);
        (ciphertext, proof)
    }

    /// Off-chain decryption on behalf of `requester`.
    pub fn decrypt(&self, handle: u128, requester: &Pubkey) -> Result<u32> {
        require!(self.is_allowed(handle, requester), AuctionError::AccessDenied);
        self.uint32(handle)
    }

    /// Decrypts `handles` for `requester` and produces the proof a verifier
    /// expects alongside the plaintexts.
    pub fn decrypt_with_proof(
        &self,
        handles: &[u128],
        requester: &Pubkey,
    ) -> Result<(Vec<u32>, Vec<u8>)> {
        let plaintexts = handles
            .iter()
            .map(|handle| self.decrypt(*handle, requester))
            .collect::<Result<Vec<u32>>>()?;
        let proof = decryption_digest(handles, &plaintexts);
        Ok((plaintexts, proof))
    }

    pub fn is_allowed(&self, handle: u128, principal: &Pubkey) -> bool {
        self.acl
            .get(&handle)
            .is_some_and(|allowed| allowed.contains(principal))
    }

    pub fn op_counts(&self) -> OpCounts {
        self.ops
    }

    fn issue(&mut self, value: Plain) -> u128 {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.values.insert(handle, value);
        handle
    }

    fn uint32(&self, handle: u128) -> Result<u32> {
        match self.values.get(&handle) {
            Some(Plain::Uint32(value)) => Ok(*value),
            Some(Plain::Bool(_)) => err!(AuctionError::HandleTypeMismatch),
            None => err!(AuctionError::UnknownHandle),
        }
    }

    fn boolean(&self, handle: u128) -> Result<bool> {
        match self.values.get(&handle) {
            Some(Plain::Bool(value)) => Ok(*value),
            Some(Plain::Uint32(_)) => err!(AuctionError::HandleTypeMismatch),
            None => err!(AuctionError::UnknownHandle),
        }
    }
}

impl FheOps for ShadowFhe {
    fn new_euint32(&mut self, ciphertext: &[u8], input_proof: &[u8]) -> Result<Euint32> {
        let bytes: [u8; 4] = ciphertext
            .try_into()
            .map_err(|_| error!(AuctionError::InvalidCiphertext))?;
        require!(
            digest(INPUT_PROOF_DOMAIN, &[ciphertext]) == input_proof,
            AuctionError::InvalidCiphertext
        );
        self.ops.inputs += 1;
        Ok(Euint32(self.issue(Plain::Uint32(u32::from_le_bytes(bytes)))))
    }

    fn as_euint32(&mut self, value: u32) -> Result<Euint32> {
        self.ops.trivial += 1;
        Ok(Euint32(self.issue(Plain::Uint32(value))))
    }

    fn e_gt(&mut self, lhs: Euint32, rhs: Euint32) -> Result<Ebool> {
        let gt = self.uint32(lhs.0)? > self.uint32(rhs.0)?;
        self.ops.comparisons += 1;
        Ok(Ebool(self.issue(Plain::Bool(gt))))
    }

    fn e_select(&mut self, cond: Ebool, if_true: Euint32, if_false: Euint32) -> Result<Euint32> {
        let cond = self.boolean(cond.0)?;
        let if_true = self.uint32(if_true.0)?;
        let if_false = self.uint32(if_false.0)?;
        self.ops.selects += 1;
        let picked = if cond { if_true } else { if_false };
        Ok(Euint32(self.issue(Plain::Uint32(picked))))
    }

    fn allow(&mut self, handle: u128, allowed_address: Pubkey) -> Result<()> {
        require!(
            self.values.contains_key(&handle),
            AuctionError::UnknownHandle
        );
        self.acl.entry(handle).or_default().insert(allowed_address);
        Ok(())
    }

    fn verify_decryption(&self, handles: &[u128], plaintexts: &[u32], proof: &[u8]) -> bool {
        if handles.len() != plaintexts.len() {
            return false;
        }
        let matches = handles
            .iter()
            .zip(plaintexts)
            .all(|(handle, claimed)| self.uint32(*handle).is_ok_and(|v| v == *claimed));
        matches && decryption_digest(handles, plaintexts) == proof
    }
}

fn digest(domain: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(domain);
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().to_vec()
}

fn decryption_digest(handles: &[u128], plaintexts: &[u32]) -> Vec<u8> {
    let mut hasher = Sha256::new();
    hasher.update(DECRYPTION_PROOF_DOMAIN);
    for (handle, plaintext) in handles.iter().zip(plaintexts) {
        hasher.update(handle.to_le_bytes());
        hasher.update(plaintext.to_le_bytes());
    }
    hasher.finalize().to_vec()
}
