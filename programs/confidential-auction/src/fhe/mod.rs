//! Boundary to the homomorphic coprocessor.
//!
//! Ciphertexts never cross this boundary in the clear: the program only ever
//! holds opaque handles and asks the backend to combine them. Everything the
//! auction computes over bids goes through [`FheOps`], so the same state
//! machine runs against a real coprocessor or against [`ShadowFhe`].

use anchor_lang::prelude::*;

pub mod shadow;

pub use shadow::{OpCounts, ShadowFhe};

/// Handle to an encrypted `u32`.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Euint32(pub u128);

/// Handle to an encrypted boolean, the result of a homomorphic comparison.
#[derive(
    AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
pub struct Ebool(pub u128);

pub trait FheOps {
    /// Imports a client-encrypted value, checking its input proof.
    fn new_euint32(&mut self, ciphertext: &[u8], input_proof: &[u8]) -> Result<Euint32>;

    /// Trivially encrypts a public constant so it can be mixed with ciphertexts.
    fn as_euint32(&mut self, value: u32) -> Result<Euint32>;

    /// Encrypted `lhs > rhs`.
    fn e_gt(&mut self, lhs: Euint32, rhs: Euint32) -> Result<Ebool>;

    /// Encrypted `if cond { if_true } else { if_false }`.
    fn e_select(&mut self, cond: Ebool, if_true: Euint32, if_false: Euint32) -> Result<Euint32>;

    /// Grants `allowed_address` the right to decrypt `handle` off-chain.
    fn allow(&mut self, handle: u128, allowed_address: Pubkey) -> Result<()>;

    /// Grants the program itself persistent rights on `handle`.
    fn allow_this(&mut self, handle: u128) -> Result<()> {
        self.allow(handle, crate::ID)
    }

    /// Checks a decryption proof binding `plaintexts` to `handles`.
    fn verify_decryption(&self, handles: &[u128], plaintexts: &[u32], proof: &[u8]) -> bool;
}

/// Anything that can stand as an arm of an oblivious select.
pub trait IntoEuint32 {
    fn into_euint32<F: FheOps + ?Sized>(self, fhe: &mut F) -> Result<Euint32>;
}

impl IntoEuint32 for Euint32 {
    fn into_euint32<F: FheOps + ?Sized>(self, _fhe: &mut F) -> Result<Euint32> {
        Ok(self)
    }
}

impl IntoEuint32 for u32 {
    fn into_euint32<F: FheOps + ?Sized>(self, fhe: &mut F) -> Result<Euint32> {
        fhe.as_euint32(self)
    }
}

/// Data-oblivious conditional.
///
/// Both arms are materialised as ciphertexts before the backend is asked to
/// pick one, so the instruction trace is the same whatever `cond` decrypts to.
/// Plaintext arms are lifted with [`FheOps::as_euint32`].
pub fn select<F, A, B>(fhe: &mut F, cond: Ebool, if_true: A, if_false: B) -> Result<Euint32>
where
    F: FheOps + ?Sized,
    A: IntoEuint32,
    B: IntoEuint32,
{
    let if_true = if_true.into_euint32(fhe)?;
    let if_false = if_false.into_euint32(fhe)?;
    fhe.e_select(cond, if_true, if_false)
}
