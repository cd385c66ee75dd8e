use std::collections::{BTreeMap, BTreeSet};

use anchor_lang::prelude::*;

use crate::error::AuctionError;

/// Custody of escrowed value.
///
/// Value attached to an invocation has already been moved by the runtime, so
/// crediting it cannot fail. Paying out can.
pub trait Treasury {
    /// Lamports currently held for the auction.
    fn balance(&self) -> u64;

    /// Credits lamports attached to the current invocation by `from`.
    fn receive(&mut self, from: &Pubkey, lamports: u64);

    /// Moves lamports out of custody to `to`.
    fn pay(&mut self, to: &Pubkey, lamports: u64) -> Result<()>;
}

/// In-memory lamport ledger.
#[derive(Clone, Debug, Default)]
pub struct LamportLedger {
    vault: u64,
    received: BTreeMap<Pubkey, u64>,
    paid: BTreeMap<Pubkey, u64>,
    rejecting: BTreeSet<Pubkey>,
}

impl LamportLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every future payment to `recipient` fail, like an account that
    /// refuses incoming transfers.
    pub fn reject_payments_to(&mut self, recipient: Pubkey) {
        self.rejecting.insert(recipient);
    }

    pub fn accept_payments_to(&mut self, recipient: &Pubkey) {
        self.rejecting.remove(recipient);
    }

    /// Total lamports ever received from `from`.
    pub fn received_from(&self, from: &Pubkey) -> u64 {
        self.received.get(from).copied().unwrap_or_default()
    }

    /// Total lamports ever paid out to `to`.
    pub fn paid_to(&self, to: &Pubkey) -> u64 {
        self.paid.get(to).copied().unwrap_or_default()
    }
}

impl Treasury for LamportLedger {
    fn balance(&self) -> u64 {
        self.vault
    }

    fn receive(&mut self, from: &Pubkey, lamports: u64) {
        self.vault = self.vault.saturating_add(lamports);
        let total = self.received.entry(*from).or_default();
        *total = total.saturating_add(lamports);
    }

    fn pay(&mut self, to: &Pubkey, lamports: u64) -> Result<()> {
        require!(!self.rejecting.contains(to), AuctionError::TransferRejected);
        self.vault = self
            .vault
            .checked_sub(lamports)
            .ok_or(AuctionError::VaultInsufficientFunds)?;
        let total = self.paid.entry(*to).or_default();
        *total = total.saturating_add(lamports);
        Ok(())
    }
}
