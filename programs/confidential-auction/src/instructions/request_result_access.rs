use anchor_lang::prelude::*;

use crate::{
    error::AuctionError, events::ResultAccessGranted, fhe::FheOps, state::AuctionState,
};

pub struct RequestResultAccess<'a, F: FheOps> {
    pub requester: Pubkey,
    pub auction: &'a AuctionState,
    pub fhe: &'a mut F,
}

impl<'a, F: FheOps> RequestResultAccess<'a, F> {
    /// Lets the requester decrypt the winner commitment off-chain. Granting
    /// twice is harmless.
    pub fn handler(&mut self) -> Result<()> {
        let commitment = self
            .auction
            .commitment
            .ok_or(AuctionError::AuctionNotEnded)?;

        self.fhe.allow(commitment.winning_bid, self.requester)?;
        self.fhe.allow(commitment.winner_index, self.requester)?;

        emit!(ResultAccessGranted {
            requester: self.requester,
        });

        Ok(())
    }
}
