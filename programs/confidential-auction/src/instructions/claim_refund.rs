use anchor_lang::prelude::*;

use crate::{
    error::AuctionError, events::RefundClaimed, state::AuctionState, treasury::Treasury,
};

pub struct ClaimRefund<'a, T: Treasury> {
    pub bidder: Pubkey,
    pub auction: &'a mut AuctionState,
    pub treasury: &'a mut T,
}

impl<'a, T: Treasury> ClaimRefund<'a, T> {
    /// Returns a losing bidder's escrow. At most once per bidder.
    pub fn handler(&mut self) -> Result<u64> {
        require!(
            self.auction.winner_revealed,
            AuctionError::WinnerNotRevealedYet
        );
        let (escrow_amount, claimed) = self
            .auction
            .bids
            .get(&self.bidder)
            .map(|bid| (bid.escrow_amount, bid.claimed))
            .ok_or(AuctionError::NotABidder)?;
        require!(
            !self.auction.is_winner(&self.bidder),
            AuctionError::WinnerCannotRefund
        );
        require!(!claimed, AuctionError::RefundAlreadyClaimed);

        let total_escrow = self
            .auction
            .total_escrow
            .checked_sub(escrow_amount)
            .ok_or(AuctionError::MathOverflow)?;

        self.treasury
            .pay(&self.bidder, escrow_amount)
            .map_err(|err| {
                msg!("Refund to {} failed: {}", self.bidder, err);
                error!(AuctionError::TransferFailed)
            })?;

        if let Some(bid) = self.auction.bids.get_mut(&self.bidder) {
            bid.claimed = true;
        }
        self.auction.total_escrow = total_escrow;

        emit!(RefundClaimed {
            bidder: self.bidder,
            amount: escrow_amount,
        });

        Ok(escrow_amount)
    }
}
