use anchor_lang::prelude::*;

use crate::{
    error::AuctionError, events::WinningsClaimed, state::AuctionState, treasury::Treasury,
};

pub struct SellerClaimWinnings<'a, T: Treasury> {
    pub seller: Pubkey,
    pub auction: &'a mut AuctionState,
    pub treasury: &'a mut T,
}

impl<'a, T: Treasury> SellerClaimWinnings<'a, T> {
    /// Pays the seller the winner's escrow, not the revealed bid. The two only
    /// agree when the winner escrowed exactly what it bid.
    pub fn handler(&mut self) -> Result<u64> {
        require!(
            self.seller == self.auction.seller,
            AuctionError::NotSeller
        );
        require!(
            self.auction.winner_revealed,
            AuctionError::WinnerNotRevealedYet
        );
        require!(
            !self.auction.seller_claimed,
            AuctionError::WinningsAlreadyClaimed
        );

        let winner = self
            .auction
            .winner()
            .ok_or(AuctionError::WinnerNotRevealedYet)?;
        let amount = self
            .auction
            .bids
            .get(&winner)
            .map(|bid| bid.escrow_amount)
            .ok_or(AuctionError::NotABidder)?;
        let total_escrow = self
            .auction
            .total_escrow
            .checked_sub(amount)
            .ok_or(AuctionError::MathOverflow)?;

        self.treasury.pay(&self.seller, amount).map_err(|err| {
            msg!("Payout to seller failed: {}", err);
            error!(AuctionError::TransferFailed)
        })?;

        self.auction.seller_claimed = true;
        self.auction.total_escrow = total_escrow;

        emit!(WinningsClaimed {
            seller: self.seller,
            winner,
            amount,
        });

        Ok(amount)
    }
}
