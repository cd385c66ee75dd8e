use anchor_lang::prelude::*;

use crate::{
    error::AuctionError,
    events::AuctionEnded,
    fhe::{Euint32, FheOps},
    search::oblivious_argmax,
    state::{AuctionState, WinnerCommitment},
};

/// Closes bidding and runs the encrypted winner search. Anyone may call it
/// once the bidding period is over.
pub struct EndAuction<'a, F: FheOps> {
    pub caller: Pubkey,
    pub auction: &'a mut AuctionState,
    pub fhe: &'a mut F,
}

impl<'a, F: FheOps> EndAuction<'a, F> {
    pub fn handler(&mut self, clock: &Clock) -> Result<()> {
        let now = clock.unix_timestamp;
        require!(
            now >= self.auction.end_time,
            AuctionError::AuctionStillActive
        );
        require!(!self.auction.auction_ended, AuctionError::AlreadyEnded);
        require!(!self.auction.bidders.is_empty(), AuctionError::NoBids);

        // bidder-list order is what the encrypted index refers to
        let bids = self
            .auction
            .bidders
            .iter()
            .map(|bidder| {
                self.auction
                    .bid_of(bidder)
                    .ok_or_else(|| error!(AuctionError::NotABidder))
            })
            .collect::<Result<Vec<Euint32>>>()?;

        let (winning_bid, winner_index) = oblivious_argmax(&mut *self.fhe, &bids)?;

        self.fhe.allow_this(winning_bid.0)?;
        self.fhe.allow_this(winner_index.0)?;

        self.auction.commitment = Some(WinnerCommitment {
            winning_bid: winning_bid.0,
            winner_index: winner_index.0,
        });
        self.auction.auction_ended = true;

        emit!(AuctionEnded {
            caller: self.caller,
            bidder_count: self.auction.bidder_count(),
            winning_bid_handle: winning_bid.0,
            winner_index_handle: winner_index.0,
            timestamp: now,
        });
        msg!("Winner search completed over {} bids", bids.len());

        Ok(())
    }
}
