use anchor_lang::prelude::*;

use crate::{
    error::AuctionError,
    events::BidSubmitted,
    fhe::FheOps,
    state::{AuctionState, Bid},
    treasury::Treasury,
};

pub struct SubmitBid<'a, F: FheOps, T: Treasury> {
    pub bidder: Pubkey,
    pub auction: &'a mut AuctionState,
    pub fhe: &'a mut F,
    /// Holds escrow; the previous escrow of an updated bid is paid back from here
    pub treasury: &'a mut T,
}

impl<'a, F: FheOps, T: Treasury> SubmitBid<'a, F, T> {
    /// Places or replaces the signer's bid. `escrow` is the value attached to
    /// the call and replaces any escrow held for an earlier bid.
    pub fn handler(
        &mut self,
        clock: &Clock,
        encrypted_amount: &[u8],
        input_proof: &[u8],
        escrow: u64,
    ) -> Result<()> {
        let now = clock.unix_timestamp;
        require!(!self.auction.auction_ended, AuctionError::BiddingClosed);
        require!(now < self.auction.end_time, AuctionError::BiddingClosed);
        require!(
            escrow >= self.auction.minimum_bid,
            AuctionError::BidBelowMinimum
        );
        require!(
            !encrypted_amount.is_empty(),
            AuctionError::InvalidCiphertext
        );

        let previous = self
            .auction
            .bids
            .get(&self.bidder)
            .map(|bid| (bid.index, bid.escrow_amount));
        let bidder_index = match previous {
            Some((index, _)) => index,
            None => u32::try_from(self.auction.bidders.len())
                .map_err(|_| error!(AuctionError::TooManyBidders))?,
        };
        let refunded_escrow = previous.map_or(0, |(_, escrow_amount)| escrow_amount);

        let total_escrow = self
            .auction
            .total_escrow
            .checked_sub(refunded_escrow)
            .and_then(|total| total.checked_add(escrow))
            .ok_or(AuctionError::MathOverflow)?;

        let enc_bid_amount = self
            .fhe
            .new_euint32(encrypted_amount, input_proof)
            .map_err(|err| {
                msg!("Encrypted input rejected: {}", err);
                error!(AuctionError::InvalidCiphertext)
            })?;

        // program keeps the handle usable for the winner search,
        // bidder can always audit its own live bid
        self.fhe.allow_this(enc_bid_amount.0)?;
        self.fhe.allow(enc_bid_amount.0, self.bidder)?;

        // last fallible step, nothing is written before it succeeds
        if previous.is_some() {
            self.treasury
                .pay(&self.bidder, refunded_escrow)
                .map_err(|err| {
                    msg!("Escrow refund to {} failed: {}", self.bidder, err);
                    error!(AuctionError::EscrowRefundFailed)
                })?;
        }
        self.treasury.receive(&self.bidder, escrow);

        match self.auction.bids.get_mut(&self.bidder) {
            Some(bid) => {
                bid.bid_amount = enc_bid_amount.0;
                bid.escrow_amount = escrow;
                bid.submitted_at = now;
            }
            None => {
                self.auction.bidders.push(self.bidder);
                self.auction.bids.insert(
                    self.bidder,
                    Bid {
                        bidder: self.bidder,
                        bid_amount: enc_bid_amount.0,
                        escrow_amount: escrow,
                        index: bidder_index,
                        submitted_at: now,
                        claimed: false,
                    },
                );
            }
        }
        self.auction.total_escrow = total_escrow;

        emit!(BidSubmitted {
            bidder: self.bidder,
            bidder_index,
            escrow_amount: escrow,
            refunded_escrow,
            is_update: previous.is_some(),
            timestamp: now,
        });

        Ok(())
    }
}
