use std::collections::BTreeMap;

use anchor_lang::prelude::*;

use crate::{error::AuctionError, fhe::Euint32};

#[account]
#[derive(Debug, PartialEq)]
pub struct AuctionState {
    pub title: String,
    pub seller: Pubkey,
    pub end_time: i64,
    pub minimum_bid: u64, // Minimum escrow in lamports
    pub reveal_policy: RevealPolicy,
    pub auction_ended: bool,
    pub winner_revealed: bool,
    pub seller_claimed: bool,
    pub bidders: Vec<Pubkey>, // First-bid order
    pub bids: BTreeMap<Pubkey, Bid>,
    pub commitment: Option<WinnerCommitment>,
    pub result: Option<RevealedResult>,
    pub total_escrow: u64, // Escrow still owed out
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Bid {
    pub bidder: Pubkey,
    pub bid_amount: u128, // Euint32 handle
    pub escrow_amount: u64,
    pub index: u32,
    pub submitted_at: i64,
    pub claimed: bool,
}

/// Output of the winner search. Written once.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerCommitment {
    pub winning_bid: u128,
    pub winner_index: u128,
}

/// Plaintext claim accepted by the reveal step. Written once.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealedResult {
    pub winner: Pubkey,
    pub winner_index: u32,
    pub winning_bid: u64,
}

/// How `reveal_winner` treats the claimed plaintext.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealPolicy {
    /// Accept the claim as given. The transition is only as trustworthy as
    /// whoever calls reveal.
    #[default]
    TrustCaller,
    /// Require a decryption proof over the winner commitment.
    VerifyProof,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuctionPhase {
    Open,
    AwaitingEnd, // Expired, winner search not yet run
    Ended,
    Revealed,
    Settled,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuctionInfo {
    pub title: String,
    pub seller: Pubkey,
    pub end_time: i64,
    pub minimum_bid: u64,
    pub auction_ended: bool,
    pub winner_revealed: bool,
    pub bidder_count: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinnerInfo {
    pub winner: Option<Pubkey>,
    pub winning_bid: u64,
    pub revealed: bool,
}

impl AuctionState {
    pub fn new(
        title: String,
        seller: Pubkey,
        end_time: i64,
        minimum_bid: u64,
        reveal_policy: RevealPolicy,
    ) -> Self {
        Self {
            title,
            seller,
            end_time,
            minimum_bid,
            reveal_policy,
            auction_ended: false,
            winner_revealed: false,
            seller_claimed: false,
            bidders: Vec::new(),
            bids: BTreeMap::new(),
            commitment: None,
            result: None,
            total_escrow: 0,
        }
    }

    pub fn bidder_count(&self) -> u32 {
        // bounded by the index space on insert
        self.bidders.len() as u32
    }

    pub fn bidder_at(&self, index: u32) -> Option<Pubkey> {
        self.bidders.get(index as usize).copied()
    }

    pub fn winner(&self) -> Option<Pubkey> {
        self.result.map(|result| result.winner)
    }

    pub fn is_winner(&self, bidder: &Pubkey) -> bool {
        self.winner().as_ref() == Some(bidder)
    }

    pub fn info(&self) -> AuctionInfo {
        AuctionInfo {
            title: self.title.clone(),
            seller: self.seller,
            end_time: self.end_time,
            minimum_bid: self.minimum_bid,
            auction_ended: self.auction_ended,
            winner_revealed: self.winner_revealed,
            bidder_count: self.bidder_count(),
        }
    }

    pub fn winner_info(&self) -> WinnerInfo {
        WinnerInfo {
            winner: self.winner(),
            winning_bid: self.result.map_or(0, |result| result.winning_bid),
            revealed: self.winner_revealed,
        }
    }

    /// Encrypted bid of `bidder`, if it has one.
    pub fn bid_of(&self, bidder: &Pubkey) -> Option<Euint32> {
        self.bids.get(bidder).map(|bid| Euint32(bid.bid_amount))
    }

    /// The caller's own live bid.
    pub fn my_bid(&self, caller: &Pubkey) -> Result<Euint32> {
        Ok(self.bid_of(caller).ok_or(AuctionError::NotABidder)?)
    }

    pub fn encrypted_winning_bid(&self) -> Result<Euint32> {
        let commitment = self.commitment.ok_or(AuctionError::AuctionNotEnded)?;
        Ok(Euint32(commitment.winning_bid))
    }

    pub fn encrypted_winner_index(&self) -> Result<Euint32> {
        let commitment = self.commitment.ok_or(AuctionError::AuctionNotEnded)?;
        Ok(Euint32(commitment.winner_index))
    }

    /// `(eligible, amount)` for a refund claim by `bidder`.
    pub fn can_claim_refund(&self, bidder: &Pubkey) -> (bool, u64) {
        if !self.winner_revealed || self.is_winner(bidder) {
            return (false, 0);
        }
        match self.bids.get(bidder) {
            Some(bid) if !bid.claimed => (true, bid.escrow_amount),
            _ => (false, 0),
        }
    }

    /// Seller paid and every losing bidder refunded.
    pub fn is_settled(&self) -> bool {
        self.winner_revealed
            && self.seller_claimed
            && self
                .bids
                .values()
                .all(|bid| bid.claimed || self.is_winner(&bid.bidder))
    }

    pub fn phase(&self, now: i64) -> AuctionPhase {
        if self.is_settled() {
            AuctionPhase::Settled
        } else if self.winner_revealed {
            AuctionPhase::Revealed
        } else if self.auction_ended {
            AuctionPhase::Ended
        } else if now >= self.end_time {
            AuctionPhase::AwaitingEnd
        } else {
            AuctionPhase::Open
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bid(bidder: Pubkey, index: u32, escrow_amount: u64) -> Bid {
        Bid {
            bidder,
            bid_amount: 1,
            escrow_amount,
            index,
            submitted_at: 0,
            claimed: false,
        }
    }

    fn revealed_auction(alice: Pubkey, bob: Pubkey) -> AuctionState {
        let mut auction = AuctionState::new(
            "lot".to_string(),
            Pubkey::new_unique(),
            100,
            10,
            RevealPolicy::TrustCaller,
        );
        auction.bidders = vec![alice, bob];
        auction.bids.insert(alice, bid(alice, 0, 300));
        auction.bids.insert(bob, bid(bob, 1, 500));
        auction.auction_ended = true;
        auction.winner_revealed = true;
        auction.result = Some(RevealedResult {
            winner: bob,
            winner_index: 1,
            winning_bid: 450,
        });
        auction
    }

    #[test]
    fn phase_follows_flags_and_clock() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut auction = revealed_auction(alice, bob);
        assert_eq!(auction.phase(0), AuctionPhase::Revealed);

        auction.seller_claimed = true;
        assert_eq!(auction.phase(0), AuctionPhase::Revealed);
        auction.bids.get_mut(&alice).unwrap().claimed = true;
        assert_eq!(auction.phase(0), AuctionPhase::Settled);

        let fresh = AuctionState::new("lot".into(), bob, 100, 0, RevealPolicy::default());
        assert_eq!(fresh.phase(99), AuctionPhase::Open);
        assert_eq!(fresh.phase(100), AuctionPhase::AwaitingEnd);
    }

    #[test]
    fn refund_eligibility_excludes_winner_and_claimed() {
        let alice = Pubkey::new_unique();
        let bob = Pubkey::new_unique();
        let mut auction = revealed_auction(alice, bob);

        assert_eq!(auction.can_claim_refund(&alice), (true, 300));
        assert_eq!(auction.can_claim_refund(&bob), (false, 0));
        assert_eq!(auction.can_claim_refund(&Pubkey::new_unique()), (false, 0));

        auction.bids.get_mut(&alice).unwrap().claimed = true;
        assert_eq!(auction.can_claim_refund(&alice), (false, 0));
    }

    #[test]
    fn winner_info_is_empty_before_reveal() {
        let auction = AuctionState::new("lot".into(), Pubkey::new_unique(), 1, 0, RevealPolicy::default());
        assert_eq!(
            auction.winner_info(),
            WinnerInfo {
                winner: None,
                winning_bid: 0,
                revealed: false
            }
        );
    }
}
