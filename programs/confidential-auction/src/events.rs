use anchor_lang::prelude::*;

use crate::state::RevealPolicy;

#[event]
pub struct AuctionCreated {
    pub seller: Pubkey,
    pub title: String,
    pub end_time: i64,
    pub minimum_bid: u64,
    pub reveal_policy: RevealPolicy,
}

#[event]
pub struct BidSubmitted {
    pub bidder: Pubkey,
    pub bidder_index: u32,
    pub escrow_amount: u64,
    pub refunded_escrow: u64,
    pub is_update: bool,
    pub timestamp: i64,
}

#[event]
pub struct AuctionEnded {
    pub caller: Pubkey,
    pub bidder_count: u32,
    pub winning_bid_handle: u128,
    pub winner_index_handle: u128,
    pub timestamp: i64,
}

#[event]
pub struct ResultAccessGranted {
    pub requester: Pubkey,
}

#[event]
pub struct WinnerRevealed {
    pub winner: Pubkey,
    pub winner_index: u32,
    pub winning_bid: u64,
    pub verified: bool,
    pub timestamp: i64,
}

#[event]
pub struct RefundClaimed {
    pub bidder: Pubkey,
    pub amount: u64,
}

#[event]
pub struct WinningsClaimed {
    pub seller: Pubkey,
    pub winner: Pubkey,
    pub amount: u64,
}
