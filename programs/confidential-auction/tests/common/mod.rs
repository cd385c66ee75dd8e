#![allow(dead_code)]

use anchor_lang::{error::Error, prelude::*};
use confidential_auction::{
    AuctionConfig, AuctionError, ConfidentialAuction, Invocation, LamportLedger, RevealPolicy,
    ShadowFhe,
};

pub const START: i64 = 1_700_000_000;
pub const DURATION: i64 = 3_600;
pub const END: i64 = START + DURATION;
pub const MIN_BID: u64 = 1;

pub type Auction = ConfidentialAuction<ShadowFhe, LamportLedger>;

pub fn setup(reveal_policy: RevealPolicy) -> (Auction, Pubkey) {
    let seller = Pubkey::new_unique();
    let config = AuctionConfig::new("Lot 17", DURATION, MIN_BID).with_reveal_policy(reveal_policy);
    let auction = ConfidentialAuction::create_auction(
        &Invocation::new(seller, START),
        config,
        ShadowFhe::new(),
        LamportLedger::new(),
    )
    .unwrap();
    (auction, seller)
}

pub fn place_bid(
    auction: &mut Auction,
    bidder: Pubkey,
    amount: u32,
    escrow: u64,
    at: i64,
) -> Result<()> {
    let (ciphertext, proof) = ShadowFhe::encrypt_input(amount);
    let ctx = Invocation::new(bidder, at).with_lamports(escrow);
    auction.submit_bid(&ctx, &ciphertext, &proof)
}

/// Bids `amounts` from fresh bidders, escrowing exactly the bid.
pub fn bid_all(auction: &mut Auction, amounts: &[u32]) -> Vec<Pubkey> {
    amounts
        .iter()
        .enumerate()
        .map(|(i, amount)| {
            let bidder = Pubkey::new_unique();
            place_bid(auction, bidder, *amount, u64::from(*amount), START + i as i64).unwrap();
            bidder
        })
        .collect()
}

/// Decrypts the winner commitment as `revealer`.
/// Returns `(winner_index, winning_bid, proof)`.
pub fn decrypt_result(auction: &mut Auction, revealer: Pubkey) -> (u32, u32, Vec<u8>) {
    auction
        .request_result_access(&Invocation::new(revealer, END))
        .unwrap();
    let handles = [
        auction.state().encrypted_winning_bid().unwrap().0,
        auction.state().encrypted_winner_index().unwrap().0,
    ];
    let (plaintexts, proof) = auction.fhe().decrypt_with_proof(&handles, &revealer).unwrap();
    (plaintexts[1], plaintexts[0], proof)
}

/// Ends the auction and reveals the honest result.
pub fn end_and_reveal(auction: &mut Auction) -> (u32, u32) {
    let revealer = Pubkey::new_unique();
    auction.end_auction(&Invocation::new(revealer, END)).unwrap();
    let (winner_index, winning_bid, proof) = decrypt_result(auction, revealer);
    auction
        .reveal_winner(
            &Invocation::new(revealer, END + 1),
            winner_index,
            winning_bid,
            &proof,
        )
        .unwrap();
    (winner_index, winning_bid)
}

pub fn assert_auction_error<T: std::fmt::Debug>(result: Result<T>, expected: AuctionError) {
    let name = expected.name();
    let code = u32::from(expected);
    match result {
        Err(Error::AnchorError(err)) => {
            assert_eq!(
                err.error_code_number, code,
                "expected {name}, got {}",
                err.error_name
            )
        }
        other => panic!("expected {name}, got {other:?}"),
    }
}
