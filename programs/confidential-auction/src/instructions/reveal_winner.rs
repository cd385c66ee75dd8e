use anchor_lang::prelude::*;

use crate::{
    error::AuctionError,
    events::WinnerRevealed,
    fhe::FheOps,
    state::{AuctionState, RevealPolicy, RevealedResult},
};

/// Publishes the decrypted winner commitment.
///
/// Under [`RevealPolicy::TrustCaller`] the claimed plaintext is taken as is:
/// nothing ties `decrypted_index`/`decrypted_bid` to the commitment, so whoever
/// reveals first decides the winner. [`RevealPolicy::VerifyProof`] closes that
/// gap by checking a decryption proof against both commitment handles.
pub struct RevealWinner<'a, F: FheOps> {
    pub caller: Pubkey,
    pub auction: &'a mut AuctionState,
    pub fhe: &'a F,
}

impl<'a, F: FheOps> RevealWinner<'a, F> {
    pub fn handler(
        &mut self,
        clock: &Clock,
        decrypted_index: u32,
        decrypted_bid: u32,
        decryption_proof: &[u8],
    ) -> Result<()> {
        require!(self.auction.auction_ended, AuctionError::AuctionNotEnded);
        require!(
            !self.auction.winner_revealed,
            AuctionError::AlreadyRevealed
        );
        let commitment = self
            .auction
            .commitment
            .ok_or(AuctionError::AuctionNotEnded)?;
        let winner = self
            .auction
            .bidder_at(decrypted_index)
            .ok_or(AuctionError::InvalidWinnerIndex)?;

        let verified = match self.auction.reveal_policy {
            RevealPolicy::TrustCaller => {
                msg!("Reveal accepted without decryption proof verification");
                false
            }
            RevealPolicy::VerifyProof => {
                require!(
                    self.fhe.verify_decryption(
                        &[commitment.winning_bid, commitment.winner_index],
                        &[decrypted_bid, decrypted_index],
                        decryption_proof,
                    ),
                    AuctionError::InvalidDecryptionProof
                );
                true
            }
        };

        self.auction.result = Some(RevealedResult {
            winner,
            winner_index: decrypted_index,
            winning_bid: u64::from(decrypted_bid),
        });
        self.auction.winner_revealed = true;

        emit!(WinnerRevealed {
            winner,
            winner_index: decrypted_index,
            winning_bid: u64::from(decrypted_bid),
            verified,
            timestamp: clock.unix_timestamp,
        });
        msg!("Winner revealed by {}: {}", self.caller, winner);

        Ok(())
    }
}
