use anchor_lang::prelude::*;

declare_id!("C4qMnBVw6141CdEKq7bpPgSGTCbDmDbLYbBJATQhYFKK");
pub mod constants;
pub mod context;
pub mod error;
pub mod events;
pub mod fhe;
pub mod instructions;
pub mod search;
pub mod state;
pub mod treasury;

pub use context::Invocation;
pub use error::AuctionError;
pub use fhe::{Ebool, Euint32, FheOps, ShadowFhe};
pub use instructions::*;
pub use state::*;
pub use treasury::{LamportLedger, Treasury};

/// A deployed auction: its record plus the coprocessor and custody it talks to.
///
/// Every mutating call runs as a transaction. If the handler fails the record
/// is restored to what it was before the call.
pub struct ConfidentialAuction<F: FheOps, T: Treasury> {
    state: AuctionState,
    fhe: F,
    treasury: T,
}

impl<F: FheOps, T: Treasury> ConfidentialAuction<F, T> {
    pub fn create_auction(
        ctx: &Invocation,
        config: AuctionConfig,
        fhe: F,
        treasury: T,
    ) -> Result<Self> {
        let state = CreateAuction {
            seller: ctx.signer,
        }
        .handler(&ctx.clock, config)?;
        Ok(Self {
            state,
            fhe,
            treasury,
        })
    }

    pub fn submit_bid(
        &mut self,
        ctx: &Invocation,
        encrypted_amount: &[u8],
        input_proof: &[u8],
    ) -> Result<()> {
        self.transact(|auction, fhe, treasury| {
            SubmitBid {
                bidder: ctx.signer,
                auction,
                fhe,
                treasury,
            }
            .handler(&ctx.clock, encrypted_amount, input_proof, ctx.lamports)
        })
    }

    pub fn end_auction(&mut self, ctx: &Invocation) -> Result<()> {
        self.transact(|auction, fhe, _| {
            EndAuction {
                caller: ctx.signer,
                auction,
                fhe,
            }
            .handler(&ctx.clock)
        })
    }

    pub fn request_result_access(&mut self, ctx: &Invocation) -> Result<()> {
        RequestResultAccess {
            requester: ctx.signer,
            auction: &self.state,
            fhe: &mut self.fhe,
        }
        .handler()
    }

    pub fn reveal_winner(
        &mut self,
        ctx: &Invocation,
        decrypted_index: u32,
        decrypted_bid: u32,
        decryption_proof: &[u8],
    ) -> Result<()> {
        self.transact(|auction, fhe, _| {
            RevealWinner {
                caller: ctx.signer,
                auction,
                fhe: &*fhe,
            }
            .handler(&ctx.clock, decrypted_index, decrypted_bid, decryption_proof)
        })
    }

    pub fn claim_refund(&mut self, ctx: &Invocation) -> Result<u64> {
        self.transact(|auction, _, treasury| {
            ClaimRefund {
                bidder: ctx.signer,
                auction,
                treasury,
            }
            .handler()
        })
    }

    pub fn seller_claim_winnings(&mut self, ctx: &Invocation) -> Result<u64> {
        self.transact(|auction, _, treasury| {
            SellerClaimWinnings {
                seller: ctx.signer,
                auction,
                treasury,
            }
            .handler()
        })
    }

    pub fn can_claim_refund(&self, bidder: &Pubkey) -> (bool, u64) {
        self.state.can_claim_refund(bidder)
    }

    pub fn state(&self) -> &AuctionState {
        &self.state
    }

    pub fn fhe(&self) -> &F {
        &self.fhe
    }

    pub fn treasury(&self) -> &T {
        &self.treasury
    }

    pub fn treasury_mut(&mut self) -> &mut T {
        &mut self.treasury
    }

    fn transact<R>(
        &mut self,
        op: impl FnOnce(&mut AuctionState, &mut F, &mut T) -> Result<R>,
    ) -> Result<R> {
        let snapshot = self.state.clone();
        let result = op(&mut self.state, &mut self.fhe, &mut self.treasury);
        if result.is_err() {
            self.state = snapshot;
        }
        result
    }
}
