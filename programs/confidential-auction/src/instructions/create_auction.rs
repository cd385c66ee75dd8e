use anchor_lang::prelude::*;

use crate::{
    constants::MAX_TITLE_LEN,
    error::AuctionError,
    events::AuctionCreated,
    state::{AuctionState, RevealPolicy},
};

/// Deployment parameters.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct AuctionConfig {
    pub title: String,
    pub bidding_duration: i64, // Seconds from creation
    pub minimum_bid: u64,      // Minimum escrow in lamports
    pub reveal_policy: RevealPolicy,
}

impl AuctionConfig {
    pub fn new(title: impl Into<String>, bidding_duration: i64, minimum_bid: u64) -> Self {
        Self {
            title: title.into(),
            bidding_duration,
            minimum_bid,
            reveal_policy: RevealPolicy::default(),
        }
    }

    pub fn with_reveal_policy(mut self, reveal_policy: RevealPolicy) -> Self {
        self.reveal_policy = reveal_policy;
        self
    }
}

pub struct CreateAuction {
    /// Deployer, becomes the seller
    pub seller: Pubkey,
}

impl CreateAuction {
    pub fn handler(&self, clock: &Clock, config: AuctionConfig) -> Result<AuctionState> {
        require!(
            !config.title.is_empty() && config.title.len() <= MAX_TITLE_LEN,
            AuctionError::InvalidTitle
        );
        require!(config.bidding_duration > 0, AuctionError::InvalidDuration);

        let end_time = clock
            .unix_timestamp
            .checked_add(config.bidding_duration)
            .ok_or(AuctionError::MathOverflow)?;

        emit!(AuctionCreated {
            seller: self.seller,
            title: config.title.clone(),
            end_time,
            minimum_bid: config.minimum_bid,
            reveal_policy: config.reveal_policy,
        });
        msg!("Auction created, bidding closes at {}", end_time);

        Ok(AuctionState::new(
            config.title,
            self.seller,
            end_time,
            config.minimum_bid,
            config.reveal_policy,
        ))
    }
}
