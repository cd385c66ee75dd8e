use anchor_lang::prelude::error_code;
#[error_code]
pub enum AuctionError {
    #[msg("Invalid auction title")]
    InvalidTitle,
    #[msg("Bidding duration must be positive")]
    InvalidDuration,
    #[msg("Math Overflow")]
    MathOverflow,
    #[msg("Bidding period has closed")]
    BiddingClosed,
    #[msg("Escrow is below the minimum bid")]
    BidBelowMinimum,
    #[msg("Encrypted input failed validation")]
    InvalidCiphertext,
    #[msg("Returning the previous escrow failed")]
    EscrowRefundFailed,
    #[msg("Bidder index space exhausted")]
    TooManyBidders,
    #[msg("Auction is still active")]
    AuctionStillActive,
    #[msg("Auction already ended")]
    AlreadyEnded,
    #[msg("No bids were placed")]
    NoBids,
    #[msg("Auction not ended")]
    AuctionNotEnded,
    #[msg("Winner already revealed")]
    AlreadyRevealed,
    #[msg("Winner index is out of range")]
    InvalidWinnerIndex,
    #[msg("Decryption proof does not match the winner commitment")]
    InvalidDecryptionProof,
    #[msg("Winner has not been revealed yet")]
    WinnerNotRevealedYet,
    #[msg("Caller has not placed a bid")]
    NotABidder,
    #[msg("Winner cannot claim a refund")]
    WinnerCannotRefund,
    #[msg("Refund already claimed")]
    RefundAlreadyClaimed,
    #[msg("Only the seller can do this")]
    NotSeller,
    #[msg("Winnings already claimed")]
    WinningsAlreadyClaimed,
    #[msg("Value transfer failed")]
    TransferFailed,
    #[msg("Recipient rejected the transfer")]
    TransferRejected,
    #[msg("Vault balance is insufficient")]
    VaultInsufficientFunds,
    #[msg("Unknown ciphertext handle")]
    UnknownHandle,
    #[msg("Ciphertext handle has the wrong type")]
    HandleTypeMismatch,
    #[msg("Principal is not allowed to decrypt this handle")]
    AccessDenied,
}
