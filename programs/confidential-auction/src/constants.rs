/// Upper bound on the auction title, in bytes.
pub const MAX_TITLE_LEN: usize = 64;

/// Domain tag bound into input proofs produced for the shadow backend.
pub const INPUT_PROOF_DOMAIN: &[u8] = b"confidential-auction/input-proof/v1";

/// Domain tag bound into decryption proofs produced for the shadow backend.
pub const DECRYPTION_PROOF_DOMAIN: &[u8] = b"confidential-auction/decryption-proof/v1";
