use anchor_lang::prelude::*;

/// Who is calling, when, and with how much value attached.
#[derive(Clone, Debug, Default)]
pub struct Invocation {
    pub signer: Pubkey,
    pub clock: Clock,
    pub lamports: u64,
}

impl Invocation {
    pub fn new(signer: Pubkey, unix_timestamp: i64) -> Self {
        Self {
            signer,
            clock: Clock {
                unix_timestamp,
                ..Clock::default()
            },
            lamports: 0,
        }
    }

    pub fn with_lamports(mut self, lamports: u64) -> Self {
        self.lamports = lamports;
        self
    }
}
