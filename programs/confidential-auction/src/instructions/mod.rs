pub mod create_auction;
pub use create_auction::*;
pub mod submit_bid;
pub use submit_bid::*;
pub mod end_auction;
pub use end_auction::*;
pub mod request_result_access;
pub use request_result_access::*;
pub mod reveal_winner;
pub use reveal_winner::*;
pub mod claim_refund;
pub use claim_refund::*;
pub mod seller_claim_winnings;
pub use seller_claim_winnings::*;
