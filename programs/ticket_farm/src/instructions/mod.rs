pub mod admin;
pub mod airdrop;
pub mod claim;
pub mod draw;
pub mod stake;
pub mod views;

pub use views::{PrizeSupplyInfo, UnclaimedPrize};
