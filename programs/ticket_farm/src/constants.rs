// Centralized Protocol Constants

// Ticket accounting
// =================

/// One whole ticket in base units (9 decimals, like most SPL mints).
pub const ONE_TICKET: u64 = 1_000_000_000;

/// Scaling factor for `Pool::acc_ticket_per_share`.
/// 1e12 keeps the per-share rounding error below one base unit for any
/// realistic pool size while leaving ~1e26 of headroom in a u128.
pub const ACC_TICKET_PRECISION: u128 = 1_000_000_000_000;

/// Default emission: 100 tickets per slot, shared by all pools by weight.
pub const DEFAULT_TICKET_PER_SLOT: u64 = 100 * ONE_TICKET;

// Draws
// =====

/// Fixed ticket cost of a single draw. Independent of the emission rate.
pub const DRAW_COST: u64 = 1_000 * ONE_TICKET;

/// Number of independent prize catalogs (product lines).
pub const NUM_CATALOGS: u8 = 2;

/// Prize mints are whole-unit tokens: one won unit mints exactly 1 token.
pub const PRIZE_DECIMALS: u8 = 0;

/// Maximum prize entries per catalog. Keep in sync with the `max_len`
/// annotations on `Catalog::prizes` and `UserPrizes::unclaimed`.
pub const MAX_PRIZES: usize = 64;

// Redemption
// ==========

/// Claim fee charged on the catalog fee price (basis points). 300 = 3%.
pub const CLAIM_FEE_BPS: u64 = 300;

pub const BPS_DENOMINATOR: u64 = 10_000;

// Batches
// =======

/// Upper bound on pools settled by a single mass update.
pub const MAX_POOLS: usize = 32;

/// Upper bound on (stake, prizes) pairs handled by one airdrop.
pub const MAX_AIRDROP_BATCH: usize = 16;

/// Initial version for account structures.
pub const INITIAL_VERSION: u16 = 1;
