use anchor_lang::prelude::*;

#[error_code]
pub enum TicketFarmError {
    #[msg("Unauthorized")]
    Unauthorized,
    #[msg("Protocol paused")]
    Paused,
    #[msg("Math overflow")]
    MathOverflow,

    // -----------------
    // Staking
    // -----------------
    #[msg("Withdraw amount exceeds staked amount")]
    InsufficientBalance,

    #[msg("Pool PDA mismatch")]
    PoolPdaMismatch,

    #[msg("Pool accounts must list every pool in id order")]
    PoolListMismatch,

    #[msg("Too many pools")]
    TooManyPools,

    #[msg("Pool listed twice")]
    DuplicatePool,

    #[msg("Staking mint does not match pool")]
    StakingMintMismatch,

    #[msg("Invalid user token account")]
    InvalidUserTokenAccount,

    #[msg("User stake PDA mismatch")]
    UserStakePdaMismatch,

    // -----------------
    // Tickets / draws
    // -----------------
    #[msg("Tickets are not enough")]
    InsufficientTickets,

    #[msg("Prize catalog is out of stock")]
    OutOfStock,

    #[msg("SlotHashes sysvar unavailable")]
    SlotHashesUnavailable,

    // -----------------
    // Catalog
    // -----------------
    #[msg("Invalid catalog id")]
    InvalidCatalog,

    #[msg("Prize already exists")]
    PrizeAlreadyExists,

    #[msg("Prize not found")]
    PrizeNotFound,

    #[msg("Catalog is full")]
    CatalogFull,

    #[msg("Max supply must be positive")]
    InvalidSupply,

    #[msg("Prize mint does not match catalog")]
    PrizeMintMismatch,

    #[msg("Prize mint must have 0 decimals and back a single prize")]
    InvalidPrizeMint,

    // -----------------
    // Claims
    // -----------------
    #[msg("zero amount")]
    ZeroAmount,

    #[msg("bad amount")]
    InvalidAmount,

    #[msg("Claim fee not fully paid")]
    InsufficientPayment,

    #[msg("Insufficient treasury funds")]
    InsufficientTreasuryFunds,

    // -----------------
    // Airdrop
    // -----------------
    #[msg("Too many entries")]
    TooManyEntries,

    #[msg("Remaining accounts must come in (stake, prizes) pairs")]
    UnpairedAccounts,

    #[msg("Recipient listed twice")]
    DuplicateRecipient,

    #[msg("User prizes PDA mismatch")]
    UserPrizesPdaMismatch,

    #[msg("Account not owned by program")]
    AccountNotOwnedByProgram,

    #[msg("Failed to borrow account data")]
    AccountBorrowFailed,
}
