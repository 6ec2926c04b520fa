use anchor_lang::prelude::*;

// --- GLOBAL & ADMIN ---
#[event]
pub struct FarmInitialized {
    pub admin: Pubkey,
    pub ticket_per_slot: u64,
    pub start_slot: u64,
}

#[event]
pub struct PauseChanged {
    pub is_paused: bool,
}

#[event]
pub struct AdminTransferred {
    pub previous_admin: Pubkey,
    pub new_admin: Pubkey,
}

#[event]
pub struct PoolAdded {
    pub pool_id: u64,
    pub staking_mint: Pubkey,
    pub alloc_point: u64,
    pub total_alloc_point: u64,
}

#[event]
pub struct PoolWeightSet {
    pub pool_id: u64,
    pub old_alloc_point: u64,
    pub new_alloc_point: u64,
    pub total_alloc_point: u64,
}

#[event]
pub struct PrizeAdded {
    pub catalog_id: u8,
    pub prize_id: u64,
    pub mint: Pubkey,
    pub max_supply: u64,
    pub fee_price: u64,
}

// --- STAKING ---
#[event]
pub struct Deposited {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
    pub harvested: u64,
}

#[event]
pub struct Withdrawn {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
    pub harvested: u64,
}

#[event]
pub struct EmergencyWithdrawn {
    pub user: Pubkey,
    pub pool_id: u64,
    pub amount: u64,
}

// --- PRIZES ---
#[event]
pub struct PrizeDrawn {
    pub user: Pubkey,
    pub catalog_id: u8,
    pub prize_id: u64,
    pub remaining: u64,
    pub tickets_left: u64,
}

#[event]
pub struct PrizeClaimed {
    pub user: Pubkey,
    pub catalog_id: u8,
    pub prize_id: u64,
    pub amount: u64,
    pub fee: u64,
}

#[event]
pub struct Airdropped {
    pub catalog_id: u8,
    pub prize_id: u64,
    pub pool_id: u64,
    pub recipients: u64,
    pub remaining: u64,
}
