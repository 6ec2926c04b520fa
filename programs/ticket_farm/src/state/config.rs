use anchor_lang::prelude::*;

use crate::math::Emission;

#[account]
#[derive(InitSpace)]
pub struct Config {
    pub admin: Pubkey,
    pub bump: u8,

    /// Tickets (base units) emitted per slot across all pools.
    pub ticket_per_slot: u64,
    /// No tickets accrue before this slot.
    pub start_slot: u64,

    /// Sum of `Pool::alloc_point` over every pool.
    pub total_alloc_point: u64,
    /// Number of pools created; also the id of the next pool.
    pub pool_count: u64,

    // System-owned PDA collecting claim fees (lamports, no data)
    pub treasury_sol: Pubkey,
    pub treasury_sol_bump: u8,

    pub paused: bool,
    pub version: u16,
}

impl Config {
    pub fn emission(&self) -> Emission {
        Emission {
            ticket_per_slot: self.ticket_per_slot,
            start_slot: self.start_slot,
            total_alloc_point: self.total_alloc_point,
        }
    }
}
