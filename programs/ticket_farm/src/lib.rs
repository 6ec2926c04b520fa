use anchor_lang::prelude::*;

pub mod constants;
pub mod contexts;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod math;
pub mod state;
pub mod utils;

pub use constants::*;
pub use contexts::*;
pub use errors::*;
pub use instructions::*;
pub use state::*;
pub use utils::*;

declare_id!("J7FWRJqSZWSo7QuB9Ri6fF1NRT4zHby6qH3eHWQ5Fbqu");

#[program]
pub mod ticket_farm {
    use super::*;
    use crate::instructions::{admin, airdrop, claim, draw, stake, views};

    // ----------------------------
    // Admin
    // ----------------------------
    pub fn initialize_config(
        ctx: Context<InitializeConfig>,
        ticket_per_slot: u64,
        start_slot: u64,
    ) -> Result<()> {
        admin::initialize_config(ctx, ticket_per_slot, start_slot)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
        admin::set_pause(ctx, paused)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
        admin::transfer_admin(ctx, new_admin)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn add_pool<'info>(
        ctx: Context<'_, '_, 'info, 'info, AddPool<'info>>,
        alloc_point: u64,
        with_update: bool,
    ) -> Result<()> {
        admin::add_pool(ctx, alloc_point, with_update)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn set_pool<'info>(
        ctx: Context<'_, '_, 'info, 'info, SetPool<'info>>,
        pool_id: u64,
        alloc_point: u64,
        with_update: bool,
    ) -> Result<()> {
        admin::set_pool(ctx, pool_id, alloc_point, with_update)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn initialize_catalog(ctx: Context<InitializeCatalog>, catalog_id: u8) -> Result<()> {
        admin::initialize_catalog(ctx, catalog_id)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn add_prize(
        ctx: Context<AddPrize>,
        catalog_id: u8,
        prize_id: u64,
        max_supply: u64,
        fee_price: u64,
    ) -> Result<()> {
        admin::add_prize(ctx, catalog_id, prize_id, max_supply, fee_price)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn airdrop<'info>(
        ctx: Context<'_, '_, 'info, 'info, Airdrop<'info>>,
        catalog_id: u8,
        prize_id: u64,
        pool_id: u64,
    ) -> Result<()> {
        airdrop::airdrop(ctx, catalog_id, prize_id, pool_id)
    }

    #[access_control(only_admin(&*ctx.accounts))]
    pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
        admin::withdraw_treasury(ctx, amount)
    }

    // ----------------------------
    // Staking
    // ----------------------------
    pub fn deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
        stake::deposit(ctx, pool_id, amount)
    }

    pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
        stake::withdraw(ctx, pool_id, amount)
    }

    pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, pool_id: u64) -> Result<()> {
        stake::emergency_withdraw(ctx, pool_id)
    }

    pub fn update_pool(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
        stake::update_pool(ctx, pool_id)
    }

    pub fn mass_update_pools<'info>(
        ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
    ) -> Result<()> {
        stake::mass_update_pools(ctx)
    }

    // ----------------------------
    // Prizes
    // ----------------------------
    pub fn draw(ctx: Context<Draw>, catalog_id: u8) -> Result<()> {
        draw::draw(ctx, catalog_id)
    }

    pub fn claim(
        ctx: Context<Claim>,
        catalog_id: u8,
        prize_id: u64,
        amount: u64,
        payment: u64,
    ) -> Result<()> {
        claim::claim(ctx, catalog_id, prize_id, amount, payment)
    }

    // ----------------------------
    // Views
    // ----------------------------
    pub fn pending_tickets(ctx: Context<PendingTickets>, pool_id: u64, user: Pubkey) -> Result<u64> {
        views::pending_tickets(ctx, pool_id, user)
    }

    pub fn ticket_balance<'info>(
        ctx: Context<'_, '_, 'info, 'info, TicketBalance<'info>>,
        user: Pubkey,
    ) -> Result<u64> {
        views::ticket_balance(ctx, user)
    }

    pub fn prize_supply(
        ctx: Context<CatalogView>,
        catalog_id: u8,
        prize_id: u64,
    ) -> Result<PrizeSupplyInfo> {
        views::prize_supply(ctx, catalog_id, prize_id)
    }

    pub fn claim_fee(
        ctx: Context<CatalogView>,
        catalog_id: u8,
        prize_id: u64,
        amount: u64,
    ) -> Result<u64> {
        views::claim_fee_quote(ctx, catalog_id, prize_id, amount)
    }

    pub fn unclaimed_balance(
        ctx: Context<UnclaimedBalance>,
        catalog_id: u8,
        user: Pubkey,
        prize_id: u64,
    ) -> Result<u64> {
        views::unclaimed_balance(ctx, catalog_id, user, prize_id)
    }

    pub fn user_unclaimed(
        ctx: Context<UnclaimedBalance>,
        catalog_id: u8,
        user: Pubkey,
    ) -> Result<Vec<UnclaimedPrize>> {
        views::user_unclaimed(ctx, catalog_id, user)
    }
}
