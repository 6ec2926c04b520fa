use anchor_lang::prelude::*;
use anchor_lang::solana_program::program_option::COption;
use anchor_lang::solana_program::{program::invoke_signed, system_instruction};

use anchor_spl::token::{self, SetAuthority};
use anchor_spl::token::spl_token::instruction::AuthorityType;

use crate::constants::*;
use crate::errors::TicketFarmError;
use crate::events::*;
use crate::utils::{check_catalog_id, check_prize_mint_decimals, settle_pools};
use crate::{
    AddPool, AddPrize, InitializeCatalog, InitializeConfig, SetPause, SetPool, TransferAdmin,
    WithdrawTreasury,
};

/// `ticket_per_slot == 0` selects `DEFAULT_TICKET_PER_SLOT`.
pub fn initialize_config(
    ctx: Context<InitializeConfig>,
    ticket_per_slot: u64,
    start_slot: u64,
) -> Result<()> {
    let ticket_per_slot = if ticket_per_slot == 0 {
        DEFAULT_TICKET_PER_SLOT
    } else {
        ticket_per_slot
    };

    let cfg = &mut ctx.accounts.config;

    cfg.admin = ctx.accounts.admin.key();
    cfg.bump = ctx.bumps.config;

    cfg.ticket_per_slot = ticket_per_slot;
    cfg.start_slot = start_slot;
    cfg.total_alloc_point = 0;
    cfg.pool_count = 0;

    cfg.treasury_sol = ctx.accounts.treasury_sol.key();
    cfg.treasury_sol_bump = ctx.bumps.treasury_sol;

    cfg.paused = false;
    cfg.version = INITIAL_VERSION;

    emit!(FarmInitialized {
        admin: cfg.admin,
        ticket_per_slot,
        start_slot,
    });

    Ok(())
}

pub fn set_pause(ctx: Context<SetPause>, paused: bool) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    cfg.paused = paused;

    emit!(PauseChanged { is_paused: paused });
    Ok(())
}

/// Hands the admin role over. `Pubkey::default()` renounces it for good.
pub fn transfer_admin(ctx: Context<TransferAdmin>, new_admin: Pubkey) -> Result<()> {
    let cfg = &mut ctx.accounts.config;
    let previous_admin = cfg.admin;
    cfg.admin = new_admin;

    emit!(AdminTransferred {
        previous_admin,
        new_admin,
    });
    Ok(())
}

pub fn add_pool<'info>(
    ctx: Context<'_, '_, 'info, 'info, AddPool<'info>>,
    alloc_point: u64,
    with_update: bool,
) -> Result<()> {
    let now = Clock::get()?.slot;

    let cfg = &mut ctx.accounts.config;
    require!(
        cfg.pool_count < MAX_POOLS as u64,
        TicketFarmError::TooManyPools
    );

    if with_update {
        settle_pools(
            ctx.program_id,
            ctx.remaining_accounts,
            &cfg.emission(),
            cfg.pool_count,
            None,
            now,
        )?;
    }

    let pool_id = cfg.pool_count;
    cfg.total_alloc_point = cfg
        .total_alloc_point
        .checked_add(alloc_point)
        .ok_or(TicketFarmError::MathOverflow)?;
    cfg.pool_count = pool_id.checked_add(1).ok_or(TicketFarmError::MathOverflow)?;

    let pool = &mut ctx.accounts.pool;
    pool.pool_id = pool_id;
    pool.bump = ctx.bumps.pool;

    pool.staking_mint = ctx.accounts.staking_mint.key();
    pool.vault = ctx.accounts.pool_vault.key();
    pool.vault_bump = ctx.bumps.pool_vault;

    pool.alloc_point = alloc_point;
    pool.total_staked = 0;
    pool.acc_ticket_per_share = 0;
    pool.last_reward_slot = now.max(cfg.start_slot);
    pool.created_slot = now;

    emit!(PoolAdded {
        pool_id,
        staking_mint: pool.staking_mint,
        alloc_point,
        total_alloc_point: cfg.total_alloc_point,
    });

    Ok(())
}

/// Reweights one pool. The pool is always settled under the old weight
/// first; `with_update` also settles every other pool.
pub fn set_pool<'info>(
    ctx: Context<'_, '_, 'info, 'info, SetPool<'info>>,
    pool_id: u64,
    alloc_point: u64,
    with_update: bool,
) -> Result<()> {
    let now = Clock::get()?.slot;

    let cfg = &mut ctx.accounts.config;
    let emission = cfg.emission();

    let pool = &mut ctx.accounts.pool;
    require!(pool.pool_id == pool_id, TicketFarmError::PoolPdaMismatch);
    pool.settle(&emission, now)?;

    if with_update {
        settle_pools(
            ctx.program_id,
            ctx.remaining_accounts,
            &emission,
            cfg.pool_count,
            Some(pool_id),
            now,
        )?;
    }

    let old_alloc_point = pool.alloc_point;
    cfg.total_alloc_point = cfg
        .total_alloc_point
        .checked_sub(old_alloc_point)
        .ok_or(TicketFarmError::MathOverflow)?
        .checked_add(alloc_point)
        .ok_or(TicketFarmError::MathOverflow)?;
    pool.alloc_point = alloc_point;

    emit!(PoolWeightSet {
        pool_id,
        old_alloc_point,
        new_alloc_point: alloc_point,
        total_alloc_point: cfg.total_alloc_point,
    });

    Ok(())
}

pub fn initialize_catalog(ctx: Context<InitializeCatalog>, catalog_id: u8) -> Result<()> {
    check_catalog_id(catalog_id)?;

    let catalog = &mut ctx.accounts.catalog;
    catalog.catalog_id = catalog_id;
    catalog.bump = ctx.bumps.catalog;
    catalog.total_max_supply = 0;
    catalog.total_remaining = 0;
    catalog.prizes = Vec::new();
    catalog.version = INITIAL_VERSION;

    msg!("Catalog {} initialized", catalog_id);
    Ok(())
}

pub fn add_prize(
    ctx: Context<AddPrize>,
    catalog_id: u8,
    prize_id: u64,
    max_supply: u64,
    fee_price: u64,
) -> Result<()> {
    check_prize_mint_decimals(ctx.accounts.prize_mint.decimals)?;

    let mint = ctx.accounts.prize_mint.key();
    ctx.accounts
        .catalog
        .add_prize(prize_id, mint, max_supply, fee_price)?;

    // move the prize mint authority to the config PDA so claims can mint
    let cfg_key = ctx.accounts.config.key();
    if ctx.accounts.prize_mint.mint_authority != COption::Some(cfg_key) {
        let cpi_program = ctx.accounts.token_program.to_account_info();
        let cpi_accounts = SetAuthority {
            account_or_mint: ctx.accounts.prize_mint.to_account_info(),
            current_authority: ctx.accounts.admin.to_account_info(),
        };

        token::set_authority(
            CpiContext::new(cpi_program, cpi_accounts),
            AuthorityType::MintTokens,
            Some(cfg_key),
        )?;
    }

    emit!(PrizeAdded {
        catalog_id,
        prize_id,
        mint,
        max_supply,
        fee_price,
    });

    Ok(())
}

/// Sends collected claim fees to the admin. `amount == 0` drains
/// everything above the rent-exempt minimum.
pub fn withdraw_treasury(ctx: Context<WithdrawTreasury>, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;

    let treasury_info = ctx.accounts.treasury_sol.to_account_info();
    let min_rent = Rent::get()?.minimum_balance(0);
    let current_lamports = treasury_info.lamports();

    let withdraw_amount = if amount == 0 {
        current_lamports.saturating_sub(min_rent)
    } else {
        amount
    };

    require!(
        current_lamports >= withdraw_amount.saturating_add(min_rent),
        TicketFarmError::InsufficientTreasuryFunds
    );

    if withdraw_amount == 0 {
        return Ok(());
    }

    let ix = system_instruction::transfer(
        &ctx.accounts.treasury_sol.key(),
        &ctx.accounts.admin.key(),
        withdraw_amount,
    );
    let signer_seeds: &[&[u8]] = &[crate::TREASURY_SOL_SEED, &[cfg.treasury_sol_bump]];

    invoke_signed(
        &ix,
        &[
            treasury_info,
            ctx.accounts.admin.to_account_info(),
            ctx.accounts.system_program.to_account_info(),
        ],
        &[signer_seeds],
    )?;

    msg!("Treasury withdrawal: {} lamports", withdraw_amount);
    Ok(())
}
