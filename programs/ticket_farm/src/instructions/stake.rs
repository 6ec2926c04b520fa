use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::errors::TicketFarmError;
use crate::events::{Deposited, EmergencyWithdrawn, Withdrawn};
use crate::utils::settle_pools;
use crate::{Deposit, EmergencyWithdraw, MassUpdatePools, UpdatePool, Withdraw};

/// Stakes `amount` into a pool. Pending tickets are harvested first;
/// `amount == 0` only harvests.
pub fn deposit(ctx: Context<Deposit>, pool_id: u64, amount: u64) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, TicketFarmError::Paused);
    let emission = cfg.emission();

    let now = Clock::get()?.slot;
    let user_key = ctx.accounts.user.key();

    let stake = &mut ctx.accounts.user_stake;
    if !stake.is_initialized() {
        stake.user = user_key;
        stake.pool_id = pool_id;
        stake.bump = ctx.bumps.user_stake;
        stake.created_slot = now;
    }

    let tickets = &mut ctx.accounts.user_tickets;
    if !tickets.is_initialized() {
        tickets.user = user_key;
        tickets.bump = ctx.bumps.user_tickets;
    }

    let pool = &mut ctx.accounts.pool;
    let harvested = pool.deposit(stake, &emission, now, amount)?;
    tickets.credit(harvested)?;
    stake.updated_slot = now;

    if amount > 0 {
        token::transfer(
            CpiContext::new(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.user_token_account.to_account_info(),
                    to: ctx.accounts.pool_vault.to_account_info(),
                    authority: ctx.accounts.user.to_account_info(),
                },
            ),
            amount,
        )?;
    }

    emit!(Deposited {
        user: user_key,
        pool_id,
        amount,
        harvested,
    });

    Ok(())
}

/// Unstakes `amount` after harvesting. Not gated by pause so stakers can
/// always leave.
pub fn withdraw(ctx: Context<Withdraw>, pool_id: u64, amount: u64) -> Result<()> {
    let emission = ctx.accounts.config.emission();
    let now = Clock::get()?.slot;
    let user_key = ctx.accounts.user.key();

    let stake = &mut ctx.accounts.user_stake;
    let pool = &mut ctx.accounts.pool;

    let harvested = pool.withdraw(stake, &emission, now, amount)?;
    ctx.accounts.user_tickets.credit(harvested)?;
    stake.updated_slot = now;

    if amount > 0 {
        let pool_le = pool_id.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, &pool_le, &[pool.bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.pool_vault.to_account_info(),
                    to: ctx.accounts.user_token_account.to_account_info(),
                    authority: pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(Withdrawn {
        user: user_key,
        pool_id,
        amount,
        harvested,
    });

    Ok(())
}

/// Returns the whole principal without settling; pending tickets are lost.
pub fn emergency_withdraw(ctx: Context<EmergencyWithdraw>, pool_id: u64) -> Result<()> {
    let now = Clock::get()?.slot;

    let stake = &mut ctx.accounts.user_stake;
    let pool = &mut ctx.accounts.pool;

    let amount = pool.emergency_withdraw(stake);
    stake.updated_slot = now;

    if amount > 0 {
        let pool_le = pool_id.to_le_bytes();
        let signer_seeds: &[&[&[u8]]] = &[&[crate::POOL_SEED, &pool_le, &[pool.bump]]];

        token::transfer(
            CpiContext::new_with_signer(
                ctx.accounts.token_program.to_account_info(),
                Transfer {
                    from: ctx.accounts.pool_vault.to_account_info(),
                    to: ctx.accounts.user_token_account.to_account_info(),
                    authority: pool.to_account_info(),
                },
                signer_seeds,
            ),
            amount,
        )?;
    }

    emit!(EmergencyWithdrawn {
        user: ctx.accounts.user.key(),
        pool_id,
        amount,
    });

    Ok(())
}

pub fn update_pool(ctx: Context<UpdatePool>, pool_id: u64) -> Result<()> {
    let emission = ctx.accounts.config.emission();
    let now = Clock::get()?.slot;

    let pool = &mut ctx.accounts.pool;
    pool.settle(&emission, now)?;

    msg!(
        "Pool {} settled at slot {}: acc={}",
        pool_id,
        now,
        pool.acc_ticket_per_share
    );
    Ok(())
}

/// Settles every pool; all `pool_count` pools must be passed, in id order,
/// as writable remaining accounts.
pub fn mass_update_pools<'info>(
    ctx: Context<'_, '_, 'info, 'info, MassUpdatePools<'info>>,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    let now = Clock::get()?.slot;

    settle_pools(
        ctx.program_id,
        ctx.remaining_accounts,
        &cfg.emission(),
        cfg.pool_count,
        None,
        now,
    )?;

    msg!("Settled {} pools at slot {}", cfg.pool_count, now);
    Ok(())
}
