use anchor_lang::prelude::*;
use anchor_lang::solana_program::{program::invoke, system_instruction};
use anchor_spl::token::{self, MintTo};

use crate::errors::TicketFarmError;
use crate::events::PrizeClaimed;
use crate::math::{check_payment, claim_fee};
use crate::Claim;

/// Redeems `amount` won units of `prize_id`. `payment` is the most the
/// caller is willing to pay; exactly the claim fee is charged.
pub fn claim(
    ctx: Context<Claim>,
    catalog_id: u8,
    prize_id: u64,
    amount: u64,
    payment: u64,
) -> Result<()> {
    let cfg = &ctx.accounts.config;
    require!(!cfg.paused, TicketFarmError::Paused);

    let (index, entry) = ctx.accounts.catalog.prize(prize_id)?;
    let entry = *entry;
    require_keys_eq!(
        entry.mint,
        ctx.accounts.prize_mint.key(),
        TicketFarmError::PrizeMintMismatch
    );

    let user_key = ctx.accounts.user.key();
    let prizes = &mut ctx.accounts.user_prizes;
    if !prizes.is_initialized() {
        prizes.user = user_key;
        prizes.catalog_id = catalog_id;
        prizes.bump = ctx.bumps.user_prizes;
    }

    prizes.debit(index, amount)?;

    let fee = claim_fee(entry.fee_price, amount)?;
    check_payment(fee, payment)?;

    if fee > 0 {
        let ix = system_instruction::transfer(&user_key, &ctx.accounts.treasury_sol.key(), fee);
        invoke(
            &ix,
            &[
                ctx.accounts.user.to_account_info(),
                ctx.accounts.treasury_sol.to_account_info(),
                ctx.accounts.system_program.to_account_info(),
            ],
        )?;
    }

    let cfg_seeds: &[&[&[u8]]] = &[&[crate::CONFIG_SEED, &[cfg.bump]]];

    token::mint_to(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            MintTo {
                mint: ctx.accounts.prize_mint.to_account_info(),
                to: ctx.accounts.user_prize_account.to_account_info(),
                authority: ctx.accounts.config.to_account_info(),
            },
            cfg_seeds,
        ),
        amount,
    )?;

    emit!(PrizeClaimed {
        user: user_key,
        catalog_id,
        prize_id,
        amount,
        fee,
    });

    Ok(())
}
