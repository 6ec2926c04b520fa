use anchor_lang::prelude::*;

use crate::constants::DRAW_COST;
use crate::errors::TicketFarmError;
use crate::events::PrizeDrawn;
use crate::utils::{draw_seed, most_recent_slothash};
use crate::Draw;

/// Spends `DRAW_COST` tickets on one unit from the catalog, picked with
/// probability proportional to each prize's remaining supply.
pub fn draw(ctx: Context<Draw>, catalog_id: u8) -> Result<()> {
    require!(!ctx.accounts.config.paused, TicketFarmError::Paused);

    let now = Clock::get()?.slot;
    let user_key = ctx.accounts.user.key();

    let tickets = &mut ctx.accounts.user_tickets;
    if !tickets.is_initialized() {
        tickets.user = user_key;
        tickets.bump = ctx.bumps.user_tickets;
    }

    let prizes = &mut ctx.accounts.user_prizes;
    if !prizes.is_initialized() {
        prizes.user = user_key;
        prizes.catalog_id = catalog_id;
        prizes.bump = ctx.bumps.user_prizes;
    }

    let salt = tickets.draws;
    tickets.spend(DRAW_COST)?;

    let recent_slothash = {
        let data = ctx.accounts.recent_slothashes.try_borrow_data()?;
        most_recent_slothash(&data)?
    };
    let seed = draw_seed(&recent_slothash, &user_key, salt, now);

    let catalog = &mut ctx.accounts.catalog;
    let index = catalog.draw(seed)?;
    prizes.credit(index, 1)?;

    let won = catalog.prizes[index];
    emit!(PrizeDrawn {
        user: user_key,
        catalog_id,
        prize_id: won.prize_id,
        remaining: won.remaining,
        tickets_left: tickets.balance,
    });

    Ok(())
}
