use anchor_lang::prelude::*;
use anchor_lang::solana_program::{
    program::{invoke, invoke_signed},
    system_instruction, system_program,
};

use crate::constants::MAX_AIRDROP_BATCH;
use crate::errors::TicketFarmError;
use crate::events::Airdropped;
use crate::state::{UserPrizes, UserStake};
use crate::utils::{load_program_account, store_program_account};
use crate::{Airdrop, USER_PRIZES_SEED, USER_STAKE_SEED};

/// Gives one unit of `prize_id` to every staker of `pool_id` listed in the
/// remaining accounts as `(user_stake, user_prizes)` pairs. Zero stakes are
/// skipped. Missing prize records are created at the admin's expense.
pub fn airdrop<'info>(
    ctx: Context<'_, '_, 'info, 'info, Airdrop<'info>>,
    catalog_id: u8,
    prize_id: u64,
    pool_id: u64,
) -> Result<()> {
    let rem: &'info [AccountInfo<'info>] = ctx.remaining_accounts;
    require!(rem.len() % 2 == 0, TicketFarmError::UnpairedAccounts);
    require!(
        rem.len() / 2 <= MAX_AIRDROP_BATCH,
        TicketFarmError::TooManyEntries
    );

    let program_id = ctx.program_id;
    let pool_le = pool_id.to_le_bytes();
    let catalog_le = catalog_id.to_le_bytes();

    // --- 1) validate stakes, pick recipients ---
    let mut stakes: Vec<UserStake> = Vec::with_capacity(rem.len() / 2);
    for pair in rem.chunks(2) {
        let stake_ai = &pair[0];

        let stake: UserStake = load_program_account(stake_ai, program_id)?;
        let expected_stake = Pubkey::create_program_address(
            &[USER_STAKE_SEED, &pool_le, stake.user.as_ref(), &[stake.bump]],
            program_id,
        )
        .map_err(|_| error!(TicketFarmError::UserStakePdaMismatch))?;
        require_keys_eq!(expected_stake, stake_ai.key(), TicketFarmError::UserStakePdaMismatch);

        stakes.push(stake);
    }
    let recipients = select_recipients(&stakes, pool_id)?;

    // --- 2) take supply up front (all or nothing) ---
    let catalog = &mut ctx.accounts.catalog;
    let (index, _) = catalog.prize(prize_id)?;
    catalog.allocate(index, recipients.len() as u64)?;
    let remaining = catalog.prizes[index].remaining;

    // --- 3) credit recipients, creating records as needed ---
    let space = 8 + UserPrizes::INIT_SPACE;
    let rent_minimum = Rent::get()?.minimum_balance(space);

    for &i in recipients.iter() {
        let user = stakes[i].user;
        let prizes_ai = &rem[2 * i + 1];

        let (expected_pda, bump) =
            Pubkey::find_program_address(&[USER_PRIZES_SEED, &catalog_le, user.as_ref()], program_id);
        require_keys_eq!(expected_pda, *prizes_ai.key, TicketFarmError::UserPrizesPdaMismatch);

        let mut prizes = if prizes_ai.data_is_empty() {
            require_keys_eq!(
                *prizes_ai.owner,
                system_program::ID,
                TicketFarmError::UserPrizesPdaMismatch
            );
            let prizes_signer: &[&[u8]] = &[USER_PRIZES_SEED, &catalog_le, user.as_ref(), &[bump]];
            create_user_prizes(&ctx, prizes_ai, prizes_signer, space, rent_minimum)?;

            UserPrizes {
                user,
                catalog_id,
                bump,
                unclaimed: Vec::new(),
            }
        } else {
            load_program_account::<UserPrizes>(prizes_ai, program_id)?
        };

        prizes.credit(index, 1)?;
        store_program_account(prizes_ai, &prizes)?;
    }

    emit!(Airdropped {
        catalog_id,
        prize_id,
        pool_id,
        recipients: recipients.len() as u64,
        remaining,
    });

    Ok(())
}

/// Positions of the stakes that receive a unit: every stake in `pool_id`
/// with a non-zero amount, in the given order. A user listed twice fails
/// the whole batch, even when one of the entries is empty.
pub fn select_recipients(stakes: &[UserStake], pool_id: u64) -> Result<Vec<usize>> {
    let mut seen: Vec<Pubkey> = Vec::with_capacity(stakes.len());
    let mut recipients = Vec::with_capacity(stakes.len());

    for (i, stake) in stakes.iter().enumerate() {
        require!(stake.pool_id == pool_id, TicketFarmError::UserStakePdaMismatch);
        require!(!seen.contains(&stake.user), TicketFarmError::DuplicateRecipient);
        seen.push(stake.user);

        if stake.amount > 0 {
            recipients.push(i);
        }
    }

    Ok(recipients)
}

/// Lamports the payer still owes for an account already holding `current`.
pub fn rent_top_up(current: u64, rent_minimum: u64) -> u64 {
    rent_minimum.saturating_sub(current)
}

/// Creates a `UserPrizes` PDA paid by the admin. An address that already
/// received lamports cannot go through `create_account`, so it is topped up
/// to the rent minimum, then allocated and assigned under the PDA seeds.
fn create_user_prizes<'info>(
    ctx: &Context<'_, '_, 'info, 'info, Airdrop<'info>>,
    prizes_ai: &AccountInfo<'info>,
    prizes_signer: &[&[u8]],
    space: usize,
    rent_minimum: u64,
) -> Result<()> {
    let admin_ai = ctx.accounts.admin.to_account_info();
    let system_ai = ctx.accounts.system_program.to_account_info();
    let current = prizes_ai.lamports();

    if current == 0 {
        let ix = system_instruction::create_account(
            admin_ai.key,
            prizes_ai.key,
            rent_minimum,
            space as u64,
            ctx.program_id,
        );
        invoke_signed(
            &ix,
            &[admin_ai, prizes_ai.clone(), system_ai],
            &[prizes_signer],
        )?;
        return Ok(());
    }

    let top_up = rent_top_up(current, rent_minimum);
    if top_up > 0 {
        let ix = system_instruction::transfer(admin_ai.key, prizes_ai.key, top_up);
        invoke(&ix, &[admin_ai, prizes_ai.clone(), system_ai.clone()])?;
    }

    let ix = system_instruction::allocate(prizes_ai.key, space as u64);
    invoke_signed(&ix, &[prizes_ai.clone(), system_ai.clone()], &[prizes_signer])?;

    let ix = system_instruction::assign(prizes_ai.key, ctx.program_id);
    invoke_signed(&ix, &[prizes_ai.clone(), system_ai], &[prizes_signer])?;

    Ok(())
}
