//! Read-only instructions. Results are returned through Anchor return data,
//! so clients read them with a simulated transaction.

use anchor_lang::prelude::*;

use crate::constants::MAX_POOLS;
use crate::errors::TicketFarmError;
use crate::math::{claim_fee, Emission};
use crate::state::{Catalog, Pool, UserPrizes, UserStake};
use crate::utils::load_program_account;
use crate::{
    CatalogView, PendingTickets, TicketBalance, UnclaimedBalance, POOL_SEED, USER_STAKE_SEED,
};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PrizeSupplyInfo {
    pub max_supply: u64,
    pub remaining: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnclaimedPrize {
    pub prize_id: u64,
    pub count: u64,
}

pub fn pending_tickets(ctx: Context<PendingTickets>, _pool_id: u64, _user: Pubkey) -> Result<u64> {
    let now = Clock::get()?.slot;
    let emission = ctx.accounts.config.emission();

    ctx.accounts
        .pool
        .pending_at(&ctx.accounts.user_stake, &emission, now)
}

/// Stored balance plus what every `(pool, user_stake)` pair in the
/// remaining accounts would harvest right now.
pub fn ticket_balance<'info>(
    ctx: Context<'_, '_, 'info, 'info, TicketBalance<'info>>,
    user: Pubkey,
) -> Result<u64> {
    let rem = ctx.remaining_accounts;
    require!(rem.len() % 2 == 0, TicketFarmError::UnpairedAccounts);
    require!(rem.len() / 2 <= MAX_POOLS, TicketFarmError::TooManyPools);

    let now = Clock::get()?.slot;
    let emission = ctx.accounts.config.emission();
    let program_id = ctx.program_id;

    let mut positions: Vec<(Pool, UserStake)> = Vec::with_capacity(rem.len() / 2);

    for pair in rem.chunks(2) {
        let (pool_ai, stake_ai) = (&pair[0], &pair[1]);

        let pool: Pool = load_program_account(pool_ai, program_id)?;
        let pool_le = pool.pool_id.to_le_bytes();
        let expected_pool = Pubkey::create_program_address(
            &[POOL_SEED, &pool_le, &[pool.bump]],
            program_id,
        )
        .map_err(|_| error!(TicketFarmError::PoolPdaMismatch))?;
        require_keys_eq!(expected_pool, pool_ai.key(), TicketFarmError::PoolPdaMismatch);

        let stake: UserStake = load_program_account(stake_ai, program_id)?;
        require!(
            stake.user == user && stake.pool_id == pool.pool_id,
            TicketFarmError::UserStakePdaMismatch
        );
        let expected_stake = Pubkey::create_program_address(
            &[USER_STAKE_SEED, &pool_le, user.as_ref(), &[stake.bump]],
            program_id,
        )
        .map_err(|_| error!(TicketFarmError::UserStakePdaMismatch))?;
        require_keys_eq!(expected_stake, stake_ai.key(), TicketFarmError::UserStakePdaMismatch);

        positions.push((pool, stake));
    }

    balance_with_pending(ctx.accounts.user_tickets.balance, &positions, &emission, now)
}

/// `stored` plus the pending tickets of each position. A pool may appear
/// only once, otherwise its pending amount would be counted twice.
pub fn balance_with_pending(
    stored: u64,
    positions: &[(Pool, UserStake)],
    emission: &Emission,
    now: u64,
) -> Result<u64> {
    let mut seen: Vec<u64> = Vec::with_capacity(positions.len());
    let mut total = stored;

    for (pool, stake) in positions {
        require!(!seen.contains(&pool.pool_id), TicketFarmError::DuplicatePool);
        seen.push(pool.pool_id);

        let pending = pool.pending_at(stake, emission, now)?;
        total = total.checked_add(pending).ok_or(TicketFarmError::MathOverflow)?;
    }

    Ok(total)
}

pub fn prize_supply(ctx: Context<CatalogView>, _catalog_id: u8, prize_id: u64) -> Result<PrizeSupplyInfo> {
    let (_, entry) = ctx.accounts.catalog.prize(prize_id)?;
    Ok(PrizeSupplyInfo {
        max_supply: entry.max_supply,
        remaining: entry.remaining,
    })
}

pub fn claim_fee_quote(
    ctx: Context<CatalogView>,
    _catalog_id: u8,
    prize_id: u64,
    amount: u64,
) -> Result<u64> {
    let (_, entry) = ctx.accounts.catalog.prize(prize_id)?;
    claim_fee(entry.fee_price, amount)
}

pub fn unclaimed_balance(
    ctx: Context<UnclaimedBalance>,
    _catalog_id: u8,
    _user: Pubkey,
    prize_id: u64,
) -> Result<u64> {
    let (index, _) = ctx.accounts.catalog.prize(prize_id)?;
    Ok(ctx.accounts.user_prizes.balance(index))
}

/// Every prize the user holds unredeemed units of, in catalog order.
/// Prizes with a zero count are left out.
pub fn user_unclaimed(
    ctx: Context<UnclaimedBalance>,
    _catalog_id: u8,
    _user: Pubkey,
) -> Result<Vec<UnclaimedPrize>> {
    Ok(unclaimed_listing(&ctx.accounts.catalog, &ctx.accounts.user_prizes))
}

pub fn unclaimed_listing(catalog: &Catalog, prizes: &UserPrizes) -> Vec<UnclaimedPrize> {
    catalog
        .prizes
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| match prizes.balance(index) {
            0 => None,
            count => Some(UnclaimedPrize {
                prize_id: entry.prize_id,
                count,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emission() -> Emission {
        Emission {
            ticket_per_slot: 100,
            start_slot: 0,
            total_alloc_point: 200,
        }
    }

    fn staked_pool(pool_id: u64, amount: u64) -> (Pool, UserStake) {
        let pool = Pool {
            pool_id,
            alloc_point: 100,
            total_staked: amount,
            ..Default::default()
        };
        let stake = UserStake {
            pool_id,
            amount,
            ..Default::default()
        };
        (pool, stake)
    }

    #[test]
    fn balance_adds_pending_of_each_pool() {
        let e = emission();
        let positions = vec![staked_pool(0, 10), staked_pool(1, 40)];

        // each pool earns 50 per slot; both positions own their whole pool
        assert_eq!(balance_with_pending(7, &positions, &e, 4).unwrap(), 7 + 200 + 200);
        assert_eq!(balance_with_pending(7, &[], &e, 4).unwrap(), 7);
    }

    #[test]
    fn balance_rejects_a_pool_listed_twice() {
        let e = emission();
        let positions = vec![staked_pool(0, 10), staked_pool(0, 10)];

        assert_eq!(
            balance_with_pending(0, &positions, &e, 4).err(),
            Some(TicketFarmError::DuplicatePool.into())
        );
    }

    #[test]
    fn listing_reports_nonzero_counts_by_prize_id() {
        let mut catalog = Catalog::default();
        for (prize_id, supply) in [(11u64, 5u64), (22, 5), (33, 5)] {
            catalog
                .add_prize(prize_id, Pubkey::new_unique(), supply, 0)
                .unwrap();
        }

        let mut prizes = UserPrizes::default();
        assert!(unclaimed_listing(&catalog, &prizes).is_empty());

        prizes.credit(0, 2).unwrap();
        prizes.credit(2, 1).unwrap();
        assert_eq!(
            unclaimed_listing(&catalog, &prizes),
            vec![
                UnclaimedPrize { prize_id: 11, count: 2 },
                UnclaimedPrize { prize_id: 33, count: 1 },
            ]
        );

        prizes.debit(0, 2).unwrap();
        assert_eq!(
            unclaimed_listing(&catalog, &prizes),
            vec![UnclaimedPrize { prize_id: 33, count: 1 }]
        );
    }
}
