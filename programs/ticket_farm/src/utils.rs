use anchor_lang::prelude::*;
use solana_sha256_hasher::hashv;

use crate::{
    constants::{MAX_POOLS, NUM_CATALOGS, PRIZE_DECIMALS},
    errors::TicketFarmError,
    math::Emission,
    state::{Config, Pool, PrizeEntry},
};

// -----------------
// Seeds / constants
// -----------------
pub const CONFIG_SEED: &[u8] = b"config_v1";
pub const TREASURY_SOL_SEED: &[u8] = b"treasury_sol_v1";

pub const POOL_SEED: &[u8] = b"pool_v1";
pub const POOL_VAULT_SEED: &[u8] = b"pool_vault_v1";
pub const USER_STAKE_SEED: &[u8] = b"user_stake_v1";
pub const USER_TICKETS_SEED: &[u8] = b"user_tickets_v1";

pub const CATALOG_SEED: &[u8] = b"catalog_v1";
pub const USER_PRIZES_SEED: &[u8] = b"user_prizes_v1";

// -------------------------
// Access control
// -------------------------

/// Implemented by every admin-only accounts struct; see `only_admin`.
pub trait AdminGated {
    fn config(&self) -> &Config;
    fn admin(&self) -> Pubkey;
}

/// The single ownership check wired into admin instructions through
/// `#[access_control]`.
pub fn only_admin<T: AdminGated>(accounts: &T) -> Result<()> {
    require_keys_eq!(
        accounts.config().admin,
        accounts.admin(),
        TicketFarmError::Unauthorized
    );
    Ok(())
}

pub fn check_catalog_id(catalog_id: u8) -> Result<()> {
    require!(catalog_id < NUM_CATALOGS, TicketFarmError::InvalidCatalog);
    Ok(())
}

/// Claims mint `amount` base units, so a prize mint must not be divisible.
pub fn check_prize_mint_decimals(decimals: u8) -> Result<()> {
    require!(decimals == PRIZE_DECIMALS, TicketFarmError::InvalidPrizeMint);
    Ok(())
}

// -------------------------
// Randomness
// -------------------------

/// Newest hash in the SlotHashes sysvar.
/// Layout: u64 entry count, then (u64 slot, [u8; 32] hash) entries,
/// newest first.
pub fn most_recent_slothash(data: &[u8]) -> Result<[u8; 32]> {
    require!(data.len() >= 48, TicketFarmError::SlotHashesUnavailable);

    let mut count = [0u8; 8];
    count.copy_from_slice(&data[..8]);
    require!(u64::from_le_bytes(count) > 0, TicketFarmError::SlotHashesUnavailable);

    let mut hash = [0u8; 32];
    hash.copy_from_slice(&data[16..48]);
    Ok(hash)
}

/// Seed for one draw. The slot hash is known to the current leader, so
/// the outcome can be biased by whoever orders transactions.
pub fn draw_seed(recent_slothash: &[u8; 32], user: &Pubkey, draws: u64, slot: u64) -> u64 {
    let h = hashv(&[
        b"draw".as_ref(),
        recent_slothash.as_ref(),
        user.as_ref(),
        draws.to_le_bytes().as_ref(),
        slot.to_le_bytes().as_ref(),
    ])
    .to_bytes();

    let mut head = [0u8; 8];
    head.copy_from_slice(&h[..8]);
    u64::from_le_bytes(head)
}

/// Weighted choice over entries with `remaining > 0`, weight = remaining.
/// Builds the cumulative weights of live entries only and lower-bounds
/// `seed % total` in it. `None` when nothing is left.
pub fn weighted_pick(prizes: &[PrizeEntry], seed: u64) -> Option<usize> {
    let mut live = Vec::with_capacity(prizes.len());
    let mut cumulative = Vec::with_capacity(prizes.len());
    let mut total: u64 = 0;

    for (i, p) in prizes.iter().enumerate() {
        if p.remaining == 0 {
            continue;
        }
        total = total.checked_add(p.remaining)?;
        live.push(i);
        cumulative.push(total);
    }

    if total == 0 {
        return None;
    }

    let target = seed % total;
    let slot = cumulative.partition_point(|&c| c <= target);
    live.get(slot).copied()
}

// -------------------------
// Remaining-account plumbing
// -------------------------

pub fn load_program_account<T: AccountDeserialize>(
    ai: &AccountInfo,
    program_id: &Pubkey,
) -> Result<T> {
    require_keys_eq!(*ai.owner, *program_id, TicketFarmError::AccountNotOwnedByProgram);

    let data = ai
        .try_borrow_data()
        .map_err(|_| error!(TicketFarmError::AccountBorrowFailed))?;
    let mut slice: &[u8] = &data;
    T::try_deserialize(&mut slice)
}

pub fn store_program_account<T: AccountSerialize>(ai: &AccountInfo, value: &T) -> Result<()> {
    let mut data = ai
        .try_borrow_mut_data()
        .map_err(|_| error!(TicketFarmError::AccountBorrowFailed))?;
    let mut w = std::io::Cursor::new(&mut data[..]);
    value.try_serialize(&mut w)
}

/// Settles every pool in `pool_infos`, which must list pools `0..pool_count`
/// in id order, minus `skip` when given (that pool is settled by the caller).
pub fn settle_pools(
    program_id: &Pubkey,
    pool_infos: &[AccountInfo],
    emission: &Emission,
    pool_count: u64,
    skip: Option<u64>,
    now: u64,
) -> Result<()> {
    let expected = match skip {
        Some(_) => pool_count.saturating_sub(1),
        None => pool_count,
    };
    require!(pool_infos.len() <= MAX_POOLS, TicketFarmError::TooManyPools);
    require!(
        pool_infos.len() as u64 == expected,
        TicketFarmError::PoolListMismatch
    );

    let ids = (0..pool_count).filter(|id| Some(*id) != skip);
    for (ai, pool_id) in pool_infos.iter().zip(ids) {
        let mut pool: Pool = load_program_account(ai, program_id)?;
        require!(pool.pool_id == pool_id, TicketFarmError::PoolListMismatch);

        let expected_pda = Pubkey::create_program_address(
            &[POOL_SEED, pool_id.to_le_bytes().as_ref(), &[pool.bump]],
            program_id,
        )
        .map_err(|_| error!(TicketFarmError::PoolPdaMismatch))?;
        require_keys_eq!(expected_pda, ai.key(), TicketFarmError::PoolPdaMismatch);

        pool.settle(emission, now)?;
        store_program_account(ai, &pool)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(remaining: &[u64]) -> Vec<PrizeEntry> {
        remaining
            .iter()
            .enumerate()
            .map(|(i, r)| PrizeEntry {
                prize_id: i as u64 + 1,
                max_supply: *r,
                remaining: *r,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn weighted_pick_maps_seed_onto_cumulative_weights() {
        let prizes = entries(&[3, 1, 5]);
        let picks: Vec<usize> = (0..9u64)
            .map(|s| weighted_pick(&prizes, s).unwrap())
            .collect();
        assert_eq!(picks, vec![0, 0, 0, 1, 2, 2, 2, 2, 2]);
        // wraps modulo the live total
        assert_eq!(weighted_pick(&prizes, 9 + 3), Some(1));
    }

    #[test]
    fn weighted_pick_skips_exhausted_entries() {
        let prizes = entries(&[0, 2, 0, 1]);
        let picks: Vec<usize> = (0..3u64)
            .map(|s| weighted_pick(&prizes, s).unwrap())
            .collect();
        assert_eq!(picks, vec![1, 1, 3]);
    }

    #[test]
    fn weighted_pick_empty_catalog() {
        assert_eq!(weighted_pick(&entries(&[0, 0]), 7), None);
        assert_eq!(weighted_pick(&[], 7), None);
    }

    #[test]
    fn draw_seed_depends_on_every_input() {
        let hash = [7u8; 32];
        let user = Pubkey::new_unique();
        let base = draw_seed(&hash, &user, 0, 100);

        assert_eq!(base, draw_seed(&hash, &user, 0, 100));
        assert_ne!(base, draw_seed(&hash, &user, 1, 100));
        assert_ne!(base, draw_seed(&hash, &user, 0, 101));
        assert_ne!(base, draw_seed(&[8u8; 32], &user, 0, 100));
        assert_ne!(base, draw_seed(&hash, &Pubkey::new_unique(), 0, 100));
    }

    #[test]
    fn slothash_parsing() {
        let mut data = vec![0u8; 8 + 40 * 2];
        data[..8].copy_from_slice(&2u64.to_le_bytes());
        data[8..16].copy_from_slice(&99u64.to_le_bytes());
        data[16..48].copy_from_slice(&[5u8; 32]);
        data[56..88].copy_from_slice(&[6u8; 32]);

        assert_eq!(most_recent_slothash(&data).unwrap(), [5u8; 32]);
        assert!(most_recent_slothash(&data[..40]).is_err());

        let empty = vec![0u8; 48];
        assert!(most_recent_slothash(&empty).is_err());
    }

    struct Gate {
        config: Config,
        signer: Pubkey,
    }

    impl AdminGated for Gate {
        fn config(&self) -> &Config {
            &self.config
        }
        fn admin(&self) -> Pubkey {
            self.signer
        }
    }

    #[test]
    fn only_admin_compares_signer_with_config() {
        let admin = Pubkey::new_unique();
        let config = Config {
            admin,
            bump: 0,
            ticket_per_slot: 0,
            start_slot: 0,
            total_alloc_point: 0,
            pool_count: 0,
            treasury_sol: Pubkey::default(),
            treasury_sol_bump: 0,
            paused: false,
            version: 1,
        };

        let ok = Gate { config: config.clone(), signer: admin };
        assert!(only_admin(&ok).is_ok());

        let other = Gate { config, signer: Pubkey::new_unique() };
        assert_eq!(only_admin(&other).err(), Some(TicketFarmError::Unauthorized.into()));
    }

    #[test]
    fn prize_mints_must_be_indivisible() {
        assert!(check_prize_mint_decimals(0).is_ok());
        for decimals in [1u8, 6, 9] {
            assert_eq!(
                check_prize_mint_decimals(decimals).err(),
                Some(TicketFarmError::InvalidPrizeMint.into())
            );
        }
    }

    #[test]
    fn catalog_ids_are_bounded() {
        assert!(check_catalog_id(0).is_ok());
        assert!(check_catalog_id(NUM_CATALOGS - 1).is_ok());
        assert!(check_catalog_id(NUM_CATALOGS).is_err());
    }
}
