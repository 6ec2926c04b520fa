use anchor_lang::prelude::*;

use crate::errors::TicketFarmError;
use crate::math::{self, Emission};
use crate::state::UserStake;

/// One weighted staking market.
#[account]
#[derive(InitSpace, Default)]
pub struct Pool {
    /// Sequential handle, also part of the PDA seeds.
    pub pool_id: u64,
    pub bump: u8,

    pub staking_mint: Pubkey,

    // SPL token vault holding staked principal (authority = this pool)
    pub vault: Pubkey,
    pub vault_bump: u8,

    /// Relative share of `Config::ticket_per_slot`. Zero halts emission.
    pub alloc_point: u64,
    pub total_staked: u64,

    /// Tickets per staked unit, scaled by `ACC_TICKET_PRECISION`.
    /// Non-decreasing.
    pub acc_ticket_per_share: u128,
    pub last_reward_slot: u64,

    pub created_slot: u64,
}

impl Pool {
    /// The accumulator as it would be after settling at `now`, without
    /// touching state. Used by queries.
    pub fn acc_ticket_per_share_at(&self, emission: &Emission, now: u64) -> Result<u128> {
        if now <= self.last_reward_slot || self.total_staked == 0 {
            return Ok(self.acc_ticket_per_share);
        }

        let reward = math::pool_emission(emission, self.alloc_point, self.last_reward_slot, now)?;
        math::accumulate(self.acc_ticket_per_share, reward, self.total_staked)
    }

    /// Brings the accumulator up to `now`. Empty pools only advance the
    /// clock: the emission for that span is neither stored nor reassigned.
    pub fn settle(&mut self, emission: &Emission, now: u64) -> Result<()> {
        if now <= self.last_reward_slot {
            return Ok(());
        }

        self.acc_ticket_per_share = self.acc_ticket_per_share_at(emission, now)?;
        self.last_reward_slot = now;

        Ok(())
    }

    /// Unsettled tickets owed to `stake` at `now` (read-only).
    pub fn pending_at(&self, stake: &UserStake, emission: &Emission, now: u64) -> Result<u64> {
        let acc = self.acc_ticket_per_share_at(emission, now)?;
        stake.pending(acc)
    }

    /// Settle, harvest, then add `amount` to the position.
    /// Returns the harvested tickets; the caller credits them.
    pub fn deposit(
        &mut self,
        stake: &mut UserStake,
        emission: &Emission,
        now: u64,
        amount: u64,
    ) -> Result<u64> {
        self.settle(emission, now)?;
        let harvested = stake.pending(self.acc_ticket_per_share)?;

        stake.amount = stake
            .amount
            .checked_add(amount)
            .ok_or(TicketFarmError::MathOverflow)?;
        self.total_staked = self
            .total_staked
            .checked_add(amount)
            .ok_or(TicketFarmError::MathOverflow)?;

        stake.rebase(self.acc_ticket_per_share)?;

        Ok(harvested)
    }

    /// Settle, harvest, then remove `amount` from the position.
    pub fn withdraw(
        &mut self,
        stake: &mut UserStake,
        emission: &Emission,
        now: u64,
        amount: u64,
    ) -> Result<u64> {
        require!(amount <= stake.amount, TicketFarmError::InsufficientBalance);

        self.settle(emission, now)?;
        let harvested = stake.pending(self.acc_ticket_per_share)?;

        stake.amount -= amount;
        self.total_staked = self
            .total_staked
            .checked_sub(amount)
            .ok_or(TicketFarmError::MathOverflow)?;

        stake.rebase(self.acc_ticket_per_share)?;

        Ok(harvested)
    }

    /// Zeroes the position without settling. Pending tickets are forfeited.
    /// Returns the principal to send back.
    pub fn emergency_withdraw(&mut self, stake: &mut UserStake) -> u64 {
        let amount = stake.amount;

        // total_staked always covers every position; saturate so this path
        // can never fail on accounting.
        self.total_staked = self.total_staked.saturating_sub(amount);
        stake.amount = 0;
        stake.reward_debt = 0;

        amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TicketFarmError;
    use crate::state::UserTickets;

    struct Staker {
        stake: UserStake,
        tickets: UserTickets,
    }

    impl Staker {
        fn new() -> Self {
            Self {
                stake: UserStake::default(),
                tickets: UserTickets::default(),
            }
        }

        fn deposit(&mut self, pool: &mut Pool, e: &Emission, now: u64, amount: u64) {
            let harvested = pool.deposit(&mut self.stake, e, now, amount).unwrap();
            self.tickets.credit(harvested).unwrap();
        }

        fn withdraw(&mut self, pool: &mut Pool, e: &Emission, now: u64, amount: u64) {
            let harvested = pool.withdraw(&mut self.stake, e, now, amount).unwrap();
            self.tickets.credit(harvested).unwrap();
        }

        fn balance(&self) -> u64 {
            self.tickets.balance
        }
    }

    fn single_pool(ticket_per_slot: u64, start_slot: u64, created_slot: u64) -> (Pool, Emission) {
        let emission = Emission {
            ticket_per_slot,
            start_slot,
            total_alloc_point: 100,
        };
        let pool = Pool {
            alloc_point: 100,
            last_reward_slot: created_slot.max(start_slot),
            created_slot,
            ..Default::default()
        };
        (pool, emission)
    }

    #[test]
    fn distributes_tickets_per_staker() {
        let (mut pool, e) = single_pool(100, 300, 0);
        let mut alice = Staker::new();
        let mut bob = Staker::new();
        let mut carol = Staker::new();

        alice.deposit(&mut pool, &e, 310, 10);
        bob.deposit(&mut pool, &e, 314, 20);
        carol.deposit(&mut pool, &e, 354, 30);

        // 4*100 + 40*1/3*100 + 20*1/6*100
        alice.deposit(&mut pool, &e, 374, 10);
        assert_eq!(alice.balance(), 2066);
        assert_eq!(bob.balance(), 0);
        assert_eq!(carol.balance(), 0);

        // 40*2/3*100 + 20*2/6*100 + 10*2/7*100
        bob.withdraw(&mut pool, &e, 384, 5);
        assert_eq!(alice.balance(), 2066);
        assert_eq!(bob.balance(), 3619);
        assert_eq!(carol.balance(), 0);

        alice.withdraw(&mut pool, &e, 410, 20);
        bob.withdraw(&mut pool, &e, 414, 15);
        carol.withdraw(&mut pool, &e, 454, 30);

        assert_eq!(alice.balance(), 3152);
        assert_eq!(bob.balance(), 4352);
        assert_eq!(carol.balance(), 6896);

        assert_eq!(pool.total_staked, 0);
        assert_eq!(alice.stake.amount + bob.stake.amount + carol.stake.amount, 0);

        // Rewards flow only while stake was present: 310..454.
        let emitted = 100 * (454 - 310);
        let harvested = alice.balance() + bob.balance() + carol.balance();
        assert!(harvested <= emitted);
        assert!(emitted - harvested < 3);
    }

    #[test]
    fn tickets_only_after_start_slot() {
        let (mut pool, e) = single_pool(100, 100, 1);
        let mut bob = Staker::new();

        bob.deposit(&mut pool, &e, 2, 100);
        for slot in [90, 95, 100] {
            bob.deposit(&mut pool, &e, slot, 0);
            assert_eq!(bob.balance(), 0);
        }
        bob.deposit(&mut pool, &e, 101, 0);
        assert_eq!(bob.balance(), 100);
        bob.deposit(&mut pool, &e, 105, 0);
        assert_eq!(bob.balance(), 500);
    }

    #[test]
    fn empty_pool_accrues_nothing() {
        let (mut pool, e) = single_pool(100, 200, 1);
        let mut bob = Staker::new();

        pool.settle(&e, 205).unwrap();
        assert_eq!(pool.acc_ticket_per_share, 0);
        assert_eq!(pool.last_reward_slot, 205);

        bob.deposit(&mut pool, &e, 210, 10);
        assert_eq!(bob.balance(), 0);
        bob.withdraw(&mut pool, &e, 220, 10);
        assert_eq!(bob.balance(), 1000);
        assert_eq!(bob.stake.amount, 0);
    }

    #[test]
    fn second_harvest_in_same_slot_yields_nothing() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut bob = Staker::new();

        bob.deposit(&mut pool, &e, 10, 50);
        bob.deposit(&mut pool, &e, 20, 0);
        assert_eq!(bob.balance(), 1000);

        bob.deposit(&mut pool, &e, 20, 0);
        bob.withdraw(&mut pool, &e, 20, 0);
        assert_eq!(bob.balance(), 1000);
    }

    #[test]
    fn equal_stakes_earn_equally_in_any_order() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut a = Staker::new();
        let mut b = Staker::new();

        a.deposit(&mut pool, &e, 10, 40);
        b.deposit(&mut pool, &e, 10, 40);

        b.withdraw(&mut pool, &e, 50, 40);
        a.withdraw(&mut pool, &e, 50, 40);

        assert_eq!(a.balance(), 2000);
        assert_eq!(a.balance(), b.balance());
    }

    #[test]
    fn pending_query_matches_harvest() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut a = Staker::new();
        let mut b = Staker::new();

        a.deposit(&mut pool, &e, 5, 30);
        b.deposit(&mut pool, &e, 9, 70);

        let before = pool.clone();
        let quoted = pool.pending_at(&a.stake, &e, 33).unwrap();
        assert_eq!(pool.acc_ticket_per_share, before.acc_ticket_per_share);
        assert_eq!(pool.last_reward_slot, before.last_reward_slot);

        a.deposit(&mut pool, &e, 33, 0);
        assert_eq!(a.balance(), quoted);
    }

    #[test]
    fn withdraw_more_than_staked_fails() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut bob = Staker::new();
        bob.deposit(&mut pool, &e, 1, 10);

        let res = pool.withdraw(&mut bob.stake, &e, 5, 11);
        assert_eq!(res.err(), Some(TicketFarmError::InsufficientBalance.into()));
        assert_eq!(bob.stake.amount, 10);
        assert_eq!(pool.total_staked, 10);
        assert_eq!(pool.last_reward_slot, 1);
    }

    #[test]
    fn emergency_withdraw_forfeits_pending() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut bob = Staker::new();
        let mut carol = Staker::new();
        bob.deposit(&mut pool, &e, 1, 25);
        carol.deposit(&mut pool, &e, 1, 75);

        let returned = pool.emergency_withdraw(&mut bob.stake);
        assert_eq!(returned, 25);
        assert_eq!(bob.stake.amount, 0);
        assert_eq!(bob.stake.reward_debt, 0);
        assert_eq!(bob.balance(), 0);
        assert_eq!(pool.total_staked, 75);

        // Nothing left behind for the emptied position.
        assert_eq!(pool.pending_at(&bob.stake, &e, 500).unwrap(), 0);
        assert_eq!(pool.emergency_withdraw(&mut bob.stake), 0);
    }

    #[test]
    fn zero_weight_halts_emission() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut bob = Staker::new();
        bob.deposit(&mut pool, &e, 1, 10);

        pool.settle(&e, 11).unwrap();
        pool.alloc_point = 0;
        let halted = Emission {
            total_alloc_point: 0,
            ..e
        };

        bob.deposit(&mut pool, &halted, 50, 0);
        assert_eq!(bob.balance(), 1000);
    }

    #[test]
    fn settle_is_idempotent_within_a_slot() {
        let (mut pool, e) = single_pool(100, 0, 0);
        let mut bob = Staker::new();
        bob.deposit(&mut pool, &e, 1, 3);

        pool.settle(&e, 10).unwrap();
        let acc = pool.acc_ticket_per_share;
        pool.settle(&e, 10).unwrap();
        pool.settle(&e, 9).unwrap();
        assert_eq!(pool.acc_ticket_per_share, acc);
        assert_eq!(pool.last_reward_slot, 10);
    }
}
