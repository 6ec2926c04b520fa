use anchor_lang::prelude::*;

use crate::constants::MAX_PRIZES;
use crate::errors::TicketFarmError;
use crate::math;

/// One user's position in one pool.
#[account]
#[derive(InitSpace, Default)]
pub struct UserStake {
    pub user: Pubkey,
    pub pool_id: u64,
    pub bump: u8,

    pub amount: u64,
    /// `amount * acc / PRECISION` at the last settlement.
    pub reward_debt: u128,

    pub created_slot: u64,
    pub updated_slot: u64,
}

impl UserStake {
    pub fn is_initialized(&self) -> bool {
        self.user != Pubkey::default()
    }

    pub fn pending(&self, acc_ticket_per_share: u128) -> Result<u64> {
        math::pending(self.amount, acc_ticket_per_share, self.reward_debt)
    }

    /// Marks everything accrued up to `acc_ticket_per_share` as paid.
    pub fn rebase(&mut self, acc_ticket_per_share: u128) -> Result<()> {
        self.reward_debt = math::accrued(self.amount, acc_ticket_per_share)?;
        Ok(())
    }
}

/// Accrued, unspent tickets of one user, across every pool.
#[account]
#[derive(InitSpace, Default)]
pub struct UserTickets {
    pub user: Pubkey,
    pub bump: u8,

    pub balance: u64,
    /// Total tickets ever spent on draws. Monotonic.
    pub consumed: u64,
    /// Successful draws; also salts the draw seed.
    pub draws: u64,
}

impl UserTickets {
    pub fn is_initialized(&self) -> bool {
        self.user != Pubkey::default()
    }

    pub fn credit(&mut self, tickets: u64) -> Result<()> {
        self.balance = self
            .balance
            .checked_add(tickets)
            .ok_or(TicketFarmError::MathOverflow)?;
        Ok(())
    }

    /// Check-and-decrement used by draws. Leaves state untouched on failure.
    pub fn spend(&mut self, cost: u64) -> Result<()> {
        require!(self.balance >= cost, TicketFarmError::InsufficientTickets);

        let consumed = self
            .consumed
            .checked_add(cost)
            .ok_or(TicketFarmError::MathOverflow)?;
        let draws = self.draws.checked_add(1).ok_or(TicketFarmError::MathOverflow)?;

        self.balance -= cost;
        self.consumed = consumed;
        self.draws = draws;
        Ok(())
    }
}

/// Won but unredeemed prize units of one user in one catalog, indexed by
/// the catalog entry index.
#[account]
#[derive(InitSpace, Default)]
pub struct UserPrizes {
    pub user: Pubkey,
    pub catalog_id: u8,
    pub bump: u8,

    /// NOTE: max_len must match MAX_PRIZES.
    #[max_len(64)]
    pub unclaimed: Vec<u64>,
}

impl UserPrizes {
    pub fn is_initialized(&self) -> bool {
        self.user != Pubkey::default()
    }

    pub fn balance(&self, index: usize) -> u64 {
        self.unclaimed.get(index).copied().unwrap_or(0)
    }

    pub fn credit(&mut self, index: usize, amount: u64) -> Result<()> {
        require!(index < MAX_PRIZES, TicketFarmError::PrizeNotFound);

        if self.unclaimed.len() <= index {
            self.unclaimed.resize(index + 1, 0);
        }
        self.unclaimed[index] = self.unclaimed[index]
            .checked_add(amount)
            .ok_or(TicketFarmError::MathOverflow)?;
        Ok(())
    }

    pub fn debit(&mut self, index: usize, amount: u64) -> Result<()> {
        require!(amount > 0, TicketFarmError::ZeroAmount);
        require!(self.balance(index) >= amount, TicketFarmError::InvalidAmount);

        self.unclaimed[index] -= amount;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DRAW_COST;

    #[test]
    fn spend_requires_full_cost() {
        let mut t = UserTickets {
            balance: DRAW_COST / 5,
            ..Default::default()
        };
        assert_eq!(
            t.spend(DRAW_COST).err(),
            Some(TicketFarmError::InsufficientTickets.into())
        );
        assert_eq!(t.balance, DRAW_COST / 5);
        assert_eq!(t.consumed, 0);
        assert_eq!(t.draws, 0);

        t.credit(DRAW_COST - DRAW_COST / 5).unwrap();
        t.spend(DRAW_COST).unwrap();
        assert_eq!(t.balance, 0);
        assert_eq!(t.consumed, DRAW_COST);
        assert_eq!(t.draws, 1);

        assert!(t.spend(DRAW_COST).is_err());
    }

    #[test]
    fn credit_overflow_is_an_error() {
        let mut t = UserTickets {
            balance: u64::MAX,
            ..Default::default()
        };
        assert_eq!(t.credit(1).err(), Some(TicketFarmError::MathOverflow.into()));
    }

    #[test]
    fn unclaimed_grows_on_demand() {
        let mut p = UserPrizes::default();
        assert_eq!(p.balance(5), 0);

        p.credit(5, 2).unwrap();
        assert_eq!(p.unclaimed.len(), 6);
        assert_eq!(p.balance(5), 2);
        assert_eq!(p.balance(0), 0);

        assert!(p.credit(MAX_PRIZES, 1).is_err());
    }

    #[test]
    fn debit_checks_zero_and_balance() {
        let mut p = UserPrizes::default();
        p.credit(1, 1).unwrap();

        assert_eq!(p.debit(1, 0).err(), Some(TicketFarmError::ZeroAmount.into()));
        assert_eq!(p.debit(1, 2).err(), Some(TicketFarmError::InvalidAmount.into()));
        assert_eq!(p.debit(3, 1).err(), Some(TicketFarmError::InvalidAmount.into()));

        p.debit(1, 1).unwrap();
        assert_eq!(p.balance(1), 0);
        assert!(p.debit(1, 1).is_err());
    }

    #[test]
    fn rebase_clears_pending() {
        let mut s = UserStake {
            amount: 10,
            ..Default::default()
        };
        let acc = 5 * crate::constants::ACC_TICKET_PRECISION;
        assert_eq!(s.pending(acc).unwrap(), 50);
        s.rebase(acc).unwrap();
        assert_eq!(s.pending(acc).unwrap(), 0);
    }
}
