use anchor_lang::prelude::*;

use crate::constants::MAX_PRIZES;
use crate::errors::TicketFarmError;
use crate::utils::weighted_pick;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq, InitSpace)]
pub struct PrizeEntry {
    pub prize_id: u64,
    /// SPL mint redeemed units are minted from (authority = config PDA).
    pub mint: Pubkey,
    pub max_supply: u64,
    pub remaining: u64,
    /// Lamport price the claim fee is computed from.
    pub fee_price: u64,
}

/// Append-only arena of prize entries. An entry's position is its stable
/// handle and indexes `UserPrizes::unclaimed`.
#[account]
#[derive(InitSpace, Default)]
pub struct Catalog {
    pub catalog_id: u8,
    pub bump: u8,

    pub total_max_supply: u64,
    pub total_remaining: u64,

    /// NOTE: max_len must match MAX_PRIZES.
    #[max_len(64)]
    pub prizes: Vec<PrizeEntry>,

    pub version: u16,
}

impl Catalog {
    pub fn index_of(&self, prize_id: u64) -> Option<usize> {
        self.prizes.iter().position(|p| p.prize_id == prize_id)
    }

    pub fn prize(&self, prize_id: u64) -> Result<(usize, &PrizeEntry)> {
        let index = self.index_of(prize_id).ok_or(TicketFarmError::PrizeNotFound)?;
        Ok((index, &self.prizes[index]))
    }

    pub fn add_prize(
        &mut self,
        prize_id: u64,
        mint: Pubkey,
        max_supply: u64,
        fee_price: u64,
    ) -> Result<usize> {
        require!(self.index_of(prize_id).is_none(), TicketFarmError::PrizeAlreadyExists);
        require!(self.prizes.len() < MAX_PRIZES, TicketFarmError::CatalogFull);
        require!(max_supply > 0, TicketFarmError::InvalidSupply);
        require!(
            !self.prizes.iter().any(|p| p.mint == mint),
            TicketFarmError::InvalidPrizeMint
        );

        let total_max_supply = self
            .total_max_supply
            .checked_add(max_supply)
            .ok_or(TicketFarmError::MathOverflow)?;
        let total_remaining = self
            .total_remaining
            .checked_add(max_supply)
            .ok_or(TicketFarmError::MathOverflow)?;

        self.prizes.push(PrizeEntry {
            prize_id,
            mint,
            max_supply,
            remaining: max_supply,
            fee_price,
        });
        self.total_max_supply = total_max_supply;
        self.total_remaining = total_remaining;

        Ok(self.prizes.len() - 1)
    }

    /// Picks one live entry weighted by remaining supply and takes a unit
    /// from it. Returns the entry index.
    pub fn draw(&mut self, seed: u64) -> Result<usize> {
        let index = weighted_pick(&self.prizes, seed).ok_or(TicketFarmError::OutOfStock)?;
        self.allocate(index, 1)?;
        Ok(index)
    }

    /// Takes `amount` units from the entry at `index`.
    pub fn allocate(&mut self, index: usize, amount: u64) -> Result<()> {
        let entry = self
            .prizes
            .get_mut(index)
            .ok_or(TicketFarmError::PrizeNotFound)?;
        require!(entry.remaining >= amount, TicketFarmError::OutOfStock);

        entry.remaining -= amount;
        self.total_remaining = self
            .total_remaining
            .checked_sub(amount)
            .ok_or(TicketFarmError::MathOverflow)?;
        Ok(())
    }

    pub fn total_allocated(&self) -> u64 {
        self.total_max_supply - self.total_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(supplies: &[u64]) -> Catalog {
        let mut c = Catalog::default();
        for (i, s) in supplies.iter().enumerate() {
            c.add_prize(i as u64 + 1, Pubkey::new_unique(), *s, 1_000).unwrap();
        }
        c
    }

    fn sum_remaining(c: &Catalog) -> u64 {
        c.prizes.iter().map(|p| p.remaining).sum()
    }

    #[test]
    fn add_prize_rejects_duplicates_and_empty_supply() {
        let mut c = catalog(&[12, 32]);
        assert_eq!(
            c.add_prize(2, Pubkey::new_unique(), 5, 0).err(),
            Some(TicketFarmError::PrizeAlreadyExists.into())
        );
        assert_eq!(
            c.add_prize(9, Pubkey::new_unique(), 0, 0).err(),
            Some(TicketFarmError::InvalidSupply.into())
        );
        assert_eq!(c.total_max_supply, 44);
        assert_eq!(c.total_remaining, 44);
        assert_eq!(c.index_of(2), Some(1));
    }

    #[test]
    fn a_mint_backs_a_single_prize() {
        let mut c = catalog(&[3]);
        let taken = c.prizes[0].mint;
        assert_eq!(
            c.add_prize(2, taken, 5, 0).err(),
            Some(TicketFarmError::InvalidPrizeMint.into())
        );
        assert_eq!(c.prizes.len(), 1);
        assert_eq!(c.total_max_supply, 3);

        c.add_prize(2, Pubkey::new_unique(), 5, 0).unwrap();
        assert_eq!(c.prizes.len(), 2);
    }

    #[test]
    fn catalog_is_bounded() {
        let mut c = catalog(&[1; MAX_PRIZES]);
        assert_eq!(
            c.add_prize(1_000, Pubkey::new_unique(), 1, 0).err(),
            Some(TicketFarmError::CatalogFull.into())
        );
    }

    #[test]
    fn draws_conserve_supply_until_out_of_stock() {
        let supplies = [3u64, 1, 5, 2];
        let mut c = catalog(&supplies);
        let total: u64 = supplies.iter().sum();

        let mut won = [0u64; 4];
        for n in 0..total {
            let seed = n.wrapping_mul(0x9E37_79B9_7F4A_7C15);
            let index = c.draw(seed).unwrap();
            won[index] += 1;
            assert_eq!(sum_remaining(&c) + n + 1, total);
            assert_eq!(c.total_remaining, sum_remaining(&c));
        }

        for (i, s) in supplies.iter().enumerate() {
            assert_eq!(won[i], *s);
            assert_eq!(c.prizes[i].remaining, 0);
        }
        assert_eq!(c.total_allocated(), total);
        assert_eq!(c.draw(42).err(), Some(TicketFarmError::OutOfStock.into()));
    }

    #[test]
    fn exhausted_entries_are_never_drawn() {
        let mut c = catalog(&[1, 4]);
        c.allocate(0, 1).unwrap();

        for seed in 0..64u64 {
            let mut copy = c.clone();
            assert_eq!(copy.draw(seed).unwrap(), 1);
        }
    }

    #[test]
    fn allocate_cannot_oversell() {
        let mut c = catalog(&[2]);
        assert_eq!(c.allocate(0, 3).err(), Some(TicketFarmError::OutOfStock.into()));
        assert_eq!(c.allocate(1, 1).err(), Some(TicketFarmError::PrizeNotFound.into()));
        c.allocate(0, 2).unwrap();
        assert_eq!(c.prizes[0].remaining, 0);
        assert_eq!(c.total_remaining, 0);
    }
}
