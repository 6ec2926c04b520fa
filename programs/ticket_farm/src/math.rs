use anchor_lang::prelude::*;

use crate::constants::{ACC_TICKET_PRECISION, BPS_DENOMINATOR, CLAIM_FEE_BPS};
use crate::errors::TicketFarmError;

/// Emission parameters shared by every pool. Copied out of `Config` so the
/// accounting below stays independent of account types.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Emission {
    pub ticket_per_slot: u64,
    pub start_slot: u64,
    pub total_alloc_point: u64,
}

/// -------------------------------------------------------------------
/// 1. EMISSION
/// -------------------------------------------------------------------

/// Slots in `(from, to]` that earn rewards. Nothing is earned before
/// `start_slot`.
pub fn reward_slots(from: u64, to: u64, start_slot: u64) -> u64 {
    to.saturating_sub(from.max(start_slot))
}

/// Tickets emitted to one pool over `(from, to]`, by weight.
pub fn pool_emission(emission: &Emission, alloc_point: u64, from: u64, to: u64) -> Result<u128> {
    if emission.total_alloc_point == 0 || alloc_point == 0 {
        return Ok(0);
    }

    let slots = reward_slots(from, to, emission.start_slot) as u128;

    let reward = slots
        .checked_mul(emission.ticket_per_slot as u128)
        .ok_or(TicketFarmError::MathOverflow)?
        .checked_mul(alloc_point as u128)
        .ok_or(TicketFarmError::MathOverflow)?
        .checked_div(emission.total_alloc_point as u128)
        .ok_or(TicketFarmError::MathOverflow)?;

    Ok(reward)
}

/// -------------------------------------------------------------------
/// 2. REWARD-PER-SHARE ACCUMULATOR
/// -------------------------------------------------------------------

/// Folds `reward` into the scaled accumulator. Flooring here only ever
/// withholds dust from stakers; it never mints more than was emitted.
pub fn accumulate(acc: u128, reward: u128, total_staked: u64) -> Result<u128> {
    if total_staked == 0 || reward == 0 {
        return Ok(acc);
    }

    let increment = reward
        .checked_mul(ACC_TICKET_PRECISION)
        .ok_or(TicketFarmError::MathOverflow)?
        .checked_div(total_staked as u128)
        .ok_or(TicketFarmError::MathOverflow)?;

    Ok(acc.checked_add(increment).ok_or(TicketFarmError::MathOverflow)?)
}

/// `amount * acc / PRECISION`, the position's lifetime entitlement at `acc`.
pub fn accrued(amount: u64, acc: u128) -> Result<u128> {
    Ok((amount as u128)
        .checked_mul(acc)
        .ok_or(TicketFarmError::MathOverflow)?
        .checked_div(ACC_TICKET_PRECISION)
        .ok_or(TicketFarmError::MathOverflow)?)
}

/// Unharvested tickets of a position. `reward_debt` was `accrued` at the
/// last settlement and `acc` never decreases, so this cannot go negative.
pub fn pending(amount: u64, acc: u128, reward_debt: u128) -> Result<u64> {
    let owed = accrued(amount, acc)?
        .checked_sub(reward_debt)
        .ok_or(TicketFarmError::MathOverflow)?;

    u64::try_from(owed).map_err(|_| error!(TicketFarmError::MathOverflow))
}

/// -------------------------------------------------------------------
/// 3. CLAIM FEE
/// -------------------------------------------------------------------

/// Lamports due to redeem `amount` units of a prize priced at `fee_price`.
/// The per-unit fee is floored once and then scaled, so the fee for `n`
/// units is always `n` times the fee for one.
pub fn claim_fee(fee_price: u64, amount: u64) -> Result<u64> {
    let unit_fee = (fee_price as u128)
        .checked_mul(CLAIM_FEE_BPS as u128)
        .ok_or(TicketFarmError::MathOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(TicketFarmError::MathOverflow)?;

    let fee = unit_fee
        .checked_mul(amount as u128)
        .ok_or(TicketFarmError::MathOverflow)?;

    u64::try_from(fee).map_err(|_| error!(TicketFarmError::MathOverflow))
}

/// `payment` is the most the caller accepts to pay; it must cover `fee`.
pub fn check_payment(fee: u64, payment: u64) -> Result<()> {
    require!(payment >= fee, TicketFarmError::InsufficientPayment);
    Ok(())
}
