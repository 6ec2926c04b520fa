// programs/ticket_farm/src/contexts.rs

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::errors::TicketFarmError;
use crate::state::{Catalog, Config, Pool, UserPrizes, UserStake, UserTickets};
use crate::utils::AdminGated;

// ----------------------------
// Admin
// ----------------------------

#[derive(Accounts)]
pub struct InitializeConfig<'info> {
    #[account(
        init,
        payer = admin,
        space = 8 + Config::INIT_SPACE,
        seeds = [crate::CONFIG_SEED],
        bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: system-owned PDA (owner = system program) collecting claim fees.
    /// Address enforced by seeds/bump.
    #[account(
        init,
        payer = admin,
        space = 0,
        owner = anchor_lang::solana_program::system_program::ID,
        seeds = [crate::TREASURY_SOL_SEED],
        bump
    )]
    pub treasury_sol: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
pub struct SetPause<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct TransferAdmin<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    pub admin: Signer<'info>,
}

#[derive(Accounts)]
pub struct AddPool<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    pub staking_mint: Account<'info, Mint>,

    #[account(
        init,
        payer = admin,
        space = 8 + Pool::INIT_SPACE,
        seeds = [crate::POOL_SEED, config.pool_count.to_le_bytes().as_ref()],
        bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        init,
        payer = admin,
        seeds = [crate::POOL_VAULT_SEED, config.pool_count.to_le_bytes().as_ref()],
        bump,
        token::mint = staking_mint,
        token::authority = pool
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
    pub rent: Sysvar<'info, Rent>,
    // existing pools via remaining_accounts when with_update
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct SetPool<'info> {
    #[account(
        mut,
        seeds = [crate::CONFIG_SEED],
        bump = config.bump,
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump,
    )]
    pub pool: Account<'info, Pool>,

    pub admin: Signer<'info>,
    // other pools via remaining_accounts when with_update
}

#[derive(Accounts)]
#[instruction(catalog_id: u8)]
pub struct InitializeCatalog<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        init,
        payer = admin,
        space = 8 + Catalog::INIT_SPACE,
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump
    )]
    pub catalog: Account<'info, Catalog>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(catalog_id: u8)]
pub struct AddPrize<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump = catalog.bump
    )]
    pub catalog: Account<'info, Catalog>,

    /// Prize SPL mint, decimals 0, not used by another prize.
    /// Mint authority moves to the config PDA.
    #[account(mut)]
    pub prize_mint: Account<'info, Mint>,

    pub admin: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(catalog_id: u8)]
pub struct Airdrop<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump = catalog.bump
    )]
    pub catalog: Account<'info, Catalog>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
    // (user_stake, user_prizes) pairs via remaining_accounts (writable)
}

#[derive(Accounts)]
pub struct WithdrawTreasury<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    /// CHECK: system-owned PDA holding claim fees. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::TREASURY_SOL_SEED],
        bump = config.treasury_sol_bump
    )]
    pub treasury_sol: UncheckedAccount<'info>,

    #[account(mut)]
    pub admin: Signer<'info>,

    pub system_program: Program<'info, System>,
}

macro_rules! admin_gated {
    ($($accounts:ident),* $(,)?) => {
        $(
            impl<'info> AdminGated for $accounts<'info> {
                fn config(&self) -> &Config {
                    &self.config
                }
                fn admin(&self) -> Pubkey {
                    self.admin.key()
                }
            }
        )*
    };
}

admin_gated!(
    SetPause,
    TransferAdmin,
    AddPool,
    SetPool,
    InitializeCatalog,
    AddPrize,
    Airdrop,
    WithdrawTreasury,
);

// ----------------------------
// Staking
// ----------------------------

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Deposit<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        address = pool.vault
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserStake::INIT_SPACE,
        seeds = [crate::USER_STAKE_SEED, pool_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserTickets::INIT_SPACE,
        seeds = [crate::USER_TICKETS_SEED, user.key().as_ref()],
        bump
    )]
    pub user_tickets: Account<'info, UserTickets>,

    #[account(
        mut,
        constraint = user_token_account.mint == pool.staking_mint @ TicketFarmError::StakingMintMismatch,
        constraint = user_token_account.owner == user.key() @ TicketFarmError::InvalidUserTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct Withdraw<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        address = pool.vault
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [crate::USER_STAKE_SEED, pool_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump = user_stake.bump
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        mut,
        seeds = [crate::USER_TICKETS_SEED, user.key().as_ref()],
        bump = user_tickets.bump
    )]
    pub user_tickets: Account<'info, UserTickets>,

    #[account(
        mut,
        constraint = user_token_account.mint == pool.staking_mint @ TicketFarmError::StakingMintMismatch,
        constraint = user_token_account.owner == user.key() @ TicketFarmError::InvalidUserTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct EmergencyWithdraw<'info> {
    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        mut,
        address = pool.vault
    )]
    pub pool_vault: Account<'info, TokenAccount>,

    #[account(
        mut,
        seeds = [crate::USER_STAKE_SEED, pool_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump = user_stake.bump
    )]
    pub user_stake: Account<'info, UserStake>,

    #[account(
        mut,
        constraint = user_token_account.mint == pool.staking_mint @ TicketFarmError::StakingMintMismatch,
        constraint = user_token_account.owner == user.key() @ TicketFarmError::InvalidUserTokenAccount
    )]
    pub user_token_account: Account<'info, TokenAccount>,

    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
}

#[derive(Accounts)]
#[instruction(pool_id: u64)]
pub struct UpdatePool<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,
}

#[derive(Accounts)]
pub struct MassUpdatePools<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,
    // every pool via remaining_accounts (writable)
}

// ----------------------------
// Draw / claim
// ----------------------------

#[derive(Accounts)]
#[instruction(catalog_id: u8)]
pub struct Draw<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        mut,
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump = catalog.bump
    )]
    pub catalog: Account<'info, Catalog>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserTickets::INIT_SPACE,
        seeds = [crate::USER_TICKETS_SEED, user.key().as_ref()],
        bump
    )]
    pub user_tickets: Account<'info, UserTickets>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserPrizes::INIT_SPACE,
        seeds = [crate::USER_PRIZES_SEED, catalog_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_prizes: Account<'info, UserPrizes>,

    /// CHECK: address pinned to the SlotHashes sysvar; raw bytes parsed in handler
    #[account(address = anchor_lang::solana_program::sysvar::slot_hashes::ID)]
    pub recent_slothashes: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub system_program: Program<'info, System>,
}

#[derive(Accounts)]
#[instruction(catalog_id: u8)]
pub struct Claim<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump = catalog.bump
    )]
    pub catalog: Account<'info, Catalog>,

    #[account(
        init_if_needed,
        payer = user,
        space = 8 + UserPrizes::INIT_SPACE,
        seeds = [crate::USER_PRIZES_SEED, catalog_id.to_le_bytes().as_ref(), user.key().as_ref()],
        bump
    )]
    pub user_prizes: Account<'info, UserPrizes>,

    #[account(mut)]
    pub prize_mint: Account<'info, Mint>,

    #[account(
        mut,
        constraint = user_prize_account.mint == prize_mint.key() @ TicketFarmError::PrizeMintMismatch,
        constraint = user_prize_account.owner == user.key() @ TicketFarmError::InvalidUserTokenAccount
    )]
    pub user_prize_account: Account<'info, TokenAccount>,

    /// CHECK: system-owned PDA receiving claim fees. Address enforced by seeds/bump.
    #[account(
        mut,
        seeds = [crate::TREASURY_SOL_SEED],
        bump = config.treasury_sol_bump
    )]
    pub treasury_sol: UncheckedAccount<'info>,

    #[account(mut)]
    pub user: Signer<'info>,

    pub token_program: Program<'info, Token>,
    pub system_program: Program<'info, System>,
}

// ----------------------------
// Views (return data only)
// ----------------------------

#[derive(Accounts)]
#[instruction(pool_id: u64, user: Pubkey)]
pub struct PendingTickets<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::POOL_SEED, pool_id.to_le_bytes().as_ref()],
        bump = pool.bump
    )]
    pub pool: Account<'info, Pool>,

    #[account(
        seeds = [crate::USER_STAKE_SEED, pool_id.to_le_bytes().as_ref(), user.as_ref()],
        bump = user_stake.bump
    )]
    pub user_stake: Account<'info, UserStake>,
}

#[derive(Accounts)]
#[instruction(user: Pubkey)]
pub struct TicketBalance<'info> {
    #[account(
        seeds = [crate::CONFIG_SEED],
        bump = config.bump
    )]
    pub config: Account<'info, Config>,

    #[account(
        seeds = [crate::USER_TICKETS_SEED, user.as_ref()],
        bump = user_tickets.bump
    )]
    pub user_tickets: Account<'info, UserTickets>,
    // (pool, user_stake) pairs via remaining_accounts
}

#[derive(Accounts)]
#[instruction(catalog_id: u8)]
pub struct CatalogView<'info> {
    #[account(
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump = catalog.bump
    )]
    pub catalog: Account<'info, Catalog>,
}

#[derive(Accounts)]
#[instruction(catalog_id: u8, user: Pubkey)]
pub struct UnclaimedBalance<'info> {
    #[account(
        seeds = [crate::CATALOG_SEED, catalog_id.to_le_bytes().as_ref()],
        bump = catalog.bump
    )]
    pub catalog: Account<'info, Catalog>,

    #[account(
        seeds = [crate::USER_PRIZES_SEED, catalog_id.to_le_bytes().as_ref(), user.as_ref()],
        bump = user_prizes.bump
    )]
    pub user_prizes: Account<'info, UserPrizes>,
}
