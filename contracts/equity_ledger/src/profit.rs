use crate::error::Error;
use crate::events::{PoolExhaustedEvent, ProfitClaimedEvent, ProfitDepositedEvent};
use crate::pricing::{calculate_entitlement, calculate_payout};
use crate::share_ledger::Shares;
use crate::storage::{PoolStatus, ProfitPool, ProfitSummary, Storage};
use soroban_sdk::{Address, Env, Symbol, Vec};

/// Deposit-and-claim profit epochs.
///
/// Entitlement per share is fixed at deposit time, but the number of shares
/// a claimant is paid for is their holding when they claim. Investors who buy
/// in after a deposit can therefore claim from it; the pool balance check
/// keeps total payouts within what was deposited.
pub struct ProfitEngine;

impl ProfitEngine {
    /// Open a new pool for `startup_id`
    ///
    /// # Errors
    /// - `ZeroAmount`: `amount == 0`
    /// - `UnknownStartup`: Startup doesn't exist
    /// - `NoSharesOutstanding`: Nothing has been sold yet
    /// - `EntitlementRoundsToZero`: `amount < total_sold`
    pub fn deposit_profit(env: &Env, startup_id: u64, amount: u128, at_time: u64) -> Result<u64, Error> {
        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let sold = Shares::total_sold(env, startup_id)?;
        if sold == 0 {
            return Err(Error::NoSharesOutstanding);
        }

        let per_share_entitlement =
            calculate_entitlement(amount, sold).ok_or(Error::NoSharesOutstanding)?;
        if per_share_entitlement == 0 {
            return Err(Error::EntitlementRoundsToZero);
        }

        let pool_id = Storage::allocate_pool_id(env)?;
        let pool = ProfitPool {
            id: pool_id,
            startup_id,
            total_deposited: amount,
            total_claimed: 0,
            per_share_entitlement,
            shares_sold_at_deposit: sold,
            deposited_at: at_time,
            status: PoolStatus::Open,
        };
        Storage::set_pool(env, &pool);

        let mut pools = Storage::get_startup_pools(env, startup_id);
        pools.push_back(pool_id);
        Storage::set_startup_pools(env, startup_id, &pools);

        let mut summary = Storage::get_profit_summary(env, startup_id);
        summary.total_deposited = summary
            .total_deposited
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        summary.pool_count = summary
            .pool_count
            .checked_add(1)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_profit_summary(env, startup_id, &summary);

        env.events().publish(
            (Symbol::new(env, "profit_deposited"), startup_id, pool_id),
            ProfitDepositedEvent {
                pool_id,
                startup_id,
                amount,
                per_share_entitlement,
                shares_sold: sold,
            },
        );

        Ok(pool_id)
    }

    /// Pay `investor` their share of `pool_id`, at most once.
    ///
    /// # Errors
    /// - `UnknownPool`: Pool doesn't exist
    /// - `AlreadyClaimed`: Investor already claimed from this pool
    /// - `NoHolding`: Investor holds no shares now
    /// - `PoolExhausted`: Pool is exhausted or cannot cover this payout
    pub fn claim(env: &Env, pool_id: u64, investor: &Address) -> Result<u128, Error> {
        let mut pool = Storage::get_pool(env, pool_id)?;

        if Storage::has_claimed(env, pool_id, investor) {
            return Err(Error::AlreadyClaimed);
        }

        let holding = Shares::get_holding(env, pool.startup_id, investor);
        if holding == 0 {
            return Err(Error::NoHolding);
        }

        if pool.status == PoolStatus::Exhausted {
            return Err(Error::PoolExhausted);
        }

        let payout = calculate_payout(pool.per_share_entitlement, holding)
            .ok_or(Error::ArithmeticOverflow)?;
        let claimed = pool
            .total_claimed
            .checked_add(payout)
            .ok_or(Error::ArithmeticOverflow)?;
        if claimed > pool.total_deposited {
            return Err(Error::PoolExhausted);
        }

        Storage::set_claimed(env, pool_id, investor);
        pool.total_claimed = claimed;

        let remaining = pool.total_deposited - pool.total_claimed;
        if remaining < pool.per_share_entitlement {
            pool.status = PoolStatus::Exhausted;
        }
        Storage::set_pool(env, &pool);

        let mut summary = Storage::get_profit_summary(env, pool.startup_id);
        summary.total_claimed = summary
            .total_claimed
            .checked_add(payout)
            .ok_or(Error::ArithmeticOverflow)?;
        if summary.total_claimed > summary.total_deposited {
            panic!("profit conservation violated");
        }
        Storage::set_profit_summary(env, pool.startup_id, &summary);

        env.events().publish(
            (Symbol::new(env, "profit_claimed"), pool_id, investor.clone()),
            ProfitClaimedEvent {
                pool_id,
                investor: investor.clone(),
                holding,
                payout,
            },
        );

        if pool.status == PoolStatus::Exhausted {
            env.events().publish(
                (Symbol::new(env, "pool_exhausted"), pool_id),
                PoolExhaustedEvent {
                    pool_id,
                    startup_id: pool.startup_id,
                    remaining,
                },
            );
        }

        Ok(payout)
    }

    pub fn get_pool(env: &Env, pool_id: u64) -> Option<ProfitPool> {
        Storage::get_pool(env, pool_id).ok()
    }

    pub fn has_claimed(env: &Env, pool_id: u64, investor: &Address) -> bool {
        Storage::has_claimed(env, pool_id, investor)
    }

    pub fn startup_pools(env: &Env, startup_id: u64) -> Vec<u64> {
        Storage::get_startup_pools(env, startup_id)
    }

    pub fn summary(env: &Env, startup_id: u64) -> ProfitSummary {
        Storage::get_profit_summary(env, startup_id)
    }
}
