#![no_std]

mod admin;
mod error;
mod events;
mod investment;
mod pricing;
mod profit;
mod registry;
mod share_ledger;
mod storage;
mod valuation;

#[cfg(test)]
mod test;

pub use error::{Error, ErrorKind};
pub use storage::{
    Investment, LedgerConfig, PoolStatus, ProfitPool, ProfitSummary, StartupView, ValuationPoint,
    MAX_PAGE_LIMIT,
};

use admin::Admin;
use investment::InvestmentProcessor;
use profit::ProfitEngine;
use registry::Registry;
use share_ledger::Shares;
use storage::{Storage, KEEP_ALL_HISTORY};
use valuation::ValuationTracker;

use soroban_sdk::{contract, contractimpl, Address, Env, String, Vec};

#[contract]
pub struct EquityLedger;

#[contractimpl]
impl EquityLedger {
    // ============================================
    // INITIALIZATION & ADMIN
    // ============================================

    /// Initialize the ledger
    ///
    /// `history_limit` is the number of valuation points kept per startup
    /// (0 keeps all).
    ///
    /// # Errors
    /// - `AlreadyInitialized`: Contract already initialized
    pub fn initialize(
        env: Env,
        admin: Address,
        validator: Address,
        valuation_feed: Address,
        history_limit: u32,
    ) -> Result<(), Error> {
        Admin::initialize(&env, &admin, &validator, &valuation_feed, history_limit)
    }

    /// Pause all mutating entry points (admin only)
    pub fn pause(env: Env) -> Result<(), Error> {
        Admin::pause(&env)
    }

    /// Resume mutating entry points (admin only)
    pub fn unpause(env: Env) -> Result<(), Error> {
        Admin::unpause(&env)
    }

    pub fn set_validator(env: Env, validator: Address) -> Result<(), Error> {
        Admin::set_validator(&env, &validator)
    }

    pub fn set_valuation_feed(env: Env, valuation_feed: Address) -> Result<(), Error> {
        Admin::set_valuation_feed(&env, &valuation_feed)
    }

    pub fn set_history_limit(env: Env, history_limit: u32) -> Result<(), Error> {
        Admin::set_history_limit(&env, history_limit)
    }

    pub fn get_config(env: Env) -> Result<LedgerConfig, Error> {
        Storage::get_config(&env)
    }

    pub fn is_paused(env: Env) -> bool {
        Storage::is_paused(&env)
    }

    // ============================================
    // REGISTRY
    // ============================================

    /// Register a new startup; the founder must authorize
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `InvalidShareCount`: `total_shares == 0`
    /// - `InvalidValuation`: `initial_valuation == 0`
    pub fn register_startup(
        env: Env,
        founder: Address,
        name: String,
        description: String,
        total_shares: u128,
        initial_valuation: u128,
    ) -> Result<u64, Error> {
        Storage::get_config(&env)?;
        Admin::check_not_paused(&env)?;

        founder.require_auth();

        Registry::register_startup(
            &env,
            &founder,
            &name,
            &description,
            total_shares,
            initial_valuation,
        )
    }

    /// Approve a startup for investment; the configured validator must
    /// authorize. Idempotent.
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownStartup`: Startup doesn't exist
    pub fn validate_startup(env: Env, startup_id: u64) -> Result<(), Error> {
        let config = Storage::get_config(&env)?;
        Admin::check_not_paused(&env)?;

        config.validator.require_auth();

        Registry::validate_startup(&env, startup_id, &config.validator)
    }

    pub fn get_startup(env: Env, startup_id: u64) -> Option<StartupView> {
        Registry::get_startup(&env, startup_id)
    }

    pub fn startup_count(env: Env) -> u64 {
        Registry::startup_count(&env)
    }

    pub fn founder_startups(env: Env, founder: Address) -> Vec<u64> {
        Registry::founder_startups(&env, &founder)
    }

    // ============================================
    // VALUATION
    // ============================================

    /// Record a new valuation; the configured valuation feed must authorize
    ///
    /// # Errors
    /// - `NotInitialized`: Contract not initialized
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownStartup`: Startup doesn't exist
    /// - `NonPositiveValuation`: `new_valuation == 0`
    /// - `NonMonotonicTime`: `at_time` not after the last recorded time
    pub fn set_valuation(
        env: Env,
        startup_id: u64,
        new_valuation: u128,
        at_time: u64,
    ) -> Result<(), Error> {
        let config = Storage::get_config(&env)?;
        Admin::check_not_paused(&env)?;

        config.valuation_feed.require_auth();

        ValuationTracker::set_valuation(
            &env,
            startup_id,
            new_valuation,
            at_time,
            config.history_limit,
        )
    }

    pub fn current_valuation(env: Env, startup_id: u64) -> Result<u128, Error> {
        ValuationTracker::current(&env, startup_id)
    }

    pub fn price_per_share(env: Env, startup_id: u64) -> Result<u128, Error> {
        ValuationTracker::price_per_share(&env, startup_id)
    }

    /// Page through the visible valuation history, oldest first
    ///
    /// Returns at most `limit` points (0 or anything above `MAX_PAGE_LIMIT`
    /// means `MAX_PAGE_LIMIT`) and the `start` of the next page, if any.
    pub fn valuation_history(
        env: Env,
        startup_id: u64,
        start: u64,
        limit: u32,
    ) -> (Vec<ValuationPoint>, Option<u64>) {
        let history_limit = Storage::get_config(&env)
            .map(|config| config.history_limit)
            .unwrap_or(KEEP_ALL_HISTORY);
        ValuationTracker::history(&env, startup_id, history_limit, start, limit)
    }

    pub fn valuation_history_len(env: Env, startup_id: u64) -> u64 {
        let history_limit = Storage::get_config(&env)
            .map(|config| config.history_limit)
            .unwrap_or(KEEP_ALL_HISTORY);
        ValuationTracker::history_len(&env, startup_id, history_limit)
    }

    // ============================================
    // INVESTMENT
    // ============================================

    /// Invest `amount` in a startup; the investor must authorize
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownStartup`: Startup doesn't exist
    /// - `StartupNotValidated`: Startup not validated yet
    /// - `ZeroAmount`: `amount == 0`
    /// - `PriceUndefined`: Price can't be computed or is zero
    /// - `ZeroSharesComputed`: Amount buys less than one share
    /// - `InsufficientAvailableShares`: Not enough unsold shares
    pub fn invest(
        env: Env,
        startup_id: u64,
        investor: Address,
        amount: u128,
        at_time: u64,
    ) -> Result<Investment, Error> {
        Admin::check_not_paused(&env)?;

        investor.require_auth();

        InvestmentProcessor::invest(&env, startup_id, &investor, amount, at_time)
    }

    pub fn get_holding(env: Env, startup_id: u64, investor: Address) -> u128 {
        Shares::get_holding(&env, startup_id, &investor)
    }

    pub fn total_sold(env: Env, startup_id: u64) -> Result<u128, Error> {
        Shares::total_sold(&env, startup_id)
    }

    /// Page through current shareholders in order of first purchase
    pub fn token_holders(
        env: Env,
        startup_id: u64,
        start: u32,
        limit: u32,
    ) -> (Vec<Address>, Option<u32>) {
        Shares::holders(&env, startup_id, start, limit)
    }

    /// Page through the investment log in the order it was written
    pub fn investments(
        env: Env,
        startup_id: u64,
        start: u64,
        limit: u32,
    ) -> (Vec<Investment>, Option<u64>) {
        InvestmentProcessor::investments(&env, startup_id, start, limit)
    }

    pub fn investment_count(env: Env, startup_id: u64) -> u64 {
        InvestmentProcessor::investment_count(&env, startup_id)
    }

    pub fn total_investment(env: Env, startup_id: u64) -> u128 {
        InvestmentProcessor::total_raised(&env, startup_id)
    }

    // ============================================
    // PROFIT DISTRIBUTION
    // ============================================

    /// Deposit profit for the current shareholders; the founder must
    /// authorize. Returns the new pool id.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownStartup`: Startup doesn't exist
    /// - `ZeroAmount`: `amount == 0`
    /// - `NoSharesOutstanding`: No shares sold yet
    /// - `EntitlementRoundsToZero`: Deposit smaller than shares sold
    pub fn deposit_profit(env: Env, startup_id: u64, amount: u128, at_time: u64) -> Result<u64, Error> {
        Admin::check_not_paused(&env)?;

        Registry::founder(&env, startup_id)?.require_auth();

        ProfitEngine::deposit_profit(&env, startup_id, amount, at_time)
    }

    /// Claim from a pool; the investor must authorize. Returns the payout.
    ///
    /// # Errors
    /// - `ContractPaused`: Contract is paused
    /// - `UnknownPool`: Pool doesn't exist
    /// - `AlreadyClaimed`: Investor already claimed from this pool
    /// - `NoHolding`: Investor holds no shares
    /// - `PoolExhausted`: Remaining balance can't cover the payout
    pub fn claim(env: Env, pool_id: u64, investor: Address) -> Result<u128, Error> {
        Admin::check_not_paused(&env)?;

        investor.require_auth();

        ProfitEngine::claim(&env, pool_id, &investor)
    }

    pub fn get_pool(env: Env, pool_id: u64) -> Option<ProfitPool> {
        ProfitEngine::get_pool(&env, pool_id)
    }

    pub fn has_claimed(env: Env, pool_id: u64, investor: Address) -> bool {
        ProfitEngine::has_claimed(&env, pool_id, &investor)
    }

    pub fn startup_pools(env: Env, startup_id: u64) -> Vec<u64> {
        ProfitEngine::startup_pools(&env, startup_id)
    }

    pub fn profit_summary(env: Env, startup_id: u64) -> ProfitSummary {
        ProfitEngine::summary(&env, startup_id)
    }
}
