use crate::error::Error;
use crate::events::{StartupRegisteredEvent, StartupValidatedEvent};
use crate::investment::InvestmentProcessor;
use crate::pricing::calculate_price_per_share;
use crate::share_ledger::Shares;
use crate::storage::{Startup, StartupView, Storage, FIRST_ID};
use crate::valuation::ValuationTracker;
use soroban_sdk::{Address, Env, String, Symbol, Vec};

pub struct Registry;

impl Registry {
    /// Register a startup and open its share ledger and valuation tracker
    ///
    /// # Errors
    /// - `InvalidShareCount`: `total_shares == 0`
    /// - `InvalidValuation`: `initial_valuation == 0`
    pub fn register_startup(
        env: &Env,
        founder: &Address,
        name: &String,
        description: &String,
        total_shares: u128,
        initial_valuation: u128,
    ) -> Result<u64, Error> {
        if total_shares == 0 {
            return Err(Error::InvalidShareCount);
        }
        if initial_valuation == 0 {
            return Err(Error::InvalidValuation);
        }

        let startup_id = Storage::allocate_startup_id(env)?;
        let now = env.ledger().timestamp();

        Storage::set_startup(
            env,
            &Startup {
                id: startup_id,
                founder: founder.clone(),
                name: name.clone(),
                description: description.clone(),
                is_validated: false,
                registered_at: now,
            },
        );
        Shares::open(env, startup_id, total_shares)?;
        ValuationTracker::open(env, startup_id, initial_valuation, now)?;

        let mut owned = Storage::get_founder_startups(env, founder);
        owned.push_back(startup_id);
        Storage::set_founder_startups(env, founder, &owned);

        env.events().publish(
            (Symbol::new(env, "startup_registered"), startup_id),
            StartupRegisteredEvent {
                startup_id,
                founder: founder.clone(),
                name: name.clone(),
                total_shares,
                initial_valuation,
            },
        );

        Ok(startup_id)
    }

    /// Mark a startup validated. Validating twice is a no-op.
    pub fn validate_startup(env: &Env, startup_id: u64, validator: &Address) -> Result<(), Error> {
        let mut startup = Storage::get_startup(env, startup_id)?;
        if startup.is_validated {
            return Ok(());
        }

        startup.is_validated = true;
        Storage::set_startup(env, &startup);

        env.events().publish(
            (Symbol::new(env, "startup_validated"), startup_id),
            StartupValidatedEvent {
                startup_id,
                validator: validator.clone(),
            },
        );

        Ok(())
    }

    /// Founder of `startup_id`, used to authorize profit deposits
    pub fn founder(env: &Env, startup_id: u64) -> Result<Address, Error> {
        Ok(Storage::get_startup(env, startup_id)?.founder)
    }

    pub fn get_startup(env: &Env, startup_id: u64) -> Option<StartupView> {
        let startup = Storage::get_startup(env, startup_id).ok()?;
        let ledger = Storage::get_share_ledger(env, startup_id).ok()?;
        let current_valuation = ValuationTracker::current(env, startup_id).ok()?;

        Some(StartupView {
            id: startup.id,
            founder: startup.founder,
            name: startup.name,
            description: startup.description,
            is_validated: startup.is_validated,
            total_shares: ledger.total_shares,
            available_shares: ledger.available_shares,
            current_valuation,
            price_per_share: calculate_price_per_share(current_valuation, ledger.total_shares)
                .unwrap_or(0),
            total_raised: InvestmentProcessor::total_raised(env, startup_id),
            investor_count: ledger.holder_count,
            registered_at: startup.registered_at,
        })
    }

    pub fn startup_count(env: &Env) -> u64 {
        Storage::next_startup_id(env) - FIRST_ID
    }

    /// Startups registered by `founder`, oldest first
    pub fn founder_startups(env: &Env, founder: &Address) -> Vec<u64> {
        Storage::get_founder_startups(env, founder)
    }
}
