use crate::error::Error;
use crate::events::ConfigUpdatedEvent;
use crate::storage::{LedgerConfig, Storage};
use soroban_sdk::{Address, Env, Symbol};

pub struct Admin;

impl Admin {
    /// Initialize contract configuration
    pub fn initialize(
        env: &Env,
        admin: &Address,
        validator: &Address,
        valuation_feed: &Address,
        history_limit: u32,
    ) -> Result<(), Error> {
        if Storage::is_initialized(env) {
            return Err(Error::AlreadyInitialized);
        }

        admin.require_auth();

        let config = LedgerConfig {
            admin: admin.clone(),
            validator: validator.clone(),
            valuation_feed: valuation_feed.clone(),
            history_limit,
        };
        Storage::set_config(env, &config);
        Storage::set_paused(env, false);

        Self::publish_config(env, &config);
        Ok(())
    }

    pub fn pause(env: &Env) -> Result<(), Error> {
        let config = Storage::get_config(env)?;
        config.admin.require_auth();

        Storage::set_paused(env, true);
        Ok(())
    }

    pub fn unpause(env: &Env) -> Result<(), Error> {
        let config = Storage::get_config(env)?;
        config.admin.require_auth();

        Storage::set_paused(env, false);
        Ok(())
    }

    /// Replace the validation collaborator
    pub fn set_validator(env: &Env, validator: &Address) -> Result<(), Error> {
        Self::update(env, |config| config.validator = validator.clone())
    }

    /// Replace the valuation feed collaborator
    pub fn set_valuation_feed(env: &Env, valuation_feed: &Address) -> Result<(), Error> {
        Self::update(env, |config| config.valuation_feed = valuation_feed.clone())
    }

    /// Change valuation retention; applies to the next append per startup
    pub fn set_history_limit(env: &Env, history_limit: u32) -> Result<(), Error> {
        Self::update(env, |config| config.history_limit = history_limit)
    }

    /// Fails with `ContractPaused` while the admin has the ledger paused
    pub fn check_not_paused(env: &Env) -> Result<(), Error> {
        if Storage::is_paused(env) {
            return Err(Error::ContractPaused);
        }
        Ok(())
    }

    fn update(env: &Env, apply: impl FnOnce(&mut LedgerConfig)) -> Result<(), Error> {
        let mut config = Storage::get_config(env)?;
        config.admin.require_auth();

        apply(&mut config);
        Storage::set_config(env, &config);

        Self::publish_config(env, &config);
        Ok(())
    }

    fn publish_config(env: &Env, config: &LedgerConfig) {
        env.events().publish(
            (Symbol::new(env, "config_updated"),),
            ConfigUpdatedEvent {
                validator: config.validator.clone(),
                valuation_feed: config.valuation_feed.clone(),
                history_limit: config.history_limit,
            },
        );
    }
}
