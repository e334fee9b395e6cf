use crate::error::Error;
use crate::events::InvestmentMadeEvent;
use crate::pricing::calculate_shares;
use crate::share_ledger::Shares;
use crate::storage::{page_bounds, Investment, Storage};
use crate::valuation::ValuationTracker;
use soroban_sdk::{Address, Env, Symbol, Vec};

pub struct InvestmentProcessor;

impl InvestmentProcessor {
    /// Buy whole shares at the current price.
    ///
    /// The order is rejected rather than partially filled when it does not
    /// fit the remaining supply. Any sub-share remainder of `amount` is not
    /// converted and is left for the caller to settle.
    ///
    /// # Errors
    /// - `UnknownStartup`: Startup doesn't exist
    /// - `StartupNotValidated`: Validator has not approved the startup
    /// - `ZeroAmount`: `amount == 0`
    /// - `PriceUndefined`: Price can't be computed or floors to zero
    /// - `ZeroSharesComputed`: `amount` buys less than one share
    /// - `InsufficientAvailableShares`: Not enough unsold shares
    pub fn invest(
        env: &Env,
        startup_id: u64,
        investor: &Address,
        amount: u128,
        at_time: u64,
    ) -> Result<Investment, Error> {
        let startup = Storage::get_startup(env, startup_id)?;
        if !startup.is_validated {
            return Err(Error::StartupNotValidated);
        }

        if amount == 0 {
            return Err(Error::ZeroAmount);
        }

        let price = ValuationTracker::price_per_share(env, startup_id)
            .map_err(|_| Error::PriceUndefined)?;
        if price == 0 {
            return Err(Error::PriceUndefined);
        }

        let shares = calculate_shares(amount, price).ok_or(Error::PriceUndefined)?;
        if shares == 0 {
            return Err(Error::ZeroSharesComputed);
        }

        Shares::reserve_shares(env, startup_id, investor, shares)?;

        let investment = Investment {
            startup_id,
            investor: investor.clone(),
            amount_contributed: amount,
            shares_issued: shares,
            price_per_share_at_time: price,
            timestamp: at_time,
        };

        let mut log = Storage::get_investment_log(env, startup_id);
        Storage::set_investment(env, startup_id, log.count, &investment);
        log.count = log.count.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        log.total_raised = log
            .total_raised
            .checked_add(amount)
            .ok_or(Error::ArithmeticOverflow)?;
        Storage::set_investment_log(env, startup_id, &log);

        env.events().publish(
            (Symbol::new(env, "investment_made"), startup_id, investor.clone()),
            InvestmentMadeEvent {
                startup_id,
                investor: investor.clone(),
                amount,
                shares_issued: shares,
                price,
                timestamp: at_time,
            },
        );

        Ok(investment)
    }

    /// One page of recorded investments, in the order they were applied, plus
    /// the cursor of the next page
    pub fn investments(
        env: &Env,
        startup_id: u64,
        start: u64,
        limit: u32,
    ) -> (Vec<Investment>, Option<u64>) {
        let log = Storage::get_investment_log(env, startup_id);
        let mut records = Vec::new(env);

        let (end, next_cursor) = match page_bounds(log.count, start, limit) {
            Some(bounds) => bounds,
            None => return (records, None),
        };

        for index in start..end {
            if let Some(investment) = Storage::get_investment(env, startup_id, index) {
                records.push_back(investment);
            }
        }
        (records, next_cursor)
    }

    pub fn investment_count(env: &Env, startup_id: u64) -> u64 {
        Storage::get_investment_log(env, startup_id).count
    }

    /// Sum of `amount_contributed` over all investments
    pub fn total_raised(env: &Env, startup_id: u64) -> u128 {
        Storage::get_investment_log(env, startup_id).total_raised
    }
}
