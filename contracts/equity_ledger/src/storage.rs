use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::error::Error;

/// Retention value meaning "keep every valuation point"
pub const KEEP_ALL_HISTORY: u32 = 0;

/// First id handed out for startups and profit pools
pub const FIRST_ID: u64 = 1;

/// Largest page returned by the paginated views
pub const MAX_PAGE_LIMIT: u32 = 20;

/// End of the page `[start, end)` over `count` entries and the cursor for the
/// next page. `None` when `start` is past the end.
///
/// A `limit` of 0 or above `MAX_PAGE_LIMIT` is treated as `MAX_PAGE_LIMIT`.
pub fn page_bounds(count: u64, start: u64, limit: u32) -> Option<(u64, Option<u64>)> {
    if start >= count {
        return None;
    }

    let effective_limit = if limit == 0 || limit > MAX_PAGE_LIMIT {
        MAX_PAGE_LIMIT
    } else {
        limit
    };

    let end = core::cmp::min(start.saturating_add(effective_limit as u64), count);
    let next_cursor = if end < count { Some(end) } else { None };
    Some((end, next_cursor))
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    /// Platform admin (pause, config changes)
    pub admin: Address,
    /// External compliance collaborator allowed to validate startups
    pub validator: Address,
    /// External oracle/governance collaborator allowed to move valuations
    pub valuation_feed: Address,
    /// Valuation points retained per startup, 0 = keep all
    pub history_limit: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Startup {
    pub id: u64,
    pub founder: Address,
    pub name: String,
    pub description: String,
    /// Flipped once by the validator, never reverted
    pub is_validated: bool,
    pub registered_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShareLedger {
    /// Fixed at registration
    pub total_shares: u128,
    /// Shares not yet sold, only ever decreases
    pub available_shares: u128,
    /// Running sum of every holding
    pub held_shares: u128,
    /// Number of investors with a non-zero holding, also the next holder index
    pub holder_count: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValuationPoint {
    pub valuation: u128,
    pub effective_time: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValuationRecord {
    pub current_valuation: u128,
    /// Time of the newest point, kept even after pruning
    pub last_effective_time: u64,
    /// Sequence number of the oldest retained point
    pub history_start: u64,
    /// Sequence number the next point will get
    pub history_end: u64,
}

/// Immutable record of one successful investment
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Investment {
    pub startup_id: u64,
    pub investor: Address,
    pub amount_contributed: u128,
    pub shares_issued: u128,
    pub price_per_share_at_time: u128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct InvestmentLog {
    pub count: u64,
    pub total_raised: u128,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PoolStatus {
    /// Claims accepted
    Open = 0,
    /// Remaining balance cannot cover a single share, terminal
    Exhausted = 1,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfitPool {
    pub id: u64,
    pub startup_id: u64,
    pub total_deposited: u128,
    pub total_claimed: u128,
    pub per_share_entitlement: u128,
    pub shares_sold_at_deposit: u128,
    pub deposited_at: u64,
    pub status: PoolStatus,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ProfitSummary {
    pub total_deposited: u128,
    pub total_claimed: u128,
    pub pool_count: u32,
}

/// Read-only projection handed to the presentation layer
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StartupView {
    pub id: u64,
    pub founder: Address,
    pub name: String,
    pub description: String,
    pub is_validated: bool,
    pub total_shares: u128,
    pub available_shares: u128,
    pub current_valuation: u128,
    pub price_per_share: u128,
    pub total_raised: u128,
    pub investor_count: u32,
    pub registered_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    // Instance: config and id allocation
    Initialized,
    Config,
    Paused,
    NextStartupId,
    NextPoolId,

    // Persistent: per-startup state
    Startup(u64),
    ShareLedger(u64),
    Holding(u64, Address),     // (startup_id, investor) -> u128
    Holder(u64, u32),          // (startup_id, index) -> Address
    Valuation(u64),
    ValuationPoint(u64, u64),  // (startup_id, sequence) -> ValuationPoint
    InvestmentLog(u64),
    Investment(u64, u64),      // (startup_id, index) -> Investment
    FounderStartups(Address),
    StartupPools(u64),
    ProfitSummary(u64),

    // Persistent: per-pool state
    Pool(u64),
    Claim(u64, Address),       // (pool_id, investor) -> bool
}

pub struct Storage;

impl Storage {
    // Config
    pub fn is_initialized(env: &Env) -> bool {
        env.storage().instance().has(&DataKey::Initialized)
    }

    pub fn get_config(env: &Env) -> Result<LedgerConfig, Error> {
        env.storage()
            .instance()
            .get(&DataKey::Config)
            .ok_or(Error::NotInitialized)
    }

    pub fn set_config(env: &Env, config: &LedgerConfig) {
        env.storage().instance().set(&DataKey::Initialized, &true);
        env.storage().instance().set(&DataKey::Config, config);
    }

    pub fn is_paused(env: &Env) -> bool {
        env.storage()
            .instance()
            .get::<DataKey, bool>(&DataKey::Paused)
            .unwrap_or(false)
    }

    pub fn set_paused(env: &Env, paused: bool) {
        env.storage().instance().set(&DataKey::Paused, &paused);
    }

    // Id counters
    pub fn next_startup_id(env: &Env) -> u64 {
        env.storage()
            .instance()
            .get(&DataKey::NextStartupId)
            .unwrap_or(FIRST_ID)
    }

    pub fn allocate_startup_id(env: &Env) -> Result<u64, Error> {
        let id = Self::next_startup_id(env);
        let next = id.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::NextStartupId, &next);
        Ok(id)
    }

    pub fn allocate_pool_id(env: &Env) -> Result<u64, Error> {
        let id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextPoolId)
            .unwrap_or(FIRST_ID);
        let next = id.checked_add(1).ok_or(Error::ArithmeticOverflow)?;
        env.storage().instance().set(&DataKey::NextPoolId, &next);
        Ok(id)
    }

    // Startup
    pub fn get_startup(env: &Env, startup_id: u64) -> Result<Startup, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Startup(startup_id))
            .ok_or(Error::UnknownStartup)
    }

    pub fn set_startup(env: &Env, startup: &Startup) {
        env.storage()
            .persistent()
            .set(&DataKey::Startup(startup.id), startup);
    }

    pub fn get_founder_startups(env: &Env, founder: &Address) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::FounderStartups(founder.clone()))
            .unwrap_or(Vec::new(env))
    }

    pub fn set_founder_startups(env: &Env, founder: &Address, ids: &Vec<u64>) {
        env.storage()
            .persistent()
            .set(&DataKey::FounderStartups(founder.clone()), ids);
    }

    // Share ledger
    pub fn get_share_ledger(env: &Env, startup_id: u64) -> Result<ShareLedger, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::ShareLedger(startup_id))
            .ok_or(Error::UnknownStartup)
    }

    pub fn set_share_ledger(env: &Env, startup_id: u64, ledger: &ShareLedger) {
        env.storage()
            .persistent()
            .set(&DataKey::ShareLedger(startup_id), ledger);
    }

    pub fn get_holding(env: &Env, startup_id: u64, investor: &Address) -> u128 {
        env.storage()
            .persistent()
            .get(&DataKey::Holding(startup_id, investor.clone()))
            .unwrap_or(0)
    }

    pub fn set_holding(env: &Env, startup_id: u64, investor: &Address, shares: u128) {
        let key = DataKey::Holding(startup_id, investor.clone());
        if shares == 0 {
            env.storage().persistent().remove(&key);
        } else {
            env.storage().persistent().set(&key, &shares);
        }
    }

    pub fn get_holder(env: &Env, startup_id: u64, index: u32) -> Option<Address> {
        env.storage()
            .persistent()
            .get(&DataKey::Holder(startup_id, index))
    }

    pub fn set_holder(env: &Env, startup_id: u64, index: u32, investor: &Address) {
        env.storage()
            .persistent()
            .set(&DataKey::Holder(startup_id, index), investor);
    }

    // Valuation
    pub fn get_valuation(env: &Env, startup_id: u64) -> Result<ValuationRecord, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Valuation(startup_id))
            .ok_or(Error::UnknownStartup)
    }

    pub fn set_valuation(env: &Env, startup_id: u64, record: &ValuationRecord) {
        env.storage()
            .persistent()
            .set(&DataKey::Valuation(startup_id), record);
    }

    pub fn get_valuation_point(env: &Env, startup_id: u64, seq: u64) -> Option<ValuationPoint> {
        env.storage()
            .persistent()
            .get(&DataKey::ValuationPoint(startup_id, seq))
    }

    pub fn set_valuation_point(env: &Env, startup_id: u64, seq: u64, point: &ValuationPoint) {
        env.storage()
            .persistent()
            .set(&DataKey::ValuationPoint(startup_id, seq), point);
    }

    pub fn remove_valuation_point(env: &Env, startup_id: u64, seq: u64) {
        env.storage()
            .persistent()
            .remove(&DataKey::ValuationPoint(startup_id, seq));
    }

    // Investments
    pub fn get_investment_log(env: &Env, startup_id: u64) -> InvestmentLog {
        env.storage()
            .persistent()
            .get(&DataKey::InvestmentLog(startup_id))
            .unwrap_or_default()
    }

    pub fn set_investment_log(env: &Env, startup_id: u64, log: &InvestmentLog) {
        env.storage()
            .persistent()
            .set(&DataKey::InvestmentLog(startup_id), log);
    }

    pub fn get_investment(env: &Env, startup_id: u64, index: u64) -> Option<Investment> {
        env.storage()
            .persistent()
            .get(&DataKey::Investment(startup_id, index))
    }

    pub fn set_investment(env: &Env, startup_id: u64, index: u64, investment: &Investment) {
        env.storage()
            .persistent()
            .set(&DataKey::Investment(startup_id, index), investment);
    }

    // Profit pools
    pub fn get_pool(env: &Env, pool_id: u64) -> Result<ProfitPool, Error> {
        env.storage()
            .persistent()
            .get(&DataKey::Pool(pool_id))
            .ok_or(Error::UnknownPool)
    }

    pub fn set_pool(env: &Env, pool: &ProfitPool) {
        env.storage().persistent().set(&DataKey::Pool(pool.id), pool);
    }

    pub fn has_claimed(env: &Env, pool_id: u64, investor: &Address) -> bool {
        env.storage()
            .persistent()
            .get(&DataKey::Claim(pool_id, investor.clone()))
            .unwrap_or(false)
    }

    pub fn set_claimed(env: &Env, pool_id: u64, investor: &Address) {
        env.storage()
            .persistent()
            .set(&DataKey::Claim(pool_id, investor.clone()), &true);
    }

    pub fn get_startup_pools(env: &Env, startup_id: u64) -> Vec<u64> {
        env.storage()
            .persistent()
            .get(&DataKey::StartupPools(startup_id))
            .unwrap_or(Vec::new(env))
    }

    pub fn set_startup_pools(env: &Env, startup_id: u64, pools: &Vec<u64>) {
        env.storage()
            .persistent()
            .set(&DataKey::StartupPools(startup_id), pools);
    }

    pub fn get_profit_summary(env: &Env, startup_id: u64) -> ProfitSummary {
        env.storage()
            .persistent()
            .get(&DataKey::ProfitSummary(startup_id))
            .unwrap_or_default()
    }

    pub fn set_profit_summary(env: &Env, startup_id: u64, summary: &ProfitSummary) {
        env.storage()
            .persistent()
            .set(&DataKey::ProfitSummary(startup_id), summary);
    }
}
