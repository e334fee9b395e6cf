use soroban_sdk::{contracttype, Address, String};

#[contracttype]
#[derive(Clone, Debug)]
pub struct StartupRegisteredEvent {
    pub startup_id: u64,
    pub founder: Address,
    pub name: String,
    pub total_shares: u128,
    pub initial_valuation: u128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct StartupValidatedEvent {
    pub startup_id: u64,
    pub validator: Address,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ValuationUpdatedEvent {
    pub startup_id: u64,
    pub previous_valuation: u128,
    pub new_valuation: u128,
    pub effective_time: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct InvestmentMadeEvent {
    pub startup_id: u64,
    pub investor: Address,
    pub amount: u128,
    pub shares_issued: u128,
    pub price: u128,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProfitDepositedEvent {
    pub pool_id: u64,
    pub startup_id: u64,
    pub amount: u128,
    pub per_share_entitlement: u128,
    pub shares_sold: u128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ProfitClaimedEvent {
    pub pool_id: u64,
    pub investor: Address,
    pub holding: u128,
    pub payout: u128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolExhaustedEvent {
    pub pool_id: u64,
    pub startup_id: u64,
    pub remaining: u128,
}

#[contracttype]
#[derive(Clone, Debug)]
pub struct ConfigUpdatedEvent {
    pub validator: Address,
    pub valuation_feed: Address,
    pub history_limit: u32,
}
