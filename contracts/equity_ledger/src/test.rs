#![cfg(test)]

use super::*;
use soroban_sdk::{testutils::Address as _, Address, Env, String};

struct Setup {
    env: Env,
    client: EquityLedgerClient<'static>,
    admin: Address,
    founder: Address,
}

fn setup(history_limit: u32) -> Setup {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register_contract(None, EquityLedger);
    let client = EquityLedgerClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    let validator = Address::generate(&env);
    let feed = Address::generate(&env);
    let founder = Address::generate(&env);

    client.initialize(&admin, &validator, &feed, &history_limit);

    Setup {
        env,
        client,
        admin,
        founder,
    }
}

fn register(s: &Setup, total_shares: u128, valuation: u128) -> u64 {
    s.client.register_startup(
        &s.founder,
        &String::from_str(&s.env, "Acme"),
        &String::from_str(&s.env, "Rockets"),
        &total_shares,
        &valuation,
    )
}

#[test]
fn test_initialize_twice() {
    let s = setup(0);
    let other = Address::generate(&s.env);

    let result = s.client.try_initialize(&other, &other, &other, &0);
    assert_eq!(result, Err(Ok(Error::AlreadyInitialized)));
    assert_eq!(s.client.get_config().admin, s.admin);
}

#[test]
fn test_register_requires_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register_contract(None, EquityLedger);
    let client = EquityLedgerClient::new(&env, &contract_id);

    let founder = Address::generate(&env);
    let result = client.try_register_startup(
        &founder,
        &String::from_str(&env, "Acme"),
        &String::from_str(&env, ""),
        &1_000,
        &1_000,
    );
    assert_eq!(result, Err(Ok(Error::NotInitialized)));
}

#[test]
fn test_register_startup() {
    let s = setup(0);

    let first = register(&s, 1_000, 50_000);
    let second = register(&s, 10, 10);

    assert_eq!(first, 1);
    assert_eq!(second, 2);
    assert_eq!(s.client.startup_count(), 2);

    let view = s.client.get_startup(&first).unwrap();
    assert_eq!(view.founder, s.founder);
    assert_eq!(view.name, String::from_str(&s.env, "Acme"));
    assert!(!view.is_validated);
    assert_eq!(view.total_shares, 1_000);
    assert_eq!(view.available_shares, 1_000);
    assert_eq!(view.current_valuation, 50_000);
    assert_eq!(view.price_per_share, 50);
    assert_eq!(view.total_raised, 0);
    assert_eq!(view.investor_count, 0);

    let owned = s.client.founder_startups(&s.founder);
    assert_eq!(owned.len(), 2);
    assert_eq!(owned.get(1).unwrap(), second);
}

#[test]
fn test_register_rejects_zero_shares_and_valuation() {
    let s = setup(0);
    let name = String::from_str(&s.env, "Acme");

    let result = s
        .client
        .try_register_startup(&s.founder, &name, &name, &0, &1_000);
    assert_eq!(result, Err(Ok(Error::InvalidShareCount)));

    let result = s
        .client
        .try_register_startup(&s.founder, &name, &name, &1_000, &0);
    assert_eq!(result, Err(Ok(Error::InvalidValuation)));

    // Failed registrations do not consume ids
    assert_eq!(s.client.startup_count(), 0);
    assert_eq!(s.client.get_startup(&1), None);
}

#[test]
fn test_validate_is_idempotent() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);

    s.client.validate_startup(&id);
    s.client.validate_startup(&id);

    assert!(s.client.get_startup(&id).unwrap().is_validated);
    assert_eq!(
        s.client.try_validate_startup(&99),
        Err(Ok(Error::UnknownStartup))
    );
}

#[test]
fn test_invest_requires_validation() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);
    let investor = Address::generate(&s.env);

    let result = s.client.try_invest(&id, &investor, &100, &10);
    assert_eq!(result, Err(Ok(Error::StartupNotValidated)));

    let result = s.client.try_invest(&77, &investor, &100, &10);
    assert_eq!(result, Err(Ok(Error::UnknownStartup)));
}

#[test]
fn test_invest_floors_to_whole_shares() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000_000); // price 1,000
    s.client.validate_startup(&id);
    let investor = Address::generate(&s.env);

    let investment = s.client.invest(&id, &investor, &2_500, &10);
    assert_eq!(investment.shares_issued, 2);
    assert_eq!(investment.price_per_share_at_time, 1_000);
    assert_eq!(investment.amount_contributed, 2_500);
    assert_eq!(investment.timestamp, 10);

    assert_eq!(
        s.client.try_invest(&id, &investor, &999, &11),
        Err(Ok(Error::ZeroSharesComputed))
    );
    assert_eq!(
        s.client.try_invest(&id, &investor, &0, &11),
        Err(Ok(Error::ZeroAmount))
    );
    assert_eq!(s.client.get_holding(&id, &investor), 2);
    assert_eq!(s.client.total_investment(&id), 2_500);
}

#[test]
fn test_invest_with_zero_price() {
    let s = setup(0);
    let id = register(&s, 1_000, 999); // price floors to 0
    s.client.validate_startup(&id);
    let investor = Address::generate(&s.env);

    assert_eq!(s.client.price_per_share(&id), 0);
    assert_eq!(
        s.client.try_invest(&id, &investor, &10_000, &1),
        Err(Ok(Error::PriceUndefined))
    );
}

#[test]
fn test_valuation_changes_price() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);
    s.client.validate_startup(&id);
    let investor = Address::generate(&s.env);

    s.client.invest(&id, &investor, &100, &1);
    s.client.set_valuation(&id, &4_000, &5);
    let investment = s.client.invest(&id, &investor, &100, &6);

    assert_eq!(investment.price_per_share_at_time, 4);
    assert_eq!(investment.shares_issued, 25);
    assert_eq!(s.client.get_holding(&id, &investor), 125);
    assert_eq!(s.client.investment_count(&id), 2);
    assert_eq!(s.client.token_holders(&id, &0, &0).0.len(), 1);
}

#[test]
fn test_non_monotonic_valuation_leaves_state() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);

    s.client.set_valuation(&id, &2_000, &50);
    assert_eq!(
        s.client.try_set_valuation(&id, &3_000, &50),
        Err(Ok(Error::NonMonotonicTime))
    );
    assert_eq!(
        s.client.try_set_valuation(&id, &3_000, &10),
        Err(Ok(Error::NonMonotonicTime))
    );
    assert_eq!(
        s.client.try_set_valuation(&id, &0, &60),
        Err(Ok(Error::NonPositiveValuation))
    );

    assert_eq!(s.client.current_valuation(&id), 2_000);
    assert_eq!(s.client.valuation_history_len(&id), 2);
}

#[test]
fn test_history_limit_config() {
    let s = setup(2);
    let id = register(&s, 100, 100);

    s.client.set_valuation(&id, &200, &1);
    s.client.set_valuation(&id, &300, &2);
    s.client.set_valuation(&id, &400, &3);

    let (history, next) = s.client.valuation_history(&id, &0, &0);
    assert_eq!(history.len(), 2);
    assert_eq!(next, None);
    assert_eq!(history.get(0).unwrap().valuation, 300);
    assert_eq!(history.get(1).unwrap().valuation, 400);

    s.client.set_history_limit(&0);
    s.client.set_valuation(&id, &500, &4);
    assert_eq!(s.client.valuation_history_len(&id), 3);
    assert_eq!(s.client.get_config().history_limit, 0);
}

#[test]
fn test_lowering_history_limit_keeps_feed_working() {
    let s = setup(0);
    let id = register(&s, 100, 100);

    for step in 1..=60u64 {
        s.client.set_valuation(&id, &(100 + step as u128), &step);
    }
    assert_eq!(s.client.valuation_history_len(&id), 61);

    s.client.set_history_limit(&1);
    s.client.set_valuation(&id, &5_000, &1_000);
    s.client.set_valuation(&id, &6_000, &1_001);

    let (history, next) = s.client.valuation_history(&id, &0, &0);
    assert_eq!(history.len(), 1);
    assert_eq!(next, None);
    assert_eq!(history.get(0).unwrap().valuation, 6_000);
    assert_eq!(s.client.valuation_history_len(&id), 1);
    assert_eq!(s.client.current_valuation(&id), 6_000);
}

#[test]
fn test_valuation_history_pages() {
    let s = setup(0);
    let id = register(&s, 100, 100);

    for step in 1..=44u64 {
        s.client.set_valuation(&id, &(100 + step as u128), &step);
    }

    let mut seen = 0u32;
    let mut cursor = Some(0u64);
    let mut last_time = 0u64;
    while let Some(start) = cursor {
        let (page, next) = s.client.valuation_history(&id, &start, &0);
        assert!(page.len() <= MAX_PAGE_LIMIT);
        for point in page.iter() {
            if seen > 0 {
                assert!(point.effective_time > last_time);
            }
            last_time = point.effective_time;
            seen += 1;
        }
        cursor = next;
    }
    assert_eq!(seen, 45);
    assert_eq!(last_time, 44);

    let (page, next) = s.client.valuation_history(&id, &45, &10);
    assert!(page.is_empty());
    assert_eq!(next, None);
}

#[test]
fn test_pause_blocks_mutations_not_views() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);
    let pending = register(&s, 1_000, 1_000);
    s.client.validate_startup(&id);
    let investor = Address::generate(&s.env);
    s.client.invest(&id, &investor, &100, &1);
    let pool_id = s.client.deposit_profit(&id, &1_000, &2);

    s.client.pause();
    assert!(s.client.is_paused());

    let name = String::from_str(&s.env, "Paused");
    assert_eq!(
        s.client
            .try_register_startup(&s.founder, &name, &name, &1_000, &1_000),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        s.client.try_validate_startup(&pending),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        s.client.try_set_valuation(&id, &2_000, &3),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        s.client.try_invest(&id, &investor, &100, &3),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        s.client.try_deposit_profit(&id, &1_000, &3),
        Err(Ok(Error::ContractPaused))
    );
    assert_eq!(
        s.client.try_claim(&pool_id, &investor),
        Err(Ok(Error::ContractPaused))
    );

    // Views keep answering and nothing moved
    assert_eq!(s.client.startup_count(), 2);
    assert!(!s.client.get_startup(&pending).unwrap().is_validated);
    assert_eq!(s.client.current_valuation(&id), 1_000);
    assert_eq!(s.client.get_holding(&id, &investor), 100);
    assert_eq!(s.client.startup_pools(&id).len(), 1);
    assert!(!s.client.has_claimed(&pool_id, &investor));

    s.client.unpause();
    assert_eq!(s.client.claim(&pool_id, &investor), 1_000);
    s.client.invest(&id, &investor, &100, &4);
    assert_eq!(s.client.get_holding(&id, &investor), 200);
}

#[test]
fn test_deposit_profit_preconditions() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);
    s.client.validate_startup(&id);

    assert_eq!(
        s.client.try_deposit_profit(&id, &0, &1),
        Err(Ok(Error::ZeroAmount))
    );
    assert_eq!(
        s.client.try_deposit_profit(&id, &1_000, &1),
        Err(Ok(Error::NoSharesOutstanding))
    );
    assert_eq!(
        s.client.try_deposit_profit(&42, &1_000, &1),
        Err(Ok(Error::UnknownStartup))
    );

    let investor = Address::generate(&s.env);
    s.client.invest(&id, &investor, &400, &2);
    assert_eq!(
        s.client.try_deposit_profit(&id, &399, &3),
        Err(Ok(Error::EntitlementRoundsToZero))
    );
}

#[test]
fn test_claim_unknown_pool_and_no_holding() {
    let s = setup(0);
    let id = register(&s, 1_000, 1_000);
    s.client.validate_startup(&id);
    let holder = Address::generate(&s.env);
    let stranger = Address::generate(&s.env);

    s.client.invest(&id, &holder, &100, &1);
    let pool_id = s.client.deposit_profit(&id, &500, &2);

    assert_eq!(
        s.client.try_claim(&(pool_id + 1), &holder),
        Err(Ok(Error::UnknownPool))
    );
    assert_eq!(
        s.client.try_claim(&pool_id, &stranger),
        Err(Ok(Error::NoHolding))
    );
    assert_eq!(Error::NoHolding.kind(), ErrorKind::NotFound);
    assert!(!s.client.has_claimed(&pool_id, &stranger));

    assert_eq!(s.client.claim(&pool_id, &holder), 500);
    assert!(s.client.has_claimed(&pool_id, &holder));
}

#[test]
fn test_error_kinds_reach_callers() {
    let s = setup(0);
    let id = register(&s, 10, 10);
    s.client.validate_startup(&id);
    let investor = Address::generate(&s.env);

    let err = match s.client.try_invest(&id, &investor, &11, &1) {
        Err(Ok(err)) => err,
        _ => panic!("expected contract error"),
    };
    assert_eq!(err, Error::InsufficientAvailableShares);
    assert_eq!(err.kind(), ErrorKind::CapacityExceeded);
}
