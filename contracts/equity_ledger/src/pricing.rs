//! Integer share math. Every division floors; remainders stay with the
//! caller (investment dust) or in the pool (distribution dust).

/// Price of one share at the given valuation
///
/// Formula: price = valuation / total_shares
///
/// Example:
/// - valuation: 1,000,000, total_shares: 1,000
/// - price: 1,000
pub fn calculate_price_per_share(valuation: u128, total_shares: u128) -> Option<u128> {
    valuation.checked_div(total_shares)
}

/// Whole shares an amount buys at a given price
///
/// Formula: shares = amount / price
///
/// Example:
/// - amount: 2,500, price: 1,000
/// - shares: 2 (500 is not converted)
pub fn calculate_shares(amount: u128, price: u128) -> Option<u128> {
    amount.checked_div(price)
}

/// Profit owed to each outstanding share of a deposit
///
/// Formula: entitlement = deposit / shares_sold
///
/// Example:
/// - deposit: 1,000, shares_sold: 400
/// - entitlement: 2 (200 stays unclaimed in the pool)
pub fn calculate_entitlement(deposit: u128, shares_sold: u128) -> Option<u128> {
    deposit.checked_div(shares_sold)
}

/// Payout for a holder with `holding` shares
pub fn calculate_payout(per_share_entitlement: u128, holding: u128) -> Option<u128> {
    per_share_entitlement.checked_mul(holding)
}
