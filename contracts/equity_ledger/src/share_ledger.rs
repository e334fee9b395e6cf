use crate::error::Error;
use crate::storage::{page_bounds, ShareLedger, Storage};
use soroban_sdk::{Address, Env, Vec};

/// Per-startup bookkeeping of sold and unsold shares.
///
/// Invariant after every call: `sum(holdings) + available_shares == total_shares`,
/// and no investor is stored with a zero holding. `held_shares` carries the
/// sum so the check costs the same for one holder or ten thousand.
pub struct Shares;

impl Shares {
    /// Open a ledger with every share available
    pub fn open(env: &Env, startup_id: u64, total_shares: u128) -> Result<(), Error> {
        if total_shares == 0 {
            return Err(Error::InvalidShareCount);
        }

        Storage::set_share_ledger(
            env,
            startup_id,
            &ShareLedger {
                total_shares,
                available_shares: total_shares,
                held_shares: 0,
                holder_count: 0,
            },
        );
        Ok(())
    }

    /// Move `shares` from the unsold pool into `investor`'s holding.
    ///
    /// This is the only mutator of holdings. It either applies fully or
    /// returns an error without touching storage.
    ///
    /// # Errors
    /// - `UnknownStartup`: No ledger for this startup
    /// - `ZeroSharesComputed`: `shares` is zero
    /// - `InsufficientAvailableShares`: `shares > available_shares`
    pub fn reserve_shares(
        env: &Env,
        startup_id: u64,
        investor: &Address,
        shares: u128,
    ) -> Result<(), Error> {
        let mut ledger = Storage::get_share_ledger(env, startup_id)?;

        if shares == 0 {
            return Err(Error::ZeroSharesComputed);
        }

        if shares > ledger.available_shares {
            return Err(Error::InsufficientAvailableShares);
        }

        let held = Storage::get_holding(env, startup_id, investor);
        let new_holding = held.checked_add(shares).ok_or(Error::ArithmeticOverflow)?;

        if held == 0 {
            Storage::set_holder(env, startup_id, ledger.holder_count, investor);
            ledger.holder_count = ledger
                .holder_count
                .checked_add(1)
                .ok_or(Error::ArithmeticOverflow)?;
        }

        ledger.available_shares -= shares;
        ledger.held_shares = ledger
            .held_shares
            .checked_add(shares)
            .ok_or(Error::ArithmeticOverflow)?;

        Self::check_totals(&ledger);

        Storage::set_holding(env, startup_id, investor, new_holding);
        Storage::set_share_ledger(env, startup_id, &ledger);

        Ok(())
    }

    /// Shares held by `investor`, 0 when absent or for an unknown startup
    pub fn get_holding(env: &Env, startup_id: u64, investor: &Address) -> u128 {
        Storage::get_holding(env, startup_id, investor)
    }

    /// `total_shares - available_shares`
    pub fn total_sold(env: &Env, startup_id: u64) -> Result<u128, Error> {
        let ledger = Storage::get_share_ledger(env, startup_id)?;
        Ok(ledger.total_shares - ledger.available_shares)
    }

    /// One page of investors with a non-zero holding, in order of first
    /// purchase, plus the cursor of the next page
    pub fn holders(env: &Env, startup_id: u64, start: u32, limit: u32) -> (Vec<Address>, Option<u32>) {
        let mut page = Vec::new(env);
        let count = match Storage::get_share_ledger(env, startup_id) {
            Ok(ledger) => ledger.holder_count,
            Err(_) => return (page, None),
        };

        let (end, next_cursor) = match page_bounds(count as u64, start as u64, limit) {
            Some(bounds) => bounds,
            None => return (page, None),
        };

        for index in start..end as u32 {
            if let Some(holder) = Storage::get_holder(env, startup_id, index) {
                page.push_back(holder);
            }
        }

        (page, next_cursor.map(|cursor| cursor as u32))
    }

    /// Panics if the running totals disagree. A violation is a programming
    /// error; the panic aborts the transaction and rolls it back.
    fn check_totals(ledger: &ShareLedger) {
        if ledger.held_shares.checked_add(ledger.available_shares) != Some(ledger.total_shares) {
            panic!("share conservation violated");
        }
    }

    /// Full sweep over every stored holding. Linear in holders, so tests only.
    #[cfg(test)]
    pub fn assert_conserved(env: &Env, startup_id: u64) {
        let ledger = Storage::get_share_ledger(env, startup_id).unwrap();

        let mut sold: u128 = 0;
        for index in 0..ledger.holder_count {
            let holder = Storage::get_holder(env, startup_id, index).unwrap();
            let held = Storage::get_holding(env, startup_id, &holder);
            assert!(held > 0, "zero holding retained");
            sold += held;
        }

        assert_eq!(sold, ledger.held_shares);
        assert_eq!(sold + ledger.available_shares, ledger.total_shares);
    }
}
