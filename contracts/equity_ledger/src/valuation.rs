use crate::error::Error;
use crate::events::ValuationUpdatedEvent;
use crate::pricing::calculate_price_per_share;
use crate::storage::{page_bounds, Storage, ValuationPoint, ValuationRecord, KEEP_ALL_HISTORY};
use soroban_sdk::{Env, Symbol, Vec};

/// Most retired points deleted by a single append. One append adds one point,
/// so a backlog left by lowering the limit shrinks by at least one per append.
pub const MAX_PRUNE_PER_APPEND: u64 = 2;

/// Current valuation plus a bounded, time-ordered history.
///
/// Only positivity and strictly increasing effective time are enforced; who
/// moves the valuation and how often is decided by the feed.
pub struct ValuationTracker;

impl ValuationTracker {
    /// Seed the tracker at registration
    pub fn open(env: &Env, startup_id: u64, initial_valuation: u128, at_time: u64) -> Result<(), Error> {
        if initial_valuation == 0 {
            return Err(Error::InvalidValuation);
        }

        let record = ValuationRecord {
            current_valuation: initial_valuation,
            last_effective_time: at_time,
            history_start: 0,
            history_end: 1,
        };
        Storage::set_valuation_point(
            env,
            startup_id,
            0,
            &ValuationPoint {
                valuation: initial_valuation,
                effective_time: at_time,
            },
        );
        Storage::set_valuation(env, startup_id, &record);
        Ok(())
    }

    /// Append a new valuation and make it current.
    ///
    /// # Errors
    /// - `UnknownStartup`: No tracker for this startup
    /// - `NonPositiveValuation`: `new_valuation == 0`
    /// - `NonMonotonicTime`: `at_time` not after the last recorded time
    pub fn set_valuation(
        env: &Env,
        startup_id: u64,
        new_valuation: u128,
        at_time: u64,
        history_limit: u32,
    ) -> Result<(), Error> {
        let mut record = Storage::get_valuation(env, startup_id)?;

        if new_valuation == 0 {
            return Err(Error::NonPositiveValuation);
        }

        if at_time <= record.last_effective_time {
            return Err(Error::NonMonotonicTime);
        }

        let seq = record.history_end;
        Storage::set_valuation_point(
            env,
            startup_id,
            seq,
            &ValuationPoint {
                valuation: new_valuation,
                effective_time: at_time,
            },
        );
        record.history_end = seq.checked_add(1).ok_or(Error::ArithmeticOverflow)?;

        if history_limit != KEEP_ALL_HISTORY {
            let mut pruned = 0;
            while pruned < MAX_PRUNE_PER_APPEND
                && record.history_end - record.history_start > history_limit as u64
            {
                Storage::remove_valuation_point(env, startup_id, record.history_start);
                record.history_start += 1;
                pruned += 1;
            }
        }

        let previous = record.current_valuation;
        record.current_valuation = new_valuation;
        record.last_effective_time = at_time;
        Storage::set_valuation(env, startup_id, &record);

        env.events().publish(
            (Symbol::new(env, "valuation_updated"), startup_id),
            ValuationUpdatedEvent {
                startup_id,
                previous_valuation: previous,
                new_valuation,
                effective_time: at_time,
            },
        );

        Ok(())
    }

    /// `current_valuation / total_shares`
    ///
    /// # Errors
    /// - `UnknownStartup`: No tracker for this startup
    /// - `DivisionUndefined`: `total_shares == 0`
    pub fn price_per_share(env: &Env, startup_id: u64) -> Result<u128, Error> {
        let record = Storage::get_valuation(env, startup_id)?;
        let ledger = Storage::get_share_ledger(env, startup_id)?;

        calculate_price_per_share(record.current_valuation, ledger.total_shares)
            .ok_or(Error::DivisionUndefined)
    }

    pub fn current(env: &Env, startup_id: u64) -> Result<u128, Error> {
        Ok(Storage::get_valuation(env, startup_id)?.current_valuation)
    }

    /// One page of the retained points, oldest first, plus the cursor of the
    /// next page.
    ///
    /// Only the newest `history_limit` points are visible. Older points still
    /// waiting to be pruned after the limit was lowered are skipped.
    pub fn history(
        env: &Env,
        startup_id: u64,
        history_limit: u32,
        start: u64,
        limit: u32,
    ) -> (Vec<ValuationPoint>, Option<u64>) {
        let mut points = Vec::new(env);
        let record = match Storage::get_valuation(env, startup_id) {
            Ok(record) => record,
            Err(_) => return (points, None),
        };

        let first = Self::first_visible(&record, history_limit);
        let (end, next_cursor) = match page_bounds(record.history_end - first, start, limit) {
            Some(bounds) => bounds,
            None => return (points, None),
        };

        for offset in start..end {
            if let Some(point) = Storage::get_valuation_point(env, startup_id, first + offset) {
                points.push_back(point);
            }
        }

        (points, next_cursor)
    }

    /// Number of points `history` can page through
    pub fn history_len(env: &Env, startup_id: u64, history_limit: u32) -> u64 {
        match Storage::get_valuation(env, startup_id) {
            Ok(record) => record.history_end - Self::first_visible(&record, history_limit),
            Err(_) => 0,
        }
    }

    fn first_visible(record: &ValuationRecord, history_limit: u32) -> u64 {
        if history_limit == KEEP_ALL_HISTORY {
            return record.history_start;
        }
        core::cmp::max(
            record.history_start,
            record.history_end.saturating_sub(history_limit as u64),
        )
    }
}
