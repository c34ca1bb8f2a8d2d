use crate::models::{History, Task};
use crate::progress::{percent_for, qualifies};
use crate::store::date_key;
use chrono::{Duration, NaiveDate};

/// Upper bound on how far back a streak walk looks, roughly ten years.
pub const MAX_LOOKBACK_DAYS: u32 = 3660;

/// Counts consecutive qualifying days ending at `today`.
///
/// Today never breaks the chain: with no record, or a record below the
/// threshold, the walk just moves on to yesterday. Any earlier day that is
/// missing or below the threshold ends it.
pub fn compute_streak(tasks: &[Task], history: &History, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut date = today;

    for _ in 0..MAX_LOOKBACK_DAYS {
        let is_today = date == today;
        match history.get(&date_key(date)) {
            None if !is_today => break,
            None => {}
            Some(record) => {
                if qualifies(percent_for(tasks, record)) {
                    streak += 1;
                } else if !is_today {
                    break;
                }
            }
        }

        date = match date.checked_sub_signed(Duration::days(1)) {
            Some(previous) => previous,
            None => break,
        };
    }

    streak
}
