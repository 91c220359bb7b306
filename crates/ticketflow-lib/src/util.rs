//! ID allocation and timestamp helpers.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Result, TicketError};
use crate::model::TicketId;

/// Allocate a timestamp-derived ticket ID.
///
/// The ID is the current time in milliseconds, bumped past both the last
/// allocated ID and every ID in `existing` so it stays unique and monotonic.
///
/// # Errors
///
/// Returns `IdSpaceExhausted` when the highest known ID is `i64::MAX`.
pub fn allocate_id<'a, I>(
    now: DateTime<Utc>,
    last_allocated: TicketId,
    existing: I,
) -> Result<TicketId>
where
    I: IntoIterator<Item = &'a TicketId>,
{
    let floor = existing
        .into_iter()
        .copied()
        .max()
        .unwrap_or(0)
        .max(last_allocated);
    let next = floor
        .checked_add(1)
        .ok_or(TicketError::IdSpaceExhausted { last: floor })?;
    Ok(now.timestamp_millis().max(next))
}

/// A mutation timestamp strictly later than `previous`.
///
/// Two mutations inside the same clock tick still produce increasing values.
#[must_use]
pub fn next_timestamp(now: DateTime<Utc>, previous: DateTime<Utc>) -> DateTime<Utc> {
    if now > previous {
        now
    } else {
        previous + Duration::milliseconds(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(ms).unwrap()
    }

    #[test]
    fn id_uses_clock_when_ahead() {
        assert_eq!(allocate_id(at(5_000), 0, &[1, 2]).unwrap(), 5_000);
    }

    #[test]
    fn id_bumps_past_existing_and_last() {
        assert_eq!(allocate_id(at(5_000), 0, &[7_000]).unwrap(), 7_001);
        assert_eq!(allocate_id(at(5_000), 9_000, &[7_000]).unwrap(), 9_001);
        assert_eq!(allocate_id(at(5_000), 5_000, &[]).unwrap(), 5_001);
    }

    #[test]
    fn id_at_max_is_exhausted() {
        assert!(matches!(
            allocate_id(at(5_000), 0, &[i64::MAX]),
            Err(TicketError::IdSpaceExhausted { last: i64::MAX })
        ));
        assert!(matches!(
            allocate_id(at(5_000), i64::MAX, &[]),
            Err(TicketError::IdSpaceExhausted { .. })
        ));
    }

    #[test]
    fn timestamp_strictly_advances() {
        let t = at(1_000);
        assert_eq!(next_timestamp(at(2_000), t), at(2_000));
        assert_eq!(next_timestamp(t, t), at(1_001));
        assert_eq!(next_timestamp(at(500), t), at(1_001));
    }
}
