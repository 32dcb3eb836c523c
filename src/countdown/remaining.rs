//! Time-remaining decomposition

use std::fmt;

use serde::{Deserialize, Serialize};

pub const MS_PER_MINUTE: i64 = 60_000;
pub const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
pub const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Remaining time until a target, broken into whole days, hours and minutes.
///
/// Seconds are truncated. A target at or before `now` yields all zeroes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountdownState {
    pub days: u64,
    pub hours: u8,
    pub minutes: u8,
}

impl CountdownState {
    /// The all-zero state shown once a target has passed
    pub const ZERO: Self = Self { days: 0, hours: 0, minutes: 0 };

    /// Decompose `max(0, target_ms - now_ms)` by floor division
    pub fn between(target_ms: i64, now_ms: i64) -> Self {
        let diff = target_ms.saturating_sub(now_ms).max(0);

        Self {
            days: (diff / MS_PER_DAY) as u64,
            hours: ((diff % MS_PER_DAY) / MS_PER_HOUR) as u8,
            minutes: ((diff % MS_PER_HOUR) / MS_PER_MINUTE) as u8,
        }
    }

    /// Check if nothing is left on the display
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Milliseconds covered by the displayed fields
    pub fn as_millis(&self) -> i64 {
        self.days as i64 * MS_PER_DAY
            + self.hours as i64 * MS_PER_HOUR
            + self.minutes as i64 * MS_PER_MINUTE
    }
}

impl fmt::Display for CountdownState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h {}m", self.days, self.hours, self.minutes)
    }
}

/// One published sample of a running countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownSnapshot {
    pub remaining: CountdownState,
    pub target_ms: i64,
    pub sampled_at_ms: i64,
    /// The sample was taken at or after the target
    pub expired: bool,
}

impl CountdownSnapshot {
    pub fn sample(target_ms: i64, now_ms: i64) -> Self {
        Self {
            remaining: CountdownState::between(target_ms, now_ms),
            target_ms,
            sampled_at_ms: now_ms,
            expired: now_ms >= target_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn seven_days_thirty_three_minutes() {
        let target = NOW + 7 * MS_PER_DAY + 33 * MS_PER_MINUTE;
        let state = CountdownState::between(target, NOW);
        assert_eq!(state, CountdownState { days: 7, hours: 0, minutes: 33 });
        assert_eq!(state.to_string(), "7d 0h 33m");
    }

    #[test]
    fn zero_difference_is_zero() {
        assert_eq!(CountdownState::between(NOW, NOW), CountdownState::ZERO);
    }

    #[test]
    fn sub_minute_remainder_is_truncated() {
        let target = NOW + 23 * MS_PER_HOUR + 59 * MS_PER_MINUTE + 59_000;
        let state = CountdownState::between(target, NOW);
        assert_eq!(state, CountdownState { days: 0, hours: 23, minutes: 59 });
    }

    #[test]
    fn past_target_clamps_to_zero() {
        let state = CountdownState::between(NOW - 1000, NOW);
        assert!(state.is_zero());
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        assert!(CountdownState::between(i64::MIN, i64::MAX).is_zero());
        let far = CountdownState::between(i64::MAX, i64::MIN);
        assert_eq!(far.days, (i64::MAX / MS_PER_DAY) as u64);
    }

    #[test]
    fn snapshot_flags_expiry_only_at_or_after_target() {
        let pending = CountdownSnapshot::sample(NOW + 30_000, NOW);
        assert!(pending.remaining.is_zero());
        assert!(!pending.expired);

        let reached = CountdownSnapshot::sample(NOW, NOW);
        assert!(reached.expired);
    }

    proptest! {
        #[test]
        fn prop_floor_decomposition(now in 0i64..4_000_000_000_000, diff in 1i64..(400 * MS_PER_DAY)) {
            let state = CountdownState::between(now + diff, now);
            prop_assert!(state.hours < 24);
            prop_assert!(state.minutes < 60);
            prop_assert!(state.as_millis() <= diff);
            prop_assert!(state.as_millis() + MS_PER_MINUTE > diff);
        }

        #[test]
        fn prop_past_or_present_target_is_zero(target in any::<i64>(), ahead in 0i64..i64::MAX) {
            let now = target.saturating_add(ahead);
            prop_assert_eq!(CountdownState::between(target, now), CountdownState::ZERO);
        }

        #[test]
        fn prop_decomposition_is_idempotent(target in any::<i64>(), now in any::<i64>()) {
            prop_assert_eq!(
                CountdownState::between(target, now),
                CountdownState::between(target, now)
            );
        }
    }
}
