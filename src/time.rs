//! Monotonic clock abstraction used to time the display phase.
//!
//! The engine never reads a global timer. Instead it is handed a
//! [`TimeSource`] so that firmware can plug in a hardware timer and tests can
//! drive a fake clock by hand.

/// Source of monotonic time instants.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Millisecond-resolution duration.
pub trait TimeDuration: Copy + PartialEq + PartialOrd {
    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;
}

/// A point in time produced by a [`TimeSource`].
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    ///
    /// Implementations backed by wrapping hardware counters should use
    /// wrapping subtraction so the display timer survives counter rollover.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// Returns true once at least `millis` have passed between `since` and `now`.
#[inline]
pub fn has_elapsed<I: TimeInstant>(now: I, since: I, millis: u64) -> bool {
    now.duration_since(since).as_millis() >= millis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
    struct Ms(u64);

    impl TimeDuration for Ms {
        fn as_millis(&self) -> u64 {
            self.0
        }
    }

    #[derive(Debug, Clone, Copy)]
    struct Tick(u32);

    impl TimeInstant for Tick {
        type Duration = Ms;

        fn duration_since(&self, earlier: Self) -> Ms {
            Ms(self.0.wrapping_sub(earlier.0) as u64)
        }
    }

    #[test]
    fn has_elapsed_is_inclusive() {
        assert!(!has_elapsed(Tick(3999), Tick(0), 4000));
        assert!(has_elapsed(Tick(4000), Tick(0), 4000));
        assert!(has_elapsed(Tick(4001), Tick(0), 4000));
    }

    #[test]
    fn has_elapsed_survives_counter_wrap() {
        let start = Tick(u32::MAX - 999);
        assert!(!has_elapsed(Tick(2999), start, 4000));
        assert!(has_elapsed(Tick(3000), start, 4000));
    }
}
