use chrono::{DateTime, Utc};

use super::transaction::TransactionId;

/// Hands out transaction ids derived from the creation time in milliseconds.
///
/// Two adds inside the same millisecond (or a clock stepping backwards) would
/// collide on a plain timestamp, so the generator never returns a value at or
/// below the last one it issued.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: TransactionId,
}

impl IdGenerator {
    /// Starts after `last`, usually the largest id already in the ledger.
    pub fn seeded(last: TransactionId) -> Self {
        Self { last }
    }

    pub fn next(&mut self, now: DateTime<Utc>) -> TransactionId {
        let millis = TransactionId::try_from(now.timestamp_millis()).unwrap_or(0);
        let id = millis.max(self.last.saturating_add(1));
        self.last = id;
        id
    }

    pub fn last(&self) -> TransactionId {
        self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn uses_clock_millis_when_ahead() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next(now), now.timestamp_millis() as u64);
    }

    #[test]
    fn same_instant_yields_increasing_ids() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
        let mut ids = IdGenerator::default();
        let first = ids.next(now);
        let second = ids.next(now);
        let third = ids.next(now);
        assert!(first < second && second < third);
    }

    #[test]
    fn seeded_generator_skips_past_loaded_ids() {
        let past = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let mut ids = IdGenerator::seeded(u64::MAX - 1);
        assert_eq!(ids.next(past), u64::MAX);
        assert_eq!(ids.last(), u64::MAX);
    }
}
