//! # Identity & Time
//!
//! Record ids and "now" are inputs to every state transition, never
//! ambient globals. The session wires in [`TimestampIds`] and
//! [`SystemClock`]; tests use [`SequentialIds`] and [`FixedClock`].
//!
//! ```text
//!   StoreState::apply(command, &mut Context)
//!                                 │
//!                  ┌──────────────┴──────────────┐
//!                  │                             │
//!        &mut dyn IdGenerator              &dyn Clock
//!        ├── SequentialIds (1, 2, 3…)      ├── SystemClock
//!        └── TimestampIds (epoch ms)       └── FixedClock
//! ```

use chrono::{DateTime, Local, NaiveDate, NaiveTime, TimeZone, Utc};

// =============================================================================
// Id Generation
// =============================================================================

/// Source of fresh record ids.
pub trait IdGenerator {
    /// Returns an id never handed out before by this generator.
    fn next_id(&mut self) -> u64;
}

/// Deterministic ids counting up from 1.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    pub fn starting_at(first: u64) -> Self {
        SequentialIds { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

/// Ids taken from the wall clock in epoch milliseconds.
///
/// Two ids requested within the same millisecond would collide, so each id
/// is at least one greater than the previous.
#[derive(Debug, Clone, Default)]
pub struct TimestampIds {
    last: u64,
}

impl TimestampIds {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_after(&mut self, millis: u64) -> u64 {
        let id = millis.max(self.last + 1);
        self.last = id;
        id
    }
}

impl IdGenerator for TimestampIds {
    fn next_id(&mut self) -> u64 {
        let millis = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.next_after(millis)
    }
}

// =============================================================================
// Clock
// =============================================================================

pub trait Clock {
    /// Current instant, used for timestamps.
    fn now(&self) -> DateTime<Utc>;

    /// Current calendar date, used for expiry and purchase dates.
    fn today(&self) -> NaiveDate;

    /// The date `at` falls on in this clock's calendar.
    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.date_naive()
    }
}

/// The machine clock. "Today" follows the local calendar, since that is
/// the calendar printed on the packets.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn date_of(&self, at: DateTime<Utc>) -> NaiveDate {
        at.with_timezone(&Local).date_naive()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    now: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        FixedClock { now }
    }

    /// Midnight UTC at the start of `date`.
    pub fn on(date: NaiveDate) -> Self {
        FixedClock {
            now: Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)),
        }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }
}

// =============================================================================
// Context
// =============================================================================

/// Everything a transition needs besides the state and the command.
pub struct Context<'a> {
    ids: &'a mut dyn IdGenerator,
    clock: &'a dyn Clock,
}

impl<'a> Context<'a> {
    pub fn new(ids: &'a mut dyn IdGenerator, clock: &'a dyn Clock) -> Self {
        Context { ids, clock }
    }

    pub fn next_id(&mut self) -> u64 {
        self.ids.next_id()
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let mut ids = SequentialIds::new();
        assert_eq!(ids.next_id(), 1);
        assert_eq!(ids.next_id(), 2);

        let mut ids = SequentialIds::starting_at(100);
        assert_eq!(ids.next_id(), 100);
    }

    #[test]
    fn test_timestamp_ids_strictly_increase_within_a_millisecond() {
        let mut ids = TimestampIds::new();
        assert_eq!(ids.next_after(1_700_000_000_000), 1_700_000_000_000);
        assert_eq!(ids.next_after(1_700_000_000_000), 1_700_000_000_001);
        assert_eq!(ids.next_after(1_699_999_999_999), 1_700_000_000_002);
        assert_eq!(ids.next_after(1_800_000_000_000), 1_800_000_000_000);
    }

    #[test]
    fn test_timestamp_ids_from_system_clock() {
        let mut ids = TimestampIds::new();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
    }

    #[test]
    fn test_fixed_clock() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let clock = FixedClock::on(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now().date_naive(), date);
    }

    #[test]
    fn test_context_delegates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let clock = FixedClock::on(date);
        let mut ids = SequentialIds::starting_at(7);
        let mut ctx = Context::new(&mut ids, &clock);
        assert_eq!(ctx.next_id(), 7);
        assert_eq!(ctx.next_id(), 8);
        assert_eq!(ctx.today(), date);
    }
}
