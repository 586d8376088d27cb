//! Calendar-day date classification.
//!
//! # Responsibility
//! - Normalize date-like input (text, dates, instants, missing values) to a
//!   calendar day in the reference time zone.
//! - Answer today/past/future/yesterday/this-week/range questions.
//!
//! # Invariants
//! - Time of day never affects a classification.
//! - Unparsable or missing input normalizes to `None`; every predicate is
//!   `false` for `None`. Nothing here panics or returns an error.
//! - Weeks start on Sunday.

use crate::time::clock::Clock;
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeZone};
use std::cmp::Ordering;

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Anything that can be read as a calendar day in a given time zone.
pub trait ToCalendarDay {
    fn calendar_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate>;
}

impl ToCalendarDay for str {
    fn calendar_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        parse_calendar_day(self, tz)
    }
}

impl ToCalendarDay for String {
    fn calendar_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        parse_calendar_day(self.as_str(), tz)
    }
}

impl ToCalendarDay for NaiveDate {
    fn calendar_day<Tz: TimeZone>(&self, _tz: &Tz) -> Option<NaiveDate> {
        Some(*self)
    }
}

impl<T: TimeZone> ToCalendarDay for DateTime<T> {
    fn calendar_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        Some(self.with_timezone(tz).date_naive())
    }
}

impl<T: ToCalendarDay> ToCalendarDay for Option<T> {
    fn calendar_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        self.as_ref().and_then(|value| value.calendar_day(tz))
    }
}

impl<T: ToCalendarDay + ?Sized> ToCalendarDay for &T {
    fn calendar_day<Tz: TimeZone>(&self, tz: &Tz) -> Option<NaiveDate> {
        (**self).calendar_day(tz)
    }
}

/// Parses ISO-8601 text into a calendar day in `tz`.
///
/// - Offset-bearing (RFC 3339) text is converted into `tz` first.
/// - Naive date-time text is local wall time; its date is the day.
/// - Date-only text is taken as that day.
pub fn parse_calendar_day<Tz: TimeZone>(value: &str, tz: &Tz) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(tz).date_naive());
    }
    if let Some(naive) = parse_naive_date_time(trimmed) {
        return Some(naive.date());
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Parses ISO-8601 text into a sortable timestamp.
///
/// Offset-bearing text is converted to UTC; naive text is used as-is and
/// date-only text maps to midnight.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.naive_utc());
    }
    if let Some(naive) = parse_naive_date_time(trimmed) {
        return Some(naive);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
}

fn parse_naive_date_time(value: &str) -> Option<NaiveDateTime> {
    NAIVE_DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}

/// Position of a calendar day relative to "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayRelation {
    Past,
    Today,
    Future,
}

/// Classifies date-like values against a fixed reference "now".
#[derive(Debug, Clone)]
pub struct DateClassifier<Tz: TimeZone> {
    tz: Tz,
    today: NaiveDate,
}

impl<Tz: TimeZone> DateClassifier<Tz> {
    /// Creates a classifier anchored at `now` and its time zone.
    pub fn new(now: &DateTime<Tz>) -> Self {
        Self {
            tz: now.timezone(),
            today: now.date_naive(),
        }
    }

    /// Creates a classifier anchored at the clock's current instant.
    pub fn from_clock<C>(clock: &C) -> Self
    where
        C: Clock<Tz = Tz>,
    {
        Self::new(&clock.now())
    }

    /// Reference calendar day.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Normalizes a date-like value; `None` when missing or unparsable.
    pub fn day_of<D: ToCalendarDay + ?Sized>(&self, value: &D) -> Option<NaiveDate> {
        value.calendar_day(&self.tz)
    }

    pub fn relation(&self, day: NaiveDate) -> DayRelation {
        match day.cmp(&self.today) {
            Ordering::Less => DayRelation::Past,
            Ordering::Equal => DayRelation::Today,
            Ordering::Greater => DayRelation::Future,
        }
    }

    pub fn is_today<D: ToCalendarDay + ?Sized>(&self, value: &D) -> bool {
        self.day_of(value) == Some(self.today)
    }

    pub fn is_past_date<D: ToCalendarDay + ?Sized>(&self, value: &D) -> bool {
        self.day_of(value).is_some_and(|day| day < self.today)
    }

    pub fn is_future_date<D: ToCalendarDay + ?Sized>(&self, value: &D) -> bool {
        self.day_of(value).is_some_and(|day| day > self.today)
    }

    pub fn is_yesterday<D: ToCalendarDay + ?Sized>(&self, value: &D) -> bool {
        match (self.day_of(value), self.today.pred_opt()) {
            (Some(day), Some(yesterday)) => day == yesterday,
            _ => false,
        }
    }

    /// Whether the value falls in the Sunday-start week containing today.
    pub fn is_this_week<D: ToCalendarDay + ?Sized>(&self, value: &D) -> bool {
        let Some(day) = self.day_of(value) else {
            return false;
        };
        let offset = u64::from(self.today.weekday().num_days_from_sunday());
        let Some(start) = self.today.checked_sub_days(Days::new(offset)) else {
            return false;
        };
        let Some(end) = start.checked_add_days(Days::new(6)) else {
            return false;
        };
        day >= start && day <= end
    }

    /// Whether `value` falls in `[start, start + days]` (calendar days).
    pub fn within_days<D, S>(&self, value: &D, start: &S, days: u32) -> bool
    where
        D: ToCalendarDay + ?Sized,
        S: ToCalendarDay + ?Sized,
    {
        let (Some(day), Some(start_day)) = (self.day_of(value), self.day_of(start)) else {
            return false;
        };
        let Some(end_day) = start_day.checked_add_days(Days::new(u64::from(days))) else {
            return false;
        };
        day >= start_day && day <= end_day
    }

    /// Whether `value` is after today and at most `days` days ahead.
    pub fn upcoming_within<D: ToCalendarDay + ?Sized>(&self, value: &D, days: u32) -> bool {
        self.is_future_date(value) && self.within_days(value, &self.today, days)
    }

    /// Orders two date-like values by calendar day; missing sorts first.
    pub fn compare_ignoring_time<A, B>(&self, left: &A, right: &B) -> Ordering
    where
        A: ToCalendarDay + ?Sized,
        B: ToCalendarDay + ?Sized,
    {
        match (self.day_of(left), self.day_of(right)) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(left), Some(right)) => left.cmp(&right),
        }
    }
}
