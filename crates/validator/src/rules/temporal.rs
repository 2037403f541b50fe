//! Date rules: `date_in_future`, `date_in_past`
//!
//! Values are compared against the current UTC time when the rule runs.
//! Naive dates and times are taken as UTC; a bare date means midnight.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

use crate::chain::{FailureTemplate, RuleChain};

/// Property types that denote a point in time.
pub trait Temporal {
    /// The instant in UTC, or `None` when the value is absent.
    fn instant(&self) -> Option<DateTime<Utc>>;
}

impl<Tz: TimeZone> Temporal for DateTime<Tz> {
    fn instant(&self) -> Option<DateTime<Utc>> {
        Some(self.with_timezone(&Utc))
    }
}

impl Temporal for NaiveDateTime {
    fn instant(&self) -> Option<DateTime<Utc>> {
        Some(self.and_utc())
    }
}

impl Temporal for NaiveDate {
    fn instant(&self) -> Option<DateTime<Utc>> {
        Some(self.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl<D: Temporal + ?Sized> Temporal for &D {
    fn instant(&self) -> Option<DateTime<Utc>> {
        (**self).instant()
    }
}

impl<D: Temporal> Temporal for Option<D> {
    fn instant(&self) -> Option<DateTime<Utc>> {
        self.as_ref().and_then(Temporal::instant)
    }
}

impl<T: ?Sized, P: Temporal + ?Sized> RuleChain<T, P> {
    /// Fails unless the value is strictly after now. Absent values fail.
    /// Code `FutureDate`.
    pub fn date_in_future(&mut self) -> &mut Self {
        let message = format!("'{}' must be a date in the future.", self.property());
        self.push_predicate(
            "date_in_future",
            FailureTemplate::with_message("FutureDate", message),
            |value: &P| value.instant().is_some_and(|instant| instant > Utc::now()),
        )
    }

    /// Fails unless the value is strictly before now. Absent values fail.
    /// Code `PastDate`.
    pub fn date_in_past(&mut self) -> &mut Self {
        let message = format!("'{}' must be a date in the past.", self.property());
        self.push_predicate(
            "date_in_past",
            FailureTemplate::with_message("PastDate", message),
            |value: &P| value.instant().is_some_and(|instant| instant < Utc::now()),
        )
    }
}
