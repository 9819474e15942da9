//! Temporal enrichment: Spanish day-of-week names and time-of-day buckets.

use accidentalidad_models::TimeBucket;
use chrono::{Datelike as _, NaiveDateTime, Weekday};

/// Returns the Spanish name for a weekday.
#[must_use]
pub const fn spanish_day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Lunes",
        Weekday::Tue => "Martes",
        Weekday::Wed => "Miércoles",
        Weekday::Thu => "Jueves",
        Weekday::Fri => "Viernes",
        Weekday::Sat => "Sábado",
        Weekday::Sun => "Domingo",
    }
}

/// Derives the Spanish day-of-week name and the time-of-day bucket from a
/// timestamp.
#[must_use]
pub fn enrich(timestamp: NaiveDateTime) -> (&'static str, TimeBucket) {
    use chrono::Timelike as _;
    (
        spanish_day_name(timestamp.weekday()),
        TimeBucket::from_hour(timestamp.hour()),
    )
}
