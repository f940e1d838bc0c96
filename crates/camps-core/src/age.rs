//! Age computation at a reference date.

use chrono::{Datelike, NaiveDate};

/// Computes a person's age in whole years at `reference`.
///
/// The calendar-year difference is decremented by one when the reference
/// month/day falls before the birthday within the reference year: exact
/// elapsed years, not a truncated year difference. Negative when the
/// reference precedes the birthdate.
#[must_use]
pub fn age_at(birthdate: NaiveDate, reference: NaiveDate) -> i32 {
    let mut age = reference.year() - birthdate.year();
    if (reference.month(), reference.day()) < (birthdate.month(), birthdate.day()) {
        age -= 1;
    }
    age
}
