//! Core type definitions.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A calendar-date string failed to parse.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("invalid date: {value:?}")]
pub struct InvalidDate {
    /// The offending input, verbatim.
    pub value: String,
}

/// Parses a backend calendar date.
///
/// Accepts `YYYY-MM-DD`, tolerating a trailing time component
/// (`2024-07-01T00:00:00Z`) since some endpoints emit full timestamps
/// for day-granularity fields.
pub fn parse_date(value: &str) -> Result<NaiveDate, InvalidDate> {
    let day_part = value.split('T').next().unwrap_or(value);
    NaiveDate::parse_from_str(day_part, "%Y-%m-%d").map_err(|_| InvalidDate {
        value: value.to_string(),
    })
}

/// Generates an integer ID newtype with common trait implementations.
///
/// IDs are assigned by the backend and never minted locally, so there is
/// nothing to validate beyond the integer itself.
macro_rules! define_int_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw backend identifier.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_int_id!(
    /// Identifier of a registered person.
    PersonId
);

define_int_id!(
    /// Identifier of a camp.
    CampId
);

define_int_id!(
    /// Identifier of a saved plan.
    PlanId
);

/// A registered child the guardian plans for.
///
/// Owned by the backend; the engine holds a read-only cached copy and
/// reacts to refreshed snapshots, never editing a person itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub birthdate: NaiveDate,
}

/// A scheduled, priced activity with an optional age-eligibility window.
///
/// Owned by the backend; cached read-only for the session. Fields beyond
/// dates, ages, and prices are display metadata passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub id: CampId,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Minimum attendee age at the camp's start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_min: Option<i32>,

    /// Maximum attendee age at the camp's start date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_max: Option<i32>,

    /// Regular per-attendee price. `None` means the price is still to be
    /// determined; such a camp can be selected but not quoted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_price: Option<f64>,

    /// Price each additional sibling pays when several attend together.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sibling_price: Option<f64>,

    /// Discounted price available until [`Camp::early_bird_deadline`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_bird_price: Option<f64>,

    /// Last day (inclusive) the early-bird price applies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub early_bird_deadline: Option<NaiveDate>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// The organizer's age-range display text, e.g. "8-12 Jahre".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Remaining places, when the organizer publishes them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spots: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registration_deadline: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signup_url: Option<String>,
}

/// One flattened camp/person pairing of a saved plan.
///
/// A camp with three attendees persists as three pairings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub person_id: PersonId,
    pub camp_id: CampId,
}

/// A named, persisted snapshot of a selection plus its computed total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedPlan {
    pub id: PlanId,
    pub name: String,
    pub entries: Vec<PlanEntry>,
    pub total_cost: f64,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
impl Camp {
    /// Minimal five-day camp for tests: no bounds, prices, or metadata.
    pub(crate) fn bare(id: i64, start_date: NaiveDate) -> Self {
        Self {
            id: CampId::new(id),
            name: format!("camp-{id}"),
            start_date,
            end_date: start_date + chrono::Days::new(4),
            age_min: None,
            age_max: None,
            base_price: None,
            sibling_price: None,
            early_bird_price: None,
            early_bird_deadline: None,
            source: None,
            location: None,
            address: None,
            age_display: None,
            time_display: None,
            description: None,
            spots: None,
            registration_deadline: None,
            detail_url: None,
            signup_url: None,
        }
    }
}
