//! Age-eligibility rules for camps.

use std::collections::BTreeSet;

use crate::age::age_at;
use crate::types::{Camp, Person, PersonId};

/// One person's standing against a camp's age window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Eligibility {
    /// Age in whole years at the camp's start date.
    pub age_at_start: i32,
    pub eligible: bool,
}

/// Evaluates a person against a camp's age window at the camp's start.
///
/// Camps without any age bound accept everyone. Bounds are inclusive and
/// each applies only when present.
#[must_use]
pub fn eligibility_of(person: &Person, camp: &Camp) -> Eligibility {
    let age_at_start = age_at(person.birthdate, camp.start_date);
    let above_min = camp.age_min.is_none_or(|min| age_at_start >= min);
    let below_max = camp.age_max.is_none_or(|max| age_at_start <= max);
    Eligibility {
        age_at_start,
        eligible: above_min && below_max,
    }
}

/// Whether `person` may attend `camp`.
#[must_use]
pub fn is_eligible(person: &Person, camp: &Camp) -> bool {
    eligibility_of(person, camp).eligible
}

/// Camps visible for the current people selection.
///
/// With nobody selected every camp is shown. Otherwise a camp stays
/// visible when at least one selected person is eligible (a union, not an
/// intersection), so a family with children of different ages still sees
/// a camp that fits only one of them.
#[must_use]
pub fn eligible_camps<'a>(
    camps: &'a [Camp],
    people: &[Person],
    selected: &BTreeSet<PersonId>,
) -> Vec<&'a Camp> {
    if selected.is_empty() {
        return camps.iter().collect();
    }

    let chosen: Vec<&Person> = people
        .iter()
        .filter(|person| selected.contains(&person.id))
        .collect();

    camps
        .iter()
        .filter(|camp| chosen.iter().any(|person| is_eligible(person, camp)))
        .collect()
}
