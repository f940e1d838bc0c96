//! Planning session orchestration: camp visibility, cost breakdown, and
//! the persisted-plan round trip.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use thiserror::Error;

use crate::eligibility::{self, Eligibility};
use crate::pricing::{self, PricingError};
use crate::selection::{LoadReport, SelectionStore};
use crate::types::{Camp, CampId, Person, PersonId, PlanEntry, SavedPlan};

/// Plan persistence errors.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PlanError {
    /// Refusing to save a plan without a single pairing. Checked before
    /// anything leaves the machine.
    #[error("nothing selected: pick at least one camp first")]
    EmptySelection,
}

/// One priced line of the cost breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownLine {
    pub camp_id: CampId,
    pub camp_name: String,
    /// Attendee names in ascending person-id order.
    pub attendees: Vec<String>,
    pub cost: f64,
    pub detail: String,
    pub has_sibling_discount: bool,
    pub has_early_bird: bool,
}

/// A selected camp whose price is still to be determined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnpricedLine {
    pub camp_id: CampId,
    pub camp_name: String,
    pub attendees: Vec<String>,
}

/// A camp whose cost line could not be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingFailure {
    pub camp_id: CampId,
    pub camp_name: String,
    pub error: PricingError,
}

/// The itemized cost view, recomputed from scratch on every query.
///
/// Unpriced camps contribute nothing to `total` but are surfaced, as are
/// per-camp computation failures; one bad camp never hides the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakdown {
    pub total: f64,
    pub lines: Vec<BreakdownLine>,
    pub unpriced: Vec<UnpricedLine>,
    pub failures: Vec<PricingFailure>,
}

/// Everything needed to persist the current selection as a named plan.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanDraft {
    pub name: String,
    pub entries: Vec<PlanEntry>,
    pub total_cost: f64,
}

/// One person row of a camp's attendee picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonRow {
    pub id: PersonId,
    pub name: String,
    pub age_at_start: i32,
    /// Ineligible rows stay listed so callers can show them disabled.
    pub eligible: bool,
    pub selected: bool,
}

/// The planning engine: cached people and camps plus the live selection.
///
/// Both caches are injected snapshots, replaced wholesale on refresh so a
/// computation in flight never sees a half-updated list. The engine
/// performs no I/O; fetching and saving belong to the caller.
#[derive(Debug, Clone, Default)]
pub struct Planner {
    people: Vec<Person>,
    camps: Vec<Camp>,
    selection: SelectionStore,
}

impl Planner {
    #[must_use]
    pub fn new(people: Vec<Person>, camps: Vec<Camp>) -> Self {
        Self {
            people,
            camps,
            selection: SelectionStore::new(),
        }
    }

    /// Swaps in a refreshed people snapshot.
    pub fn replace_people(&mut self, people: Vec<Person>) {
        self.people = people;
    }

    /// Swaps in a refreshed camp snapshot.
    pub fn replace_camps(&mut self, camps: Vec<Camp>) {
        self.camps = camps;
    }

    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    #[must_use]
    pub fn camps(&self) -> &[Camp] {
        &self.camps
    }

    #[must_use]
    pub const fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    fn camp(&self, id: CampId) -> Option<&Camp> {
        self.camps.iter().find(|c| c.id == id)
    }

    fn person_name(&self, id: PersonId) -> String {
        self.people
            .iter()
            .find(|p| p.id == id)
            .map_or_else(|| "Unknown".to_string(), |p| p.name.clone())
    }

    /// Flips a person in or out of the planning set. Deselecting removes
    /// them from every camp pairing as well.
    pub fn toggle_person(&mut self, person: PersonId) -> bool {
        self.selection.toggle_person(person)
    }

    /// Flips one camp/person pairing.
    pub fn toggle_pairing(&mut self, camp: CampId, person: PersonId) -> bool {
        self.selection.toggle_pairing(camp, person)
    }

    /// Unselects a camp for all attendees at once.
    pub fn remove_camp(&mut self, camp: CampId) {
        self.selection.remove_camp(camp);
    }

    /// Empties the selection relation. Confirmation is the caller's job.
    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Camps visible for the current people selection: all of them while
    /// nobody is selected, otherwise those fitting at least one subject.
    #[must_use]
    pub fn visible_camps(&self) -> Vec<&Camp> {
        eligibility::eligible_camps(&self.camps, &self.people, self.selection.selected_people())
    }

    /// Attendee-picker rows for a camp: every currently selected person,
    /// annotated with age at the camp start, eligibility, and pairing
    /// state.
    #[must_use]
    pub fn person_rows(&self, camp: &Camp) -> Vec<PersonRow> {
        self.people
            .iter()
            .filter(|person| self.selection.is_person_selected(person.id))
            .map(|person| {
                let Eligibility {
                    age_at_start,
                    eligible,
                } = eligibility::eligibility_of(person, camp);
                PersonRow {
                    id: person.id,
                    name: person.name.clone(),
                    age_at_start,
                    eligible,
                    selected: self
                        .selection
                        .attendees(camp.id)
                        .is_some_and(|set| set.contains(&person.id)),
                }
            })
            .collect()
    }

    /// Computes the itemized cost of the current selection as of `today`.
    ///
    /// Deterministic for a given selection, camp cache, and date. Camps
    /// that vanished from the cache since selection are skipped.
    #[must_use]
    pub fn breakdown(&self, today: NaiveDate) -> Breakdown {
        let mut breakdown = Breakdown::default();

        for camp_id in self.selection.camp_ids() {
            let Some(attendee_ids) = self.selection.attendees(camp_id) else {
                continue;
            };
            let Some(camp) = self.camp(camp_id) else {
                tracing::debug!(%camp_id, "selected camp no longer cached, skipping");
                continue;
            };
            let attendees: Vec<String> = attendee_ids
                .iter()
                .map(|&id| self.person_name(id))
                .collect();

            match pricing::quote(camp, attendee_ids.len(), today) {
                Err(error) => breakdown.failures.push(PricingFailure {
                    camp_id,
                    camp_name: camp.name.clone(),
                    error,
                }),
                Ok(None) => breakdown.unpriced.push(UnpricedLine {
                    camp_id,
                    camp_name: camp.name.clone(),
                    attendees,
                }),
                Ok(Some(quote)) => {
                    breakdown.total += quote.cost;
                    breakdown.lines.push(BreakdownLine {
                        camp_id,
                        camp_name: camp.name.clone(),
                        attendees,
                        cost: quote.cost,
                        detail: quote.detail,
                        has_sibling_discount: quote.has_sibling_discount,
                        has_early_bird: quote.has_early_bird,
                    });
                }
            }
        }

        breakdown
    }

    /// Prepares the current selection for persistence.
    pub fn save_plan(
        &self,
        name: impl Into<String>,
        today: NaiveDate,
    ) -> Result<PlanDraft, PlanError> {
        if self.selection.is_empty() {
            return Err(PlanError::EmptySelection);
        }
        Ok(PlanDraft {
            name: name.into(),
            entries: self.selection.to_entries(),
            total_cost: self.breakdown(today).total,
        })
    }

    /// Restores a saved plan into the session, validating every pairing
    /// against the current people cache. Pairings naming unknown people
    /// are dropped and reported; the rest load normally.
    pub fn load_plan(&mut self, plan: &SavedPlan) -> LoadReport {
        let known: BTreeSet<PersonId> = self.people.iter().map(|p| p.id).collect();
        self.selection.load_entries(plan.entries.clone(), &known)
    }
}
