//! The in-memory selection relation between camps and people.

use std::collections::BTreeSet;

use crate::types::{CampId, PersonId, PlanEntry};

/// One camp's attendee set within the relation.
#[derive(Debug, Clone, PartialEq, Eq)]
struct CampSelection {
    camp_id: CampId,
    people: BTreeSet<PersonId>,
}

/// The many-to-many assignment of people to camps being planned.
///
/// Camp keys keep insertion order so the persisted form and the cost
/// breakdown stay display-stable; attendee sets iterate in ascending id
/// order. A camp entry never outlives its last attendee. The relation
/// lives only for the planning session; persistence is an explicit save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionStore {
    camps: Vec<CampSelection>,
    selected_people: BTreeSet<PersonId>,
}

/// Outcome of restoring a saved plan's pairings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Pairings skipped because the person is absent from the current
    /// cache, e.g. a child deleted since the plan was saved.
    pub dropped: Vec<PlanEntry>,
}

impl LoadReport {
    /// True when every pairing was restored.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }
}

impl SelectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// People currently chosen as planning subjects.
    pub const fn selected_people(&self) -> &BTreeSet<PersonId> {
        &self.selected_people
    }

    #[must_use]
    pub fn is_person_selected(&self, person: PersonId) -> bool {
        self.selected_people.contains(&person)
    }

    /// Flips a person's membership in the planning set.
    ///
    /// Deselecting also sweeps the person out of every camp entry; camp
    /// entries left without attendees disappear. Returns whether the
    /// person is selected afterwards.
    pub fn toggle_person(&mut self, person: PersonId) -> bool {
        if self.selected_people.remove(&person) {
            for camp in &mut self.camps {
                camp.people.remove(&person);
            }
            self.camps.retain(|camp| !camp.people.is_empty());
            false
        } else {
            self.selected_people.insert(person);
            true
        }
    }

    /// Flips one camp/person pairing, creating or dropping the camp
    /// entry as needed. Returns whether the pairing exists afterwards.
    pub fn toggle_pairing(&mut self, camp_id: CampId, person: PersonId) -> bool {
        if let Some(idx) = self.camps.iter().position(|c| c.camp_id == camp_id) {
            let entry = &mut self.camps[idx];
            if entry.people.remove(&person) {
                if entry.people.is_empty() {
                    self.camps.remove(idx);
                }
                false
            } else {
                entry.people.insert(person);
                true
            }
        } else {
            self.camps.push(CampSelection {
                camp_id,
                people: BTreeSet::from([person]),
            });
            true
        }
    }

    /// Attendees selected for a camp, when the camp has an entry.
    #[must_use]
    pub fn attendees(&self, camp_id: CampId) -> Option<&BTreeSet<PersonId>> {
        self.camps
            .iter()
            .find(|c| c.camp_id == camp_id)
            .map(|c| &c.people)
    }

    #[must_use]
    pub fn is_camp_selected(&self, camp_id: CampId) -> bool {
        self.camps.iter().any(|c| c.camp_id == camp_id)
    }

    /// Drops a camp's entry regardless of attendee count.
    pub fn remove_camp(&mut self, camp_id: CampId) {
        self.camps.retain(|c| c.camp_id != camp_id);
    }

    /// Empties the relation. The selected-people set stays; any "are you
    /// sure" confirmation happens upstream.
    pub fn clear(&mut self) {
        self.camps.clear();
    }

    /// True when no pairing exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.camps.is_empty()
    }

    /// Camp ids in insertion order.
    pub fn camp_ids(&self) -> impl Iterator<Item = CampId> + '_ {
        self.camps.iter().map(|c| c.camp_id)
    }

    /// Flattens the relation into persisted-form pairings: camp keys in
    /// insertion order, attendees ascending within each camp.
    #[must_use]
    pub fn to_entries(&self) -> Vec<PlanEntry> {
        self.camps
            .iter()
            .flat_map(|camp| {
                camp.people.iter().map(|&person_id| PlanEntry {
                    person_id,
                    camp_id: camp.camp_id,
                })
            })
            .collect()
    }

    /// Replaces the relation and the planning set with a saved plan's
    /// pairings.
    ///
    /// Pairings referencing a person missing from `known_people` are
    /// skipped and reported; a plan naming a since-deleted child still
    /// loads the rest. Restored people become planning subjects again.
    pub fn load_entries(
        &mut self,
        entries: Vec<PlanEntry>,
        known_people: &BTreeSet<PersonId>,
    ) -> LoadReport {
        self.camps.clear();
        self.selected_people.clear();

        let mut report = LoadReport::default();
        for entry in entries {
            if !known_people.contains(&entry.person_id) {
                tracing::warn!(
                    person_id = %entry.person_id,
                    camp_id = %entry.camp_id,
                    "dropping pairing for unknown person"
                );
                report.dropped.push(entry);
                continue;
            }

            if let Some(slot) = self.camps.iter_mut().find(|c| c.camp_id == entry.camp_id) {
                slot.people.insert(entry.person_id);
            } else {
                self.camps.push(CampSelection {
                    camp_id: entry.camp_id,
                    people: BTreeSet::from([entry.person_id]),
                });
            }
            self.selected_people.insert(entry.person_id);
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(id: i64) -> PersonId {
        PersonId::new(id)
    }

    fn cid(id: i64) -> CampId {
        CampId::new(id)
    }

    fn entry(person: i64, camp: i64) -> PlanEntry {
        PlanEntry {
            person_id: pid(person),
            camp_id: cid(camp),
        }
    }

    #[test]
    fn toggle_person_flips_membership() {
        let mut store = SelectionStore::new();
        assert!(store.toggle_person(pid(1)));
        assert!(store.is_person_selected(pid(1)));
        assert!(!store.toggle_person(pid(1)));
        assert!(!store.is_person_selected(pid(1)));
    }

    #[test]
    fn deselecting_person_sweeps_camp_entries() {
        let mut store = SelectionStore::new();
        store.toggle_person(pid(1));
        store.toggle_person(pid(2));
        store.toggle_pairing(cid(10), pid(1));
        store.toggle_pairing(cid(10), pid(2));
        store.toggle_pairing(cid(20), pid(1));

        store.toggle_person(pid(1));

        // Camp 10 keeps person 2; camp 20 lost its only attendee.
        assert_eq!(store.attendees(cid(10)).unwrap().len(), 1);
        assert!(!store.is_camp_selected(cid(20)));
    }

    #[test]
    fn toggle_pairing_twice_is_identity() {
        let mut store = SelectionStore::new();
        store.toggle_person(pid(1));
        store.toggle_pairing(cid(10), pid(1));
        let snapshot = store.clone();

        assert!(store.toggle_pairing(cid(10), pid(2)));
        assert!(!store.toggle_pairing(cid(10), pid(2)));
        assert_eq!(store, snapshot);
    }

    #[test]
    fn empty_camp_entries_never_linger() {
        let mut store = SelectionStore::new();
        store.toggle_pairing(cid(10), pid(1));
        store.toggle_pairing(cid(10), pid(1));
        assert!(store.is_empty());
        assert_eq!(store.camp_ids().count(), 0);
    }

    #[test]
    fn remove_camp_drops_whole_entry() {
        let mut store = SelectionStore::new();
        store.toggle_pairing(cid(10), pid(1));
        store.toggle_pairing(cid(10), pid(2));
        store.remove_camp(cid(10));
        assert!(store.is_empty());
    }

    #[test]
    fn clear_keeps_selected_people() {
        let mut store = SelectionStore::new();
        store.toggle_person(pid(1));
        store.toggle_pairing(cid(10), pid(1));
        store.clear();
        assert!(store.is_empty());
        assert!(store.is_person_selected(pid(1)));
    }

    #[test]
    fn entries_flatten_in_stable_order() {
        let mut store = SelectionStore::new();
        store.toggle_pairing(cid(20), pid(3));
        store.toggle_pairing(cid(10), pid(2));
        store.toggle_pairing(cid(10), pid(1));

        // Camp 20 was selected first; within camp 10 ids ascend.
        assert_eq!(
            store.to_entries(),
            vec![entry(3, 20), entry(1, 10), entry(2, 10)]
        );
    }

    #[test]
    fn persisted_form_round_trips() {
        let mut store = SelectionStore::new();
        store.toggle_pairing(cid(10), pid(1));
        store.toggle_pairing(cid(10), pid(2));
        store.toggle_pairing(cid(20), pid(1));

        let known: BTreeSet<PersonId> = [pid(1), pid(2)].into();
        let mut restored = SelectionStore::new();
        let report = restored.load_entries(store.to_entries(), &known);

        assert!(report.is_clean());
        assert_eq!(restored.to_entries(), store.to_entries());
        // Everyone referenced becomes a planning subject again.
        assert_eq!(restored.selected_people(), &known);
    }

    #[test]
    fn load_drops_unknown_people_but_keeps_the_rest() {
        let mut store = SelectionStore::new();
        let known: BTreeSet<PersonId> = [pid(1)].into();
        let report = store.load_entries(
            vec![entry(1, 10), entry(999, 10), entry(999, 20)],
            &known,
        );

        assert_eq!(report.dropped, vec![entry(999, 10), entry(999, 20)]);
        assert_eq!(store.to_entries(), vec![entry(1, 10)]);
        assert!(!store.is_camp_selected(cid(20)));
        assert!(store.is_person_selected(pid(1)));
        assert!(!store.is_person_selected(pid(999)));
    }

    #[test]
    fn load_replaces_previous_state() {
        let mut store = SelectionStore::new();
        store.toggle_person(pid(5));
        store.toggle_pairing(cid(50), pid(5));

        let known: BTreeSet<PersonId> = [pid(1)].into();
        store.load_entries(vec![entry(1, 10)], &known);

        assert!(!store.is_camp_selected(cid(50)));
        assert!(!store.is_person_selected(pid(5)));
        assert_eq!(store.to_entries(), vec![entry(1, 10)]);
    }
}
