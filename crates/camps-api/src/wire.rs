//! Wire representations of the backend contract.
//!
//! The backend speaks German field names (`kosten`, `fruehbucher_bis`,
//! `freizeit_id`, ...) and day-granularity dates as strings. Everything
//! converts to the English domain types here and nowhere else; the rest
//! of the workspace never sees a wire shape.

use std::collections::BTreeMap;

use camps_core::{Camp, CampId, InvalidDate, Person, PersonId, PlanEntry, parse_date};
use serde::{Deserialize, Serialize};

/// A person as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePerson {
    pub id: i64,
    pub name: String,
    pub birthdate: String,
}

impl TryFrom<WirePerson> for Person {
    type Error = InvalidDate;

    fn try_from(wire: WirePerson) -> Result<Self, Self::Error> {
        Ok(Self {
            id: PersonId::new(wire.id),
            name: wire.name,
            birthdate: parse_date(&wire.birthdate)?,
        })
    }
}

/// A camp as the backend returns it.
#[derive(Debug, Clone, Deserialize)]
pub struct WireCamp {
    pub id: i64,
    pub name: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub alter_min: Option<i32>,
    #[serde(default)]
    pub alter_max: Option<i32>,
    #[serde(default)]
    pub kosten: Option<f64>,
    #[serde(default)]
    pub kosten_geschwister: Option<f64>,
    #[serde(default)]
    pub kosten_fruehbucher: Option<f64>,
    #[serde(default)]
    pub fruehbucher_bis: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub ort: Option<String>,
    #[serde(default)]
    pub veranstaltungsort_adresse: Option<String>,
    #[serde(default)]
    pub alter_zielgruppe: Option<String>,
    #[serde(default)]
    pub zeit: Option<String>,
    #[serde(default)]
    pub beschreibung: Option<String>,
    #[serde(default)]
    pub freie_plaetze: Option<i64>,
    #[serde(default)]
    pub anmeldeschluss: Option<String>,
    #[serde(default)]
    pub detail_url: Option<String>,
    #[serde(default)]
    pub anmelde_url: Option<String>,
}

impl TryFrom<WireCamp> for Camp {
    type Error = InvalidDate;

    fn try_from(wire: WireCamp) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CampId::new(wire.id),
            name: wire.name,
            start_date: parse_date(&wire.start_date)?,
            end_date: parse_date(&wire.end_date)?,
            age_min: wire.alter_min,
            age_max: wire.alter_max,
            base_price: wire.kosten,
            sibling_price: wire.kosten_geschwister,
            early_bird_price: wire.kosten_fruehbucher,
            early_bird_deadline: wire.fruehbucher_bis.as_deref().map(parse_date).transpose()?,
            source: wire.source,
            location: wire.ort,
            address: wire.veranstaltungsort_adresse,
            age_display: wire.alter_zielgruppe,
            time_display: wire.zeit,
            description: wire.beschreibung,
            spots: wire.freie_plaetze,
            registration_deadline: wire.anmeldeschluss,
            detail_url: wire.detail_url,
            signup_url: wire.anmelde_url,
        })
    }
}

/// One camp/person pairing on the wire. Camps are "Freizeiten" there.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WirePlanEntry {
    pub person_id: i64,
    pub freizeit_id: i64,
}

impl From<WirePlanEntry> for PlanEntry {
    fn from(wire: WirePlanEntry) -> Self {
        Self {
            person_id: PersonId::new(wire.person_id),
            camp_id: CampId::new(wire.freizeit_id),
        }
    }
}

impl From<PlanEntry> for WirePlanEntry {
    fn from(entry: PlanEntry) -> Self {
        Self {
            person_id: entry.person_id.value(),
            freizeit_id: entry.camp_id.value(),
        }
    }
}

/// A saved plan's pairing list, in either shape the backend returns.
///
/// Plans written through different backend paths come back as either a
/// plain sequence of pairings or a keyed map of them. Both normalize to
/// an ordered sequence; map keys sort, so normalization is
/// deterministic.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WireSelections {
    Seq(Vec<WirePlanEntry>),
    Map(BTreeMap<String, WirePlanEntry>),
}

impl WireSelections {
    /// Normalizes to an ordered sequence of domain pairings.
    #[must_use]
    pub fn into_entries(self) -> Vec<PlanEntry> {
        match self {
            Self::Seq(entries) => entries.into_iter().map(PlanEntry::from).collect(),
            Self::Map(map) => map.into_values().map(PlanEntry::from).collect(),
        }
    }
}

impl Default for WireSelections {
    fn default() -> Self {
        Self::Seq(Vec::new())
    }
}

/// A saved plan as the backend returns it.
///
/// `created_at` is epoch seconds; `selections` and `total_cost` may be
/// absent on plans saved before those fields existed.
#[derive(Debug, Clone, Deserialize)]
pub struct WireSavedPlan {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub selections: Option<WireSelections>,
    #[serde(default)]
    pub total_cost: Option<f64>,
    pub created_at: i64,
}
