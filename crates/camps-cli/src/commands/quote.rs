//! Quote command: price an ad-hoc selection of camp/person pairings.
//!
//! Builds a planning session from the given pairings, prints the
//! itemized breakdown, and optionally saves the selection as a named
//! plan.

use std::fmt::Write;

use anyhow::Result;
use camps_api::{CampFilter, Client};
use camps_core::{Breakdown, CampId, PersonId, Planner};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// Applies `(camp_id, person_id)` pairings to a fresh session.
///
/// Pairings naming a person or camp absent from the caches are skipped
/// with a warning; the rest still price. People named by a pairing are
/// selected as planning subjects first, so the session keeps the same
/// shape an interactive one would have.
pub fn apply_pairs(planner: &mut Planner, pairs: &[(i64, i64)]) {
    for &(camp_id, person_id) in pairs {
        let camp = CampId::new(camp_id);
        let person = PersonId::new(person_id);
        if !planner.people().iter().any(|p| p.id == person) {
            tracing::warn!(%person, "skipping pairing for unknown person");
            continue;
        }
        if !planner.camps().iter().any(|c| c.id == camp) {
            tracing::warn!(%camp, "skipping pairing for unknown camp");
            continue;
        }
        if !planner.selection().is_person_selected(person) {
            planner.toggle_person(person);
        }
        planner.toggle_pairing(camp, person);
    }
}

/// Formats a breakdown for human-readable output.
pub fn format_breakdown(breakdown: &Breakdown) -> String {
    let mut output = String::new();

    if breakdown.lines.is_empty()
        && breakdown.unpriced.is_empty()
        && breakdown.failures.is_empty()
    {
        writeln!(output, "No camps selected.").unwrap();
        return output;
    }

    for line in &breakdown.lines {
        writeln!(output, "{} ({})", line.camp_name, line.attendees.join(", ")).unwrap();
        writeln!(output, "  {} = {:.2} EUR", line.detail, line.cost).unwrap();
    }

    for line in &breakdown.unpriced {
        writeln!(
            output,
            "Price TBD: {} ({})",
            line.camp_name,
            line.attendees.join(", ")
        )
        .unwrap();
    }

    for failure in &breakdown.failures {
        writeln!(output, "Cannot price {}: {}", failure.camp_name, failure.error).unwrap();
    }

    writeln!(output).unwrap();
    writeln!(output, "Total: {:.2} EUR", breakdown.total).unwrap();
    output
}

// ========== JSON Output ==========

#[derive(Debug, Serialize)]
struct JsonLine {
    camp_id: i64,
    camp: String,
    attendees: Vec<String>,
    cost: f64,
    detail: String,
    sibling_discount: bool,
    early_bird: bool,
}

#[derive(Debug, Serialize)]
struct JsonUnpriced {
    camp_id: i64,
    camp: String,
    attendees: Vec<String>,
}

#[derive(Debug, Serialize)]
struct JsonFailure {
    camp_id: i64,
    camp: String,
    error: String,
}

#[derive(Debug, Serialize)]
struct JsonBreakdown {
    total: f64,
    lines: Vec<JsonLine>,
    unpriced: Vec<JsonUnpriced>,
    failures: Vec<JsonFailure>,
}

/// Formats a breakdown as JSON.
pub fn format_breakdown_json(breakdown: &Breakdown) -> Result<String> {
    let json = JsonBreakdown {
        total: breakdown.total,
        lines: breakdown
            .lines
            .iter()
            .map(|line| JsonLine {
                camp_id: line.camp_id.value(),
                camp: line.camp_name.clone(),
                attendees: line.attendees.clone(),
                cost: line.cost,
                detail: line.detail.clone(),
                sibling_discount: line.has_sibling_discount,
                early_bird: line.has_early_bird,
            })
            .collect(),
        unpriced: breakdown
            .unpriced
            .iter()
            .map(|line| JsonUnpriced {
                camp_id: line.camp_id.value(),
                camp: line.camp_name.clone(),
                attendees: line.attendees.clone(),
            })
            .collect(),
        failures: breakdown
            .failures
            .iter()
            .map(|failure| JsonFailure {
                camp_id: failure.camp_id.value(),
                camp: failure.camp_name.clone(),
                error: failure.error.to_string(),
            })
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Runs the quote command.
pub async fn run(
    client: &Client,
    pairs: &[(i64, i64)],
    on: Option<NaiveDate>,
    json: bool,
    save: Option<&str>,
) -> Result<()> {
    let people = client.people().await?;
    let camps = client.camps(CampFilter::default()).await?;

    let mut planner = Planner::new(people, camps);
    apply_pairs(&mut planner, pairs);

    let today = on.unwrap_or_else(|| Local::now().date_naive());
    let breakdown = planner.breakdown(today);

    if json {
        println!("{}", format_breakdown_json(&breakdown)?);
    } else {
        print!("{}", format_breakdown(&breakdown));
    }

    if let Some(name) = save {
        let draft = planner.save_plan(name, today)?;
        let plan = client.save_plan(&draft).await?;
        println!("Saved plan {:?} with id {}", plan.name, plan.id);
    }

    Ok(())
}
