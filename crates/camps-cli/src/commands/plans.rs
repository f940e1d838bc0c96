//! Saved-plans commands: list, show (with recomputed breakdown), delete.

use std::fmt::Write;

use anyhow::Result;
use camps_api::{CampFilter, Client, PlanPatch};
use camps_core::{PlanId, Planner, SavedPlan};
use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::quote::format_breakdown;

/// One row of the saved-plans listing.
#[derive(Debug, Clone, Serialize)]
pub struct PlanListEntry {
    pub id: i64,
    pub name: String,
    pub created: String,
    pub pairings: usize,
    pub total_cost: f64,
}

/// Annotates saved plans for display.
pub fn entries_for_display(plans: &[SavedPlan]) -> Vec<PlanListEntry> {
    plans
        .iter()
        .map(|plan| PlanListEntry {
            id: plan.id.value(),
            name: plan.name.clone(),
            created: plan.created_at.format("%Y-%m-%d").to_string(),
            pairings: plan.entries.len(),
            total_cost: plan.total_cost,
        })
        .collect()
}

/// Formats the saved-plans listing for human-readable output.
pub fn format_plans(entries: &[PlanListEntry]) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        writeln!(output, "No saved plans yet.").unwrap();
        writeln!(
            output,
            "Hint: price a selection with 'camps quote' and add --save <name>."
        )
        .unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<6}  {:<24}  {:<10}  {:>8}  {:>12}",
        "ID", "Name", "Created", "Pairings", "Total (EUR)"
    )
    .unwrap();
    writeln!(
        output,
        "──────  ────────────────────────  ──────────  ────────  ────────────"
    )
    .unwrap();
    for entry in entries {
        writeln!(
            output,
            "{:<6}  {:<24}  {:<10}  {:>8}  {:>12.2}",
            entry.id, entry.name, entry.created, entry.pairings, entry.total_cost
        )
        .unwrap();
    }

    output
}

/// Runs `camps plans list`.
pub async fn list(client: &Client, json: bool) -> Result<()> {
    let plans = client.plans().await?;
    let entries = entries_for_display(&plans);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_plans(&entries));
    }
    Ok(())
}

/// Runs `camps plans show`: loads the plan into a fresh session against
/// the current people and camp caches, reports pairings that no longer
/// resolve, and prints a freshly computed breakdown next to the total
/// stored at save time.
pub async fn show(client: &Client, id: i64, on: Option<NaiveDate>) -> Result<()> {
    let plans = client.plans().await?;
    let plan = plans
        .into_iter()
        .find(|plan| plan.id == PlanId::new(id))
        .ok_or_else(|| anyhow::anyhow!("no saved plan with id {id}"))?;

    let people = client.people().await?;
    let camps = client.camps(CampFilter::default()).await?;

    let mut planner = Planner::new(people, camps);
    let report = planner.load_plan(&plan);
    for entry in &report.dropped {
        eprintln!(
            "warning: person {} is no longer registered; dropping their pairing for camp {}",
            entry.person_id, entry.camp_id
        );
    }

    let today = on.unwrap_or_else(|| Local::now().date_naive());
    let breakdown = planner.breakdown(today);

    println!("{} (saved total: {:.2} EUR)", plan.name, plan.total_cost);
    println!();
    print!("{}", format_breakdown(&breakdown));
    Ok(())
}

/// Runs `camps plans rename`.
pub async fn rename(client: &Client, id: i64, name: &str) -> Result<()> {
    let patch = PlanPatch {
        name: Some(name.to_string()),
        ..PlanPatch::default()
    };
    let plan = client.update_plan(PlanId::new(id), &patch).await?;
    println!("Renamed plan {} to {:?}", plan.id, plan.name);
    Ok(())
}

/// Runs `camps plans rm`.
pub async fn remove(client: &Client, id: i64) -> Result<()> {
    client.delete_plan(PlanId::new(id)).await?;
    println!("Deleted plan {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use camps_core::{CampId, PersonId, PlanEntry};
    use chrono::TimeZone as _;

    use super::*;

    fn plan(id: i64, name: &str, pairings: usize, total: f64) -> SavedPlan {
        SavedPlan {
            id: PlanId::new(id),
            name: name.to_string(),
            entries: (0..pairings)
                .map(|i| PlanEntry {
                    person_id: PersonId::new(i64::try_from(i).unwrap() + 1),
                    camp_id: CampId::new(10),
                })
                .collect(),
            total_cost: total,
            created_at: chrono::Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
        }
    }

    #[test]
    fn entries_summarize_plans() {
        let entries = entries_for_display(&[plan(3, "Summer", 2, 180.0)]);
        assert_eq!(entries[0].id, 3);
        assert_eq!(entries[0].created, "2024-05-01");
        assert_eq!(entries[0].pairings, 2);
    }

    #[test]
    fn format_plans_lists_rows() {
        let output = format_plans(&entries_for_display(&[plan(3, "Summer", 2, 180.0)]));
        assert!(output.contains("Summer"));
        assert!(output.contains("180.00"));
        assert!(output.contains("2024-05-01"));
    }

    #[test]
    fn format_plans_empty_shows_hint() {
        let output = format_plans(&[]);
        assert!(output.contains("No saved plans yet."));
        assert!(output.contains("camps quote"));
    }
}
