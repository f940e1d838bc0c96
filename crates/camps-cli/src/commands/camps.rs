//! Camps commands: browse the calendar and inspect a single camp with
//! per-child eligibility.

use std::collections::BTreeSet;
use std::fmt::Write;

use anyhow::Result;
use camps_api::{CampFilter, Client};
use camps_core::{Camp, CampId, PersonId, Planner, eligible_camps, is_early_bird_active};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One row of the camp listing.
#[derive(Debug, Clone, Serialize)]
pub struct CampEntry {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub ages: String,
    pub price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// Renders the age window the way the organizers write it, with `?`
/// standing in for an open bound.
fn age_range(camp: &Camp) -> String {
    match (camp.age_min, camp.age_max) {
        (None, None) => "all".to_string(),
        (min, max) => format!(
            "{}-{}",
            min.map_or_else(|| "?".to_string(), |v| v.to_string()),
            max.map_or_else(|| "?".to_string(), |v| v.to_string())
        ),
    }
}

/// Renders the price column, marking an active early-bird window.
fn price_label(camp: &Camp, today: NaiveDate) -> String {
    let Some(base) = camp.base_price else {
        return "TBD".to_string();
    };
    if is_early_bird_active(camp, today) {
        // Early-bird activity was checked above, so the price is present.
        let early = camp.early_bird_price.unwrap_or(base);
        return format!("{early:.2} (early bird, else {base:.2})");
    }
    format!("{base:.2}")
}

/// Annotates camps for display as of `today`.
pub fn entries_for_display(camps: &[&Camp], today: NaiveDate) -> Vec<CampEntry> {
    camps
        .iter()
        .map(|camp| CampEntry {
            id: camp.id.value(),
            name: camp.name.clone(),
            start_date: camp.start_date,
            end_date: camp.end_date,
            ages: age_range(camp),
            price: price_label(camp, today),
            location: camp.location.clone(),
        })
        .collect()
}

/// Formats the camp listing for human-readable output.
pub fn format_camps(entries: &[CampEntry]) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        writeln!(output, "No camps match the current selection.").unwrap();
        return output;
    }

    writeln!(
        output,
        "{:<6}  {:<24}  {:<10}  {:<10}  {:<7}  Price (EUR)",
        "ID", "Name", "Start", "End", "Ages"
    )
    .unwrap();
    writeln!(
        output,
        "──────  ────────────────────────  ──────────  ──────────  ───────  ───────────"
    )
    .unwrap();
    for entry in entries {
        // Truncate by characters, not bytes, to stay safe on umlauts.
        let name = if entry.name.chars().count() > 24 {
            format!("{}...", entry.name.chars().take(21).collect::<String>())
        } else {
            entry.name.clone()
        };
        writeln!(
            output,
            "{:<6}  {:<24}  {:<10}  {:<10}  {:<7}  {}",
            entry.id,
            name,
            entry.start_date.to_string(),
            entry.end_date.to_string(),
            entry.ages,
            entry.price
        )
        .unwrap();
    }

    output
}

/// Runs `camps camps list`.
pub async fn list(client: &Client, json: bool, for_people: &[i64]) -> Result<()> {
    let camps = client.camps(CampFilter::default()).await?;

    let visible: Vec<&Camp> = if for_people.is_empty() {
        camps.iter().collect()
    } else {
        let people = client.people().await?;
        let selected: BTreeSet<PersonId> = for_people.iter().map(|&id| PersonId::new(id)).collect();
        eligible_camps(&camps, &people, &selected)
    };

    let today = Local::now().date_naive();
    let entries = entries_for_display(&visible, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_camps(&entries));
    }
    Ok(())
}

/// Formats one camp's detail view with per-child eligibility rows.
pub fn format_camp_detail(planner: &Planner, camp: &Camp, today: NaiveDate) -> String {
    let mut output = String::new();

    writeln!(output, "{} (id {})", camp.name, camp.id).unwrap();
    writeln!(output, "Dates: {} to {}", camp.start_date, camp.end_date).unwrap();
    if let Some(time) = &camp.time_display {
        writeln!(output, "Time: {time}").unwrap();
    }
    if let Some(location) = &camp.location {
        writeln!(output, "Location: {location}").unwrap();
    }
    if let Some(address) = &camp.address {
        writeln!(output, "Address: {address}").unwrap();
    }
    writeln!(output, "Ages: {}", age_range(camp)).unwrap();

    match camp.base_price {
        Some(base) => writeln!(output, "Price: {base:.2} EUR").unwrap(),
        None => writeln!(output, "Price: TBD").unwrap(),
    }
    if let (Some(early), Some(deadline)) = (camp.early_bird_price, camp.early_bird_deadline) {
        let state = if is_early_bird_active(camp, today) {
            "active"
        } else {
            "expired"
        };
        writeln!(output, "Early bird: {early:.2} EUR until {deadline} ({state})").unwrap();
    }
    if let Some(sibling) = camp.sibling_price {
        writeln!(output, "Sibling price: {sibling:.2} EUR").unwrap();
    }
    if let Some(spots) = camp.spots {
        writeln!(output, "Available spots: {spots}").unwrap();
    }
    if let Some(deadline) = &camp.registration_deadline {
        writeln!(output, "Registration deadline: {deadline}").unwrap();
    }
    if let Some(description) = &camp.description {
        writeln!(output, "Description: {description}").unwrap();
    }
    if let Some(url) = &camp.detail_url {
        writeln!(output, "Details: {url}").unwrap();
    }
    if let Some(url) = &camp.signup_url {
        writeln!(output, "Register: {url}").unwrap();
    }

    let rows = planner.person_rows(camp);
    if !rows.is_empty() {
        writeln!(output).unwrap();
        writeln!(output, "Children:").unwrap();
        for row in rows {
            if row.eligible {
                writeln!(output, "  {} ({} at camp): eligible", row.name, row.age_at_start)
                    .unwrap();
            } else {
                writeln!(
                    output,
                    "  {} ({} at camp): age {} not in range {}",
                    row.name,
                    row.age_at_start,
                    row.age_at_start,
                    age_range(camp)
                )
                .unwrap();
            }
        }
    }

    output
}

/// Runs `camps camps show`.
pub async fn show(
    client: &Client,
    id: i64,
    with_people: &[i64],
    on: Option<NaiveDate>,
) -> Result<()> {
    let camp = client.camp(CampId::new(id)).await?;
    let people = client.people().await?;

    let mut planner = Planner::new(people, vec![camp.clone()]);
    let subjects: Vec<PersonId> = if with_people.is_empty() {
        planner.people().iter().map(|p| p.id).collect()
    } else {
        with_people.iter().map(|&id| PersonId::new(id)).collect()
    };
    for person in subjects {
        planner.toggle_person(person);
    }

    let today = on.unwrap_or_else(|| Local::now().date_naive());
    print!("{}", format_camp_detail(&planner, &camp, today));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn camp(value: serde_json::Value) -> Camp {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn age_range_renders_open_bounds() {
        let base = serde_json::json!({
            "id": 1, "name": "X",
            "start_date": "2024-07-01", "end_date": "2024-07-05"
        });
        assert_eq!(age_range(&camp(base.clone())), "all");

        let mut with_min = base.clone();
        with_min["age_min"] = 8.into();
        assert_eq!(age_range(&camp(with_min)), "8-?");

        let mut bounded = base;
        bounded["age_min"] = 8.into();
        bounded["age_max"] = 12.into();
        assert_eq!(age_range(&camp(bounded)), "8-12");
    }

    #[test]
    fn price_label_marks_early_bird_window() {
        let c = camp(serde_json::json!({
            "id": 1, "name": "X",
            "start_date": "2024-07-01", "end_date": "2024-07-05",
            "base_price": 100.0,
            "early_bird_price": 90.0,
            "early_bird_deadline": "2024-05-01"
        }));
        assert_eq!(
            price_label(&c, date(2024, 4, 1)),
            "90.00 (early bird, else 100.00)"
        );
        assert_eq!(price_label(&c, date(2024, 5, 2)), "100.00");
    }

    #[test]
    fn price_label_undetermined() {
        let c = camp(serde_json::json!({
            "id": 1, "name": "X",
            "start_date": "2024-07-01", "end_date": "2024-07-05"
        }));
        assert_eq!(price_label(&c, date(2024, 4, 1)), "TBD");
    }

    #[test]
    fn format_camps_lists_rows() {
        let c = camp(serde_json::json!({
            "id": 12, "name": "Zeltlager",
            "start_date": "2024-07-01", "end_date": "2024-07-10",
            "age_min": 8, "age_max": 12,
            "base_price": 100.0
        }));
        let entries = entries_for_display(&[&c], date(2024, 6, 1));
        let output = format_camps(&entries);
        assert!(output.contains("Zeltlager"));
        assert!(output.contains("8-12"));
        assert!(output.contains("100.00"));
    }

    #[test]
    fn format_camps_empty() {
        let output = format_camps(&[]);
        assert!(output.contains("No camps match"));
    }

    #[test]
    fn camp_detail_annotates_children() {
        let c = camp(serde_json::json!({
            "id": 12, "name": "Zeltlager",
            "start_date": "2024-07-01", "end_date": "2024-07-10",
            "age_min": 8, "age_max": 12,
            "base_price": 100.0,
            "sibling_price": 80.0,
            "early_bird_price": 90.0,
            "early_bird_deadline": "2024-05-01",
            "location": "Musterstadt"
        }));
        let people = vec![
            camps_core::Person {
                id: PersonId::new(1),
                name: "Ada".to_string(),
                birthdate: date(2015, 6, 15),
            },
            camps_core::Person {
                id: PersonId::new(2),
                name: "Ben".to_string(),
                birthdate: date(2010, 1, 1),
            },
        ];
        let mut planner = Planner::new(people, vec![c.clone()]);
        planner.toggle_person(PersonId::new(1));
        planner.toggle_person(PersonId::new(2));

        let output = format_camp_detail(&planner, &c, date(2024, 4, 1));
        assert!(output.contains("Zeltlager (id 12)"));
        assert!(output.contains("Early bird: 90.00 EUR until 2024-05-01 (active)"));
        assert!(output.contains("Ada (9 at camp): eligible"));
        assert!(output.contains("Ben (14 at camp): age 14 not in range 8-12"));

        // Past the deadline the window reads expired.
        let output = format_camp_detail(&planner, &c, date(2024, 6, 1));
        assert!(output.contains("(expired)"));
    }
}
