//! People commands: list, register, and delete children.

use std::fmt::Write;

use anyhow::Result;
use camps_api::Client;
use camps_core::{Person, PersonId, age_at};
use chrono::{Local, NaiveDate};
use serde::Serialize;

/// One row of the people listing.
#[derive(Debug, Clone, Serialize)]
pub struct PersonEntry {
    pub id: i64,
    pub name: String,
    pub birthdate: NaiveDate,
    pub age: i32,
}

/// Annotates people with their age as of `today`.
pub fn entries_for_display(people: &[Person], today: NaiveDate) -> Vec<PersonEntry> {
    people
        .iter()
        .map(|person| PersonEntry {
            id: person.id.value(),
            name: person.name.clone(),
            birthdate: person.birthdate,
            age: age_at(person.birthdate, today),
        })
        .collect()
}

/// Formats the people listing for human-readable output.
pub fn format_people(entries: &[PersonEntry]) -> String {
    let mut output = String::new();

    if entries.is_empty() {
        writeln!(output, "No children registered yet.").unwrap();
        writeln!(
            output,
            "Hint: run 'camps people add --name <name> --birthdate <YYYY-MM-DD>'."
        )
        .unwrap();
        return output;
    }

    writeln!(output, "{:<6}  {:<20}  {:<10}  {:>3}", "ID", "Name", "Born", "Age").unwrap();
    writeln!(output, "──────  ────────────────────  ──────────  ───").unwrap();
    for entry in entries {
        writeln!(
            output,
            "{:<6}  {:<20}  {:<10}  {:>3}",
            entry.id,
            entry.name,
            entry.birthdate.to_string(),
            entry.age
        )
        .unwrap();
    }

    output
}

/// Runs `camps people list`.
pub async fn list(client: &Client, json: bool) -> Result<()> {
    let people = client.people().await?;
    let today = Local::now().date_naive();
    let entries = entries_for_display(&people, today);

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        print!("{}", format_people(&entries));
    }
    Ok(())
}

/// Runs `camps people add`.
pub async fn add(client: &Client, name: &str, birthdate: NaiveDate) -> Result<()> {
    let person = client.add_person(name, birthdate).await?;
    println!("Registered {} with id {}", person.name, person.id);
    Ok(())
}

/// Runs `camps people rm`.
pub async fn remove(client: &Client, id: i64) -> Result<()> {
    client.delete_person(PersonId::new(id)).await?;
    println!("Deleted person {id}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn people() -> Vec<Person> {
        vec![
            Person {
                id: PersonId::new(1),
                name: "Ada".to_string(),
                birthdate: date(2015, 6, 15),
            },
            Person {
                id: PersonId::new(2),
                name: "Ben".to_string(),
                birthdate: date(2013, 2, 1),
            },
        ]
    }

    #[test]
    fn entries_carry_current_age() {
        let entries = entries_for_display(&people(), date(2024, 6, 14));
        assert_eq!(entries[0].age, 8);
        assert_eq!(entries[1].age, 11);

        // A day later Ada has had her birthday.
        let entries = entries_for_display(&people(), date(2024, 6, 15));
        assert_eq!(entries[0].age, 9);
    }

    #[test]
    fn format_lists_each_person() {
        let entries = entries_for_display(&people(), date(2024, 6, 15));
        let output = format_people(&entries);
        assert!(output.contains("Ada"));
        assert!(output.contains("2013-02-01"));
        assert!(output.lines().count() >= 4);
    }

    #[test]
    fn format_empty_shows_hint() {
        let output = format_people(&[]);
        assert!(output.contains("No children registered yet."));
        assert!(output.contains("camps people add"));
    }
}
