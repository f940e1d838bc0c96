//! Command-line argument definitions.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

/// Camp planner.
///
/// Browses a backend-hosted calendar of children's camps, checks age
/// eligibility, prices selections with sibling and early-bird discounts,
/// and saves named plans.
#[derive(Debug, Parser)]
#[command(name = "camps", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Exchange credentials for a bearer token.
    Login {
        /// Account email.
        #[arg(long)]
        email: String,

        /// Account password.
        #[arg(long)]
        password: String,
    },

    /// Manage the registered children.
    People {
        #[command(subcommand)]
        action: PeopleAction,
    },

    /// Browse the camp calendar.
    Camps {
        #[command(subcommand)]
        action: CampsAction,
    },

    /// Work with saved plans.
    Plans {
        #[command(subcommand)]
        action: PlansAction,
    },

    /// Price a selection of camp/person pairings.
    Quote {
        /// A pairing as <camp_id>:<person_id>; repeat for more.
        #[arg(long = "pair", value_name = "CAMP:PERSON", required = true, value_parser = parse_pair)]
        pairs: Vec<(i64, i64)>,

        /// Price as of this date instead of today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        on: Option<NaiveDate>,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Save the priced selection as a named plan.
        #[arg(long, value_name = "NAME")]
        save: Option<String>,
    },
}

/// Actions on the camp calendar.
#[derive(Debug, Subcommand)]
pub enum CampsAction {
    /// List camps.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Only show camps fitting at least one of these people.
        #[arg(long = "for", value_name = "PERSON_ID")]
        for_people: Vec<i64>,
    },

    /// Show one camp with per-child eligibility.
    Show {
        /// The camp id to show.
        id: i64,

        /// Check eligibility for these people (default: all children).
        #[arg(long = "with", value_name = "PERSON_ID")]
        with_people: Vec<i64>,

        /// Evaluate prices as of this date instead of today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        on: Option<NaiveDate>,
    },
}

/// Actions on registered children.
#[derive(Debug, Subcommand)]
pub enum PeopleAction {
    /// List children with their current age.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Register a child.
    Add {
        /// The child's name.
        #[arg(long)]
        name: String,

        /// Birth date.
        #[arg(long, value_name = "YYYY-MM-DD")]
        birthdate: NaiveDate,
    },

    /// Delete a child.
    Rm {
        /// The person id to delete.
        id: i64,
    },
}

/// Actions on saved plans.
#[derive(Debug, Subcommand)]
pub enum PlansAction {
    /// List saved plans.
    List {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Load a saved plan and print its cost breakdown.
    Show {
        /// The plan id to show.
        id: i64,

        /// Price as of this date instead of today.
        #[arg(long, value_name = "YYYY-MM-DD")]
        on: Option<NaiveDate>,
    },

    /// Rename a saved plan.
    Rename {
        /// The plan id to rename.
        id: i64,

        /// The new name.
        name: String,
    },

    /// Delete a saved plan.
    Rm {
        /// The plan id to delete.
        id: i64,
    },
}

/// Parses a `<camp_id>:<person_id>` pairing argument.
fn parse_pair(input: &str) -> Result<(i64, i64), String> {
    let (camp, person) = input
        .split_once(':')
        .ok_or_else(|| format!("expected <camp_id>:<person_id>, got {input:?}"))?;
    let camp = camp
        .trim()
        .parse()
        .map_err(|_| format!("invalid camp id {camp:?}"))?;
    let person = person
        .trim()
        .parse()
        .map_err(|_| format!("invalid person id {person:?}"))?;
    Ok((camp, person))
}
