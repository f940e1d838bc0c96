//! Camp planner CLI library.
//!
//! This crate provides the command-line interface for the camp planner.

mod cli;
pub mod commands;
mod config;

pub use cli::{CampsAction, Cli, Commands, PeopleAction, PlansAction};
pub use config::Config;
