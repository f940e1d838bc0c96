//! CLI subcommand implementations.

pub mod camps;
pub mod login;
pub mod people;
pub mod plans;
pub mod quote;
