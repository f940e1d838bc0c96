//! Core domain logic for the camp planner.
//!
//! This crate contains the fundamental types and logic for:
//! - Age and eligibility: who may attend which camp at its start date
//! - Pricing: early-bird windows and proportional sibling discounts
//! - Selection: the in-memory camp/person relation and its persisted form
//! - Planning: the orchestration layer producing visible camps and the
//!   itemized cost breakdown
//!
//! Everything here is synchronous and I/O-free. Fetching people, camps,
//! and saved plans from the backend is the `camps-api` crate's job; this
//! crate only consumes injected snapshots.

pub mod age;
pub mod eligibility;
pub mod planner;
pub mod pricing;
pub mod selection;
pub mod types;

pub use age::age_at;
pub use eligibility::{Eligibility, eligibility_of, eligible_camps, is_eligible};
pub use planner::{
    Breakdown, BreakdownLine, PersonRow, Planner, PlanDraft, PlanError, PricingFailure,
    UnpricedLine,
};
pub use pricing::{
    PricingError, Quote, effective_price, effective_sibling_price, is_early_bird_active, quote,
};
pub use selection::{LoadReport, SelectionStore};
pub use types::{
    Camp, CampId, InvalidDate, Person, PersonId, PlanEntry, PlanId, SavedPlan, parse_date,
};
