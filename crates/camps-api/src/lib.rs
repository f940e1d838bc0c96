//! HTTP client for the camp-planner backend.
//!
//! The backend owns accounts, people, camps, and saved plans behind an
//! authenticated JSON API; this crate is the only place that talks to
//! it. Responses are converted into `camps-core` domain types at the
//! wire boundary, so the engine never sees backend field names, string
//! dates, or epoch timestamps.

use std::fmt;
use std::time::Duration;

use camps_core::{Camp, CampId, InvalidDate, Person, PersonId, PlanDraft, PlanId, SavedPlan};
use chrono::{DateTime, NaiveDate};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

mod wire;

pub use wire::{WireCamp, WirePerson, WirePlanEntry, WireSavedPlan, WireSelections};

/// Default request timeout for API calls.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL is empty or unparseable.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// The endpoint needs a bearer token but none is configured.
    #[error("not logged in: no bearer token configured")]
    MissingToken,
    /// Transport-level failure.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The backend answered with an error status.
    #[error("backend error (status {status}): {message}")]
    Api { status: u16, message: String },
    /// The response body did not match the contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    /// A date field in a response failed to parse.
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
}

/// An authenticated account, as `/auth/me` returns it.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct Account {
    pub id: i64,
    pub name: String,
    pub email: String,
}

/// Result of a successful login or signup.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct AuthSession {
    /// Bearer token for subsequent calls. Where it is stored is the
    /// caller's concern.
    pub token: String,
    pub user: Account,
}

/// Optional age window for the camp listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampFilter {
    pub min_age: Option<i32>,
    pub max_age: Option<i32>,
}

impl CampFilter {
    fn query(self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(min) = self.min_age {
            query.push(("min_age", min.to_string()));
        }
        if let Some(max) = self.max_age {
            query.push(("max_age", max.to_string()));
        }
        query
    }
}

/// Partial update for a person record.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PersonUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthdate: Option<NaiveDate>,
}

/// Partial update for a saved plan.
#[derive(Debug, Clone, Default)]
pub struct PlanPatch {
    pub name: Option<String>,
    pub entries: Option<Vec<camps_core::PlanEntry>>,
    pub total_cost: Option<f64>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignupBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct NewPersonBody<'a> {
    name: &'a str,
    birthdate: NaiveDate,
}

#[derive(Serialize)]
struct SavePlanBody<'a> {
    name: &'a str,
    selections: Vec<WirePlanEntry>,
    total_cost: f64,
}

#[derive(Serialize)]
struct PlanPatchBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    selections: Option<Vec<WirePlanEntry>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_cost: Option<f64>,
}

/// Backend API client.
///
/// Safe to clone and share; clones reuse the underlying connection pool.
/// Requests that fail leave no state behind anywhere: callers keep
/// whatever snapshot they already had.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Creates a client for `base_url`, optionally already authenticated.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or unparseable, or if
    /// the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Result<Self, ApiError> {
        let base_url = base_url.into();
        let trimmed = base_url.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            return Err(ApiError::InvalidBaseUrl("base URL is empty".to_string()));
        }
        if reqwest::Url::parse(&trimmed).is_err() {
            return Err(ApiError::InvalidBaseUrl(base_url));
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        Ok(Self {
            http,
            base_url: trimmed,
            token,
        })
    }

    /// Returns a copy of this client carrying `token`.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn bearer(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::MissingToken)
    }

    /// Sends a request and decodes the JSON response, mapping backend
    /// error bodies to [`ApiError::Api`].
    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.send_raw(request).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    /// Sends a request, checking the status but ignoring the body.
    async fn send_unit(&self, request: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.send_raw(request).await.map(|_| ())
    }

    async fn send_raw(&self, request: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(parse_api_error(status.as_u16(), &body));
        }
        Ok(body)
    }

    // ========== Auth ==========

    /// Exchanges credentials for a bearer token.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginBody { email, password });
        self.send(request).await
    }

    /// Creates an account and returns its first session.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, ApiError> {
        let request = self.http.post(self.url("/auth/signup")).json(&SignupBody {
            name,
            email,
            password,
        });
        self.send(request).await
    }

    /// The account behind the configured token.
    pub async fn me(&self) -> Result<Account, ApiError> {
        let request = self
            .http
            .get(self.url("/auth/me"))
            .bearer_auth(self.bearer()?);
        self.send(request).await
    }

    // ========== People ==========

    /// Fetches the registered people.
    pub async fn people(&self) -> Result<Vec<Person>, ApiError> {
        let request = self
            .http
            .get(self.url("/people"))
            .bearer_auth(self.bearer()?);
        let wire: Vec<WirePerson> = self.send(request).await?;
        wire.into_iter()
            .map(|person| Person::try_from(person).map_err(ApiError::from))
            .collect()
    }

    /// Registers a person and returns the stored record.
    pub async fn add_person(&self, name: &str, birthdate: NaiveDate) -> Result<Person, ApiError> {
        let request = self
            .http
            .post(self.url("/people"))
            .bearer_auth(self.bearer()?)
            .json(&NewPersonBody { name, birthdate });
        let wire: WirePerson = self.send(request).await?;
        Ok(Person::try_from(wire)?)
    }

    /// Applies a partial update to a person.
    pub async fn update_person(
        &self,
        id: PersonId,
        update: &PersonUpdate,
    ) -> Result<Person, ApiError> {
        let request = self
            .http
            .patch(self.url(&format!("/people/{id}")))
            .bearer_auth(self.bearer()?)
            .json(update);
        let wire: WirePerson = self.send(request).await?;
        Ok(Person::try_from(wire)?)
    }

    /// Deletes a person.
    pub async fn delete_person(&self, id: PersonId) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.url(&format!("/people/{id}")))
            .bearer_auth(self.bearer()?);
        self.send_unit(request).await
    }

    // ========== Camps ==========

    /// Fetches the camp calendar, optionally windowed by age.
    pub async fn camps(&self, filter: CampFilter) -> Result<Vec<Camp>, ApiError> {
        let request = self
            .http
            .get(self.url("/camps"))
            .query(&filter.query())
            .bearer_auth(self.bearer()?);
        let wire: Vec<WireCamp> = self.send(request).await?;
        wire.into_iter()
            .map(|camp| Camp::try_from(camp).map_err(ApiError::from))
            .collect()
    }

    /// Fetches one camp by id.
    pub async fn camp(&self, id: CampId) -> Result<Camp, ApiError> {
        let request = self
            .http
            .get(self.url(&format!("/camps/{id}")))
            .bearer_auth(self.bearer()?);
        let wire: WireCamp = self.send(request).await?;
        Ok(Camp::try_from(wire)?)
    }

    // ========== Saved plans ==========

    /// Fetches all saved plans for the current account.
    pub async fn plans(&self) -> Result<Vec<SavedPlan>, ApiError> {
        let request = self
            .http
            .get(self.url("/selections"))
            .bearer_auth(self.bearer()?);
        let wire: Vec<WireSavedPlan> = self.send(request).await?;
        wire.into_iter().map(convert_plan).collect()
    }

    /// Persists a plan draft and returns the stored plan.
    pub async fn save_plan(&self, draft: &PlanDraft) -> Result<SavedPlan, ApiError> {
        let body = SavePlanBody {
            name: &draft.name,
            selections: draft
                .entries
                .iter()
                .copied()
                .map(WirePlanEntry::from)
                .collect(),
            total_cost: draft.total_cost,
        };
        let request = self
            .http
            .post(self.url("/selections"))
            .bearer_auth(self.bearer()?)
            .json(&body);
        let wire: WireSavedPlan = self.send(request).await?;
        convert_plan(wire)
    }

    /// Applies a partial update to a saved plan.
    pub async fn update_plan(&self, id: PlanId, patch: &PlanPatch) -> Result<SavedPlan, ApiError> {
        let body = PlanPatchBody {
            name: patch.name.as_deref(),
            selections: patch
                .entries
                .as_ref()
                .map(|entries| entries.iter().copied().map(WirePlanEntry::from).collect()),
            total_cost: patch.total_cost,
        };
        let request = self
            .http
            .patch(self.url(&format!("/selections/{id}")))
            .bearer_auth(self.bearer()?)
            .json(&body);
        let wire: WireSavedPlan = self.send(request).await?;
        convert_plan(wire)
    }

    /// Deletes a saved plan.
    pub async fn delete_plan(&self, id: PlanId) -> Result<(), ApiError> {
        let request = self
            .http
            .delete(self.url(&format!("/selections/{id}")))
            .bearer_auth(self.bearer()?);
        self.send_unit(request).await
    }
}

/// Converts a wire plan, normalizing missing fields the way the backend
/// historically left them: no selections means an empty plan, no total
/// means zero.
fn convert_plan(wire: WireSavedPlan) -> Result<SavedPlan, ApiError> {
    let created_at = DateTime::from_timestamp(wire.created_at, 0).ok_or_else(|| {
        ApiError::InvalidResponse(format!("created_at out of range: {}", wire.created_at))
    })?;
    Ok(SavedPlan {
        id: PlanId::new(wire.id),
        name: wire.name,
        entries: wire.selections.unwrap_or_default().into_entries(),
        total_cost: wire.total_cost.unwrap_or(0.0),
        created_at,
    })
}

fn parse_api_error(status: u16, body: &str) -> ApiError {
    #[derive(serde::Deserialize)]
    struct ErrorPayload {
        message: String,
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .map_or_else(|_| body.to_string(), |payload| payload.message);
    ApiError::Api { status, message }
}
