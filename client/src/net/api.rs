//! REST API helpers for communicating with the merchant backend.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`.
//! Server-side (SSR): stubs returning [`ApiError::Unavailable`] since these
//! endpoints are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every response is a `{ data, message, success }` envelope. Non-2xx statuses
//! and `success: false` both become [`ApiError::Server`] with the status code
//! and the server's message, so pages can show the message verbatim.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::collections::BTreeMap;

#[cfg(any(test, feature = "hydrate"))]
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{DashboardTotals, DebtRequest, Notification, User};
use crate::state::signup_flow::SignupFormData;

/// Base URL of the REST API, overridable at build time.
pub const API_BASE_URL: &str = match option_env!("PORTAL_API_BASE_URL") {
    Some(url) => url,
    None => "/api",
};

/// Response envelope shared by every endpoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub message: String,
    pub success: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("{message} (status {status})")]
    Server { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("not available on server")]
    Unavailable,
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Text suitable for showing to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    national_id: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct DebtConsentRequest {
    approved: bool,
}

#[cfg(any(test, feature = "hydrate"))]
fn api_url(path: &str) -> String {
    format!("{API_BASE_URL}{path}")
}

#[cfg(any(test, feature = "hydrate"))]
fn totals_endpoint(business_id: i64) -> String {
    api_url(&format!("/businesses/{business_id}/totals"))
}

#[cfg(any(test, feature = "hydrate"))]
fn debt_consent_endpoint(debt_id: i64) -> String {
    api_url(&format!("/debts/{debt_id}/consent"))
}

#[cfg(any(test, feature = "hydrate"))]
fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[cfg(any(test, feature = "hydrate"))]
fn status_failed_message(status: u16) -> String {
    format!("request failed with status {status}")
}

#[cfg(any(test, feature = "hydrate"))]
fn is_success_status(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Decode the raw envelope, ignoring `data`.
#[cfg(any(test, feature = "hydrate"))]
fn decode_envelope<T: DeserializeOwned>(status: u16, body: &str) -> Result<Option<T>, ApiError> {
    let envelope = match serde_json::from_str::<ApiResponse<T>>(body) {
        Ok(envelope) => envelope,
        Err(_) if !is_success_status(status) => {
            return Err(ApiError::Server { status, message: status_failed_message(status) });
        }
        Err(e) => return Err(ApiError::Decode(e.to_string())),
    };
    if !is_success_status(status) || !envelope.success {
        let message = if envelope.message.is_empty() { status_failed_message(status) } else { envelope.message };
        return Err(ApiError::Server { status, message });
    }
    Ok(envelope.data)
}

/// Decode an envelope whose `data` is required.
#[cfg(any(test, feature = "hydrate"))]
fn decode_body<T: DeserializeOwned>(status: u16, body: &str) -> Result<T, ApiError> {
    decode_envelope(status, body)?.ok_or_else(|| ApiError::Decode("missing data".to_owned()))
}

/// Decode an envelope whose `data` is irrelevant.
#[cfg(any(test, feature = "hydrate"))]
fn decode_ack(status: u16, body: &str) -> Result<(), ApiError> {
    decode_envelope::<serde_json::Value>(status, body).map(|_| ())
}

#[cfg(feature = "hydrate")]
async fn send_raw(request: gloo_net::http::Request) -> Result<(u16, String), ApiError> {
    let resp = request.send().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    let status = resp.status();
    let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
    Ok((status, body))
}

#[cfg(feature = "hydrate")]
async fn send<T: DeserializeOwned>(request: gloo_net::http::Request) -> Result<T, ApiError> {
    let (status, body) = send_raw(request).await?;
    decode_body(status, &body)
}

#[cfg(feature = "hydrate")]
fn post_json<B: Serialize>(url: &str, token: Option<&str>, body: &B) -> Result<gloo_net::http::Request, ApiError> {
    let mut builder = gloo_net::http::Request::post(url);
    if let Some(token) = token {
        builder = builder.header("Authorization", &bearer(token));
    }
    builder.json(body).map_err(|e| ApiError::Transport(e.to_string()))
}

#[cfg(feature = "hydrate")]
fn get_authed(url: &str, token: &str) -> Result<gloo_net::http::Request, ApiError> {
    gloo_net::http::Request::get(url)
        .header("Authorization", &bearer(token))
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))
}

/// Sign in with national id and password via `POST /auth/login`.
///
/// # Errors
///
/// Returns the server's status and message on rejected credentials, or a
/// transport/decode error.
pub async fn login(national_id: &str, password: &str) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = post_json(&api_url("/auth/login"), None, &LoginRequest { national_id, password })?;
        send(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = LoginRequest { national_id, password };
        Err(ApiError::Unavailable)
    }
}

/// Exchange the identity-callback payload for a provisional user via
/// `POST /auth/signup/nafath`.
///
/// # Errors
///
/// Returns an error if verification is rejected or the request fails.
pub async fn verify_identity_callback(payload: &BTreeMap<String, String>) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = post_json(&api_url("/auth/signup/nafath"), None, payload)?;
        send(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = payload;
        Err(ApiError::Unavailable)
    }
}

/// Finish signup with the collected form via `POST /auth/signup/complete`,
/// authorized by the provisional token.
///
/// # Errors
///
/// Returns an error if the server rejects the form or the request fails.
pub async fn complete_signup(provisional_token: &str, form: &SignupFormData) -> Result<User, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = post_json(&api_url("/auth/signup/complete"), Some(provisional_token), form)?;
        send(request).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (provisional_token, form);
        Err(ApiError::Unavailable)
    }
}

/// Fetch aggregate counters for one business.
///
/// # Errors
///
/// Returns an error if the request fails or the session is rejected.
pub async fn fetch_dashboard_totals(token: &str, business_id: i64) -> Result<DashboardTotals, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        send(get_authed(&totals_endpoint(business_id), token)?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, business_id);
        Err(ApiError::Unavailable)
    }
}

/// Fetch debts awaiting the customer's consent.
///
/// # Errors
///
/// Returns an error if the request fails or the session is rejected.
pub async fn fetch_debt_requests(token: &str) -> Result<Vec<DebtRequest>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        send(get_authed(&api_url("/debts/pending"), token)?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}

/// Approve or decline a debt via `POST /debts/{id}/consent`.
///
/// # Errors
///
/// Returns an error if the server rejects the decision or the request fails.
pub async fn submit_debt_consent(token: &str, debt_id: i64, approved: bool) -> Result<(), ApiError> {
    #[cfg(feature = "hydrate")]
    {
        let request = post_json(&debt_consent_endpoint(debt_id), Some(token), &DebtConsentRequest { approved })?;
        let (status, body) = send_raw(request).await?;
        decode_ack(status, &body)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (token, debt_id, DebtConsentRequest { approved });
        Err(ApiError::Unavailable)
    }
}

/// Fetch the notification inbox.
///
/// # Errors
///
/// Returns an error if the request fails or the session is rejected.
pub async fn fetch_notifications(token: &str) -> Result<Vec<Notification>, ApiError> {
    #[cfg(feature = "hydrate")]
    {
        send(get_authed(&api_url("/notifications"), token)?).await
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = token;
        Err(ApiError::Unavailable)
    }
}
