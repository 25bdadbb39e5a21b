//! Shared DTOs for the client/API boundary.
//!
//! DESIGN
//! ======
//! These types mirror the REST payloads so persisted snapshots and API
//! responses decode into the same structs. Optional fields tolerate older
//! payloads that omit them.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Kind of principal behind a [`User`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorKind {
    Customer,
    Merchant,
}

/// How a business receives collected funds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutMethod {
    #[default]
    Weekly,
    Monthly,
    Instant,
}

/// An authenticated principal as returned by the login and signup endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    /// National identifier (citizens).
    pub national_id: Option<String>,
    /// Iqama identifier (residents).
    pub iqama_id: Option<String>,
    /// Commercial-register number.
    pub cr_number: Option<String>,
    /// Opaque bearer credential; empty when the snapshot carries none.
    #[serde(default)]
    pub access_token: String,
    #[serde(default)]
    pub full_name_ar: String,
    #[serde(default)]
    pub full_name_en: String,
    pub nationality: Option<String>,
    /// Date of birth as sent by the server (`YYYY-MM-DD`).
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub businesses: Vec<Business>,
    pub actor_type: ActorKind,
}

impl User {
    pub fn has_token(&self) -> bool {
        !self.access_token.is_empty()
    }

    /// Display name, preferring the English rendering.
    pub fn display_name(&self) -> &str {
        if self.full_name_en.is_empty() { &self.full_name_ar } else { &self.full_name_en }
    }
}

/// A merchant entity owned by a [`User`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Business {
    pub id: i64,
    pub cr_number: String,
    #[serde(default)]
    pub name_ar: String,
    #[serde(default)]
    pub name_en: String,
    #[serde(default)]
    pub activity: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub payout_method: PayoutMethod,
    pub status: Option<String>,
    pub overdue_customers: Option<u32>,
    pub overdue_amount: Option<f64>,
    pub outstanding_amount: Option<f64>,
    pub paid_amount: Option<f64>,
}

impl Business {
    pub fn display_name(&self) -> &str {
        if self.name_en.is_empty() { &self.name_ar } else { &self.name_en }
    }
}

/// Aggregate counters shown on the dashboard for one business.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardTotals {
    #[serde(default)]
    pub overdue_customers: u32,
    #[serde(default)]
    pub overdue_amount: f64,
    #[serde(default)]
    pub outstanding_amount: f64,
    #[serde(default)]
    pub paid_amount: f64,
}

impl From<&Business> for DashboardTotals {
    fn from(business: &Business) -> Self {
        Self {
            overdue_customers: business.overdue_customers.unwrap_or_default(),
            overdue_amount: business.overdue_amount.unwrap_or_default(),
            outstanding_amount: business.outstanding_amount.unwrap_or_default(),
            paid_amount: business.paid_amount.unwrap_or_default(),
        }
    }
}

/// A debt a customer is asked to acknowledge.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DebtRequest {
    pub id: i64,
    pub business_name: String,
    pub amount: f64,
    pub due_date: Option<String>,
}

/// An inbox notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    /// Creation timestamp as an RFC 3339 string.
    pub created_at: String,
    #[serde(default)]
    pub read: bool,
}
