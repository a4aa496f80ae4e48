//! Wire DTOs for the REST backend.
//!
//! DESIGN
//! ======
//! Records other than [`User`] are opaque to the clients: they are decoded for
//! rendering and re-encoded for submission, never validated across fields.
//! Optional backend fields default so older payloads still decode.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of roles the backend assigns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
    Employee,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::Manager, Role::Employee];

    /// Wire spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }

    /// Capitalized label for badges and selects.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Manager => "Manager",
            Self::Employee => "Employee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Authenticated identity as returned by `/auth/me` and the auth endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub company_id: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub manager_id: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Body of `POST /auth/login`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register`. Registration also creates the owning company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub country: String,
}

/// Response of both auth endpoints.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    pub user: User,
}

/// Lifecycle status of an expense.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseStatus {
    Pending,
    Approved,
    Rejected,
    Reimbursed,
    /// Any status this client does not know about yet.
    #[serde(other)]
    Unknown,
}

impl ExpenseStatus {
    pub const KNOWN: [ExpenseStatus; 4] = [
        ExpenseStatus::Pending,
        ExpenseStatus::Approved,
        ExpenseStatus::Rejected,
        ExpenseStatus::Reimbursed,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Reimbursed => "reimbursed",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for ExpenseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::KNOWN
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown expense status: {s}"))
    }
}

/// An expense record as listed by the backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub employee_id: String,
    /// Present on team listings only.
    #[serde(default)]
    pub employee_name: Option<String>,
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub category: String,
    pub description: String,
    /// Expense date as an ISO-8601 string.
    pub date: String,
    pub status: ExpenseStatus,
    #[serde(default)]
    pub merchant_name: Option<String>,
    #[serde(default)]
    pub policy_violation: bool,
    #[serde(default)]
    pub violation_reason: Option<String>,
    /// Creation timestamp as an ISO-8601 string.
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_currency() -> String {
    "USD".to_owned()
}

/// Body of `POST /expenses`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewExpense {
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: String,
    /// ISO-8601 date (`YYYY-MM-DD` or full timestamp).
    pub date: String,
}

/// Decision submitted to `POST /expenses/{id}/approve`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalAction {
    Approve,
    Reject,
}

/// Body of `POST /expenses/{id}/approve`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApprovalRequest {
    pub action: ApprovalAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ApprovalRequest {
    /// Build a request, dropping a blank comment.
    #[must_use]
    pub fn new(action: ApprovalAction, comment: &str) -> Self {
        let comment = comment.trim();
        Self {
            action,
            comment: (!comment.is_empty()).then(|| comment.to_owned()),
        }
    }
}

/// Response of `GET /dashboard/stats`. Employees get `total_amount`;
/// managers and admins get `total_users`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_expenses: u64,
    pub pending_expenses: u64,
    pub approved_expenses: u64,
    #[serde(default)]
    pub total_amount: Option<f64>,
    #[serde(default)]
    pub total_users: Option<u64>,
}

/// Entry of `GET /categories`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub label: String,
    #[serde(default)]
    pub requires_receipt: bool,
}

/// Entry of `GET /notifications`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub read: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Per-category spending policy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpensePolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<String>,
    pub category: String,
    pub max_amount: f64,
    #[serde(default = "default_true")]
    pub requires_receipt: bool,
    #[serde(default)]
    pub auto_approve_limit: Option<f64>,
}

/// A bundle of expenses submitted together.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExpenseReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub expense_ids: Vec<String>,
    #[serde(default)]
    pub total_amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Body of `POST /admin/users`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub manager_id: Option<String>,
}

/// Body of `PATCH /admin/users/{id}`; only changed fields are sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Compute the minimal update turning `current` into the edited values.
    #[must_use]
    pub fn diff(current: &User, full_name: &str, role: Role, is_active: bool) -> Self {
        let full_name = full_name.trim();
        Self {
            full_name: (full_name != current.full_name && !full_name.is_empty()).then(|| full_name.to_owned()),
            role: (role != current.role).then_some(role),
            manager_id: None,
            is_active: (is_active != current.is_active).then_some(is_active),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.role.is_none() && self.manager_id.is_none() && self.is_active.is_none()
    }
}

/// Body of `PUT /users/{id}`: profile fields a user may edit on their own
/// record. Admins may send it for anyone; the backend ignores other keys.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<String>,
}

impl ProfileUpdate {
    /// Blank values are dropped, so `--phone ""` does not wipe the field.
    #[must_use]
    pub fn trimmed(self) -> Self {
        let keep = |value: Option<String>| {
            value
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        Self {
            full_name: keep(self.full_name),
            department: keep(self.department),
            job_title: keep(self.job_title),
            phone: keep(self.phone),
            address: keep(self.address),
            manager_id: keep(self.manager_id),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
