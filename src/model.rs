//! Core domain types: staff members, companies, and roles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Role of a staff member.
///
/// The role determines the compensation formula and whether the member is
/// eligible to supervise others (individual contributors are not).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// No subordinates contribute to compensation
    IndividualContributor,
    /// Bonus from direct reports only
    TeamLead,
    /// Bonus from the entire reporting subtree
    Rainmaker,
}

impl Role {
    /// Whether this role is allowed to appear as another member's supervisor.
    pub fn can_supervise(self) -> bool {
        !matches!(self, Role::IndividualContributor)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Role::IndividualContributor => "individual_contributor",
            Role::TeamLead => "team_lead",
            Role::Rainmaker => "rainmaker",
        };
        write!(f, "{name}")
    }
}

/// A person tracked in the hierarchy.
///
/// Only `supervisor_id` is mutable after creation, and only through the
/// guarded assignment path. Compensation is always computed, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    /// When the member joined; drives the tenure uplift
    pub joined_at: DateTime<Utc>,
    /// Non-negative base amount the formulas build on
    pub base_salary: i64,
    pub company_id: Uuid,
    /// Nullable back-reference forming a forest over staff members
    pub supervisor_id: Option<Uuid>,
}

/// A company owning a collection of staff members.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,
    pub name: String,
}

/// Input for creating a staff member.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateStaff {
    pub name: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
    pub base_salary: i64,
    pub company_id: Uuid,
    pub supervisor_id: Option<Uuid>,
}

/// Input for creating a company.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCompany {
    pub name: String,
}
