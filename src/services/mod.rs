//! Service layer - business logic over the stores and the engine.
//!
//! The services own input validation, the hierarchy invariant guard, and
//! the reference-date checks the engine itself does not re-run.

mod company_service;
mod staff_service;

pub use company_service::CompanyService;
pub use staff_service::StaffService;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Result of a single-member compensation query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompensationPayload {
    pub staff_id: Uuid,
    pub amount: i64,
}

/// Result of a company-wide compensation query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyTotalPayload {
    pub company_id: Uuid,
    pub total: i64,
}
