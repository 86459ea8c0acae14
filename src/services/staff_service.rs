//! Staff service - creation, lookups, the supervisor invariant guard, and
//! the compensation query boundary.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{HierarchyError, Result};
use crate::model::{CreateStaff, StaffMember};
use crate::salary::CompensationEngine;
use crate::store::{CompanyStore, StaffStore};

use super::{CompanyTotalPayload, CompensationPayload};

pub struct StaffService {
    store: Arc<dyn StaffStore>,
    company_store: Arc<dyn CompanyStore>,
    engine: CompensationEngine,
}

impl StaffService {
    pub fn new(store: Arc<dyn StaffStore>, company_store: Arc<dyn CompanyStore>) -> Self {
        let engine = CompensationEngine::new(store.clone());
        Self {
            store,
            company_store,
            engine,
        }
    }

    /// Create a staff member.
    ///
    /// Validates the input and, when an initial supervisor is given, runs
    /// the same eligibility checks as reassignment.
    pub async fn create(&self, input: CreateStaff) -> Result<StaffMember> {
        if input.name.trim().is_empty() {
            return Err(HierarchyError::Validation("staff name must not be empty".into()));
        }
        if input.base_salary < 0 {
            return Err(HierarchyError::Validation(
                "base salary must be non-negative".into(),
            ));
        }
        if input.joined_at > Utc::now() {
            return Err(HierarchyError::InvalidDate(
                "join date cannot be in the future".into(),
            ));
        }
        if self.company_store.find_by_id(input.company_id).await?.is_none() {
            return Err(HierarchyError::NotFound(format!(
                "company {} not found",
                input.company_id
            )));
        }
        if let Some(supervisor_id) = input.supervisor_id {
            self.check_supervisor(supervisor_id).await?;
        }

        let member = self.store.create(input).await?;
        info!(staff_id = %member.id, role = %member.role, "staff member created");
        Ok(member)
    }

    pub async fn find_one(&self, id: Uuid) -> Result<StaffMember> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| HierarchyError::NotFound(format!("staff member {id} not found")))
    }

    pub async fn find_all(&self) -> Result<Vec<StaffMember>> {
        self.store.find_all().await
    }

    pub async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<StaffMember>> {
        let staff = self.store.find_by_company(company_id).await?;
        if staff.is_empty() {
            return Err(HierarchyError::NotFound(format!(
                "no staff found for company {company_id}"
            )));
        }
        Ok(staff)
    }

    /// Direct subordinates of the given supervisor.
    pub async fn subordinates(&self, id: Uuid) -> Result<Vec<StaffMember>> {
        if self.store.find_by_id(id).await?.is_none() {
            return Err(HierarchyError::NotFound(format!("supervisor {id} not found")));
        }
        self.store.find_subordinates(id).await
    }

    /// Assign (or detach, with `None`) a supervisor.
    ///
    /// The invariant guard for the hierarchy-mutation path: the staff member
    /// must exist, self-supervision is rejected, the supervisor must exist
    /// and hold a supervising role. Longer cycles (A -> B -> A) and
    /// cross-company assignments are not detected here.
    pub async fn assign_supervisor(
        &self,
        staff_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<StaffMember> {
        if self.store.find_by_id(staff_id).await?.is_none() {
            return Err(HierarchyError::NotFound(format!(
                "staff member {staff_id} not found"
            )));
        }
        if let Some(supervisor_id) = supervisor_id {
            if supervisor_id == staff_id {
                return Err(HierarchyError::SelfSupervision);
            }
            self.check_supervisor(supervisor_id).await?;
        }

        let member = self.store.set_supervisor(staff_id, supervisor_id).await?;
        info!(
            staff_id = %staff_id,
            supervisor = ?supervisor_id,
            "supervisor assignment persisted"
        );
        Ok(member)
    }

    /// Compensation of one staff member as of the reference date.
    ///
    /// The date must be at or after the member's join date; the engine
    /// relies on this boundary check and does not re-validate it.
    pub async fn get_compensation(
        &self,
        staff_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<CompensationPayload> {
        let member = self.find_one(staff_id).await?;
        if at < member.joined_at {
            return Err(HierarchyError::InvalidDate(
                "reference date cannot be before the join date".into(),
            ));
        }
        let amount = self.engine.get_compensation(staff_id, at).await?;
        debug!(staff_id = %staff_id, amount, "compensation query served");
        Ok(CompensationPayload { staff_id, amount })
    }

    /// Total compensation across every member of a company.
    pub async fn get_total_compensation_for_company(
        &self,
        company_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<CompanyTotalPayload> {
        let staff = self.find_by_company(company_id).await?;
        for member in &staff {
            if at < member.joined_at {
                return Err(HierarchyError::InvalidDate(format!(
                    "reference date is before the join date of staff member {}",
                    member.id
                )));
            }
        }
        let total = self
            .engine
            .get_total_compensation_for_company(company_id, at)
            .await?;
        Ok(CompanyTotalPayload { company_id, total })
    }

    async fn check_supervisor(&self, supervisor_id: Uuid) -> Result<()> {
        let supervisor = self
            .store
            .find_by_id(supervisor_id)
            .await?
            .ok_or_else(|| HierarchyError::NotFound(format!("supervisor {supervisor_id} not found")))?;
        if !supervisor.role.can_supervise() {
            return Err(HierarchyError::InvalidSupervisorRole(supervisor.role));
        }
        Ok(())
    }
}
