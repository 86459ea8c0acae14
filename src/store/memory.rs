//! In-memory store backed by concurrent maps.
//!
//! Main tables plus secondary indices for "direct subordinates of X" and
//! "all staff in company Y", maintained on create and on supervisor
//! reassignment. Index order follows insertion order.

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

use crate::error::{HierarchyError, Result};
use crate::model::{Company, CreateCompany, CreateStaff, StaffMember};

use super::{CompanyStore, StaffStore};

/// Concurrent in-memory staff store.
pub struct MemoryStaffStore {
    /// Main table: id -> record
    staff: DashMap<Uuid, StaffMember>,
    /// Index: supervisor id -> direct subordinate ids
    by_supervisor: DashMap<Uuid, Vec<Uuid>>,
    /// Index: company id -> member ids
    by_company: DashMap<Uuid, Vec<Uuid>>,
    /// Unique-name index: name -> id
    by_name: DashMap<String, Uuid>,
}

impl MemoryStaffStore {
    pub fn new() -> Self {
        Self {
            staff: DashMap::new(),
            by_supervisor: DashMap::new(),
            by_company: DashMap::new(),
            by_name: DashMap::new(),
        }
    }

    fn unlink_supervisor(&self, supervisor_id: Uuid, staff_id: Uuid) {
        if let Some(mut subs) = self.by_supervisor.get_mut(&supervisor_id) {
            subs.retain(|id| *id != staff_id);
        }
    }

    fn resolve(&self, ids: &[Uuid]) -> Vec<StaffMember> {
        ids.iter()
            .filter_map(|id| self.staff.get(id).map(|s| s.clone()))
            .collect()
    }
}

impl Default for MemoryStaffStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StaffStore for MemoryStaffStore {
    async fn create(&self, input: CreateStaff) -> Result<StaffMember> {
        if self.by_name.contains_key(&input.name) {
            return Err(HierarchyError::DuplicateName(input.name));
        }

        let member = StaffMember {
            id: Uuid::new_v4(),
            name: input.name,
            role: input.role,
            joined_at: input.joined_at,
            base_salary: input.base_salary,
            company_id: input.company_id,
            supervisor_id: input.supervisor_id,
        };

        self.by_name.insert(member.name.clone(), member.id);
        self.by_company
            .entry(member.company_id)
            .or_default()
            .push(member.id);
        if let Some(supervisor_id) = member.supervisor_id {
            self.by_supervisor
                .entry(supervisor_id)
                .or_default()
                .push(member.id);
        }
        self.staff.insert(member.id, member.clone());

        debug!(staff_id = %member.id, role = %member.role, "created staff member");
        Ok(member)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffMember>> {
        Ok(self.staff.get(&id).map(|s| s.clone()))
    }

    async fn find_with_subordinates(
        &self,
        id: Uuid,
    ) -> Result<Option<(StaffMember, Vec<StaffMember>)>> {
        let member = match self.staff.get(&id) {
            Some(s) => s.clone(),
            None => return Ok(None),
        };
        let subordinates = self.find_subordinates(id).await?;
        Ok(Some((member, subordinates)))
    }

    async fn find_subordinates(&self, id: Uuid) -> Result<Vec<StaffMember>> {
        let ids = match self.by_supervisor.get(&id) {
            Some(list) => list.clone(),
            None => return Ok(Vec::new()),
        };
        Ok(self.resolve(&ids))
    }

    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<StaffMember>> {
        let ids = match self.by_company.get(&company_id) {
            Some(list) => list.clone(),
            None => return Ok(Vec::new()),
        };
        Ok(self.resolve(&ids))
    }

    async fn find_all(&self) -> Result<Vec<StaffMember>> {
        Ok(self.staff.iter().map(|entry| entry.value().clone()).collect())
    }

    async fn set_supervisor(
        &self,
        staff_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<StaffMember> {
        let previous = {
            let mut member = self
                .staff
                .get_mut(&staff_id)
                .ok_or_else(|| HierarchyError::NotFound(format!("staff member {staff_id}")))?;
            let previous = member.supervisor_id;
            member.supervisor_id = supervisor_id;
            previous
        };

        if let Some(old) = previous {
            self.unlink_supervisor(old, staff_id);
        }
        if let Some(new) = supervisor_id {
            self.by_supervisor.entry(new).or_default().push(staff_id);
        }

        // Entry is guaranteed present: the get_mut above succeeded and there
        // is no deletion path.
        self.staff
            .get(&staff_id)
            .map(|s| s.clone())
            .ok_or_else(|| HierarchyError::Store("staff record vanished during update".into()))
    }
}

/// Concurrent in-memory company store.
pub struct MemoryCompanyStore {
    companies: DashMap<Uuid, Company>,
    by_name: DashMap<String, Uuid>,
}

impl MemoryCompanyStore {
    pub fn new() -> Self {
        Self {
            companies: DashMap::new(),
            by_name: DashMap::new(),
        }
    }
}

impl Default for MemoryCompanyStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn create(&self, input: CreateCompany) -> Result<Company> {
        if self.by_name.contains_key(&input.name) {
            return Err(HierarchyError::DuplicateName(input.name));
        }
        let company = Company {
            id: Uuid::new_v4(),
            name: input.name,
        };
        self.by_name.insert(company.name.clone(), company.id);
        self.companies.insert(company.id, company.clone());
        Ok(company)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>> {
        Ok(self.companies.get(&id).map(|c| c.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Company>> {
        Ok(self.companies.iter().map(|entry| entry.value().clone()).collect())
    }
}
