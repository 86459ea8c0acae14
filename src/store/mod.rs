//! Hierarchy store contracts.
//!
//! The engine and services depend on persistence only through these traits.
//! The store performs no hierarchy-invariant checks of its own; those live
//! on the supervisor-assignment path in the staff service.

mod memory;

pub use memory::{MemoryCompanyStore, MemoryStaffStore};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::model::{Company, CreateCompany, CreateStaff, StaffMember};

/// Storage contract for staff records and the supervisor relation.
#[async_trait]
pub trait StaffStore: Send + Sync {
    /// Create a staff record. Fails with `DuplicateName` on a name conflict.
    async fn create(&self, input: CreateStaff) -> Result<StaffMember>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<StaffMember>>;

    /// Load a staff record together with its direct subordinates.
    async fn find_with_subordinates(
        &self,
        id: Uuid,
    ) -> Result<Option<(StaffMember, Vec<StaffMember>)>>;

    /// Direct subordinates of the given member (empty if none or unknown).
    async fn find_subordinates(&self, id: Uuid) -> Result<Vec<StaffMember>>;

    /// Every staff member belonging to a company, flat, not filtered to roots.
    async fn find_by_company(&self, company_id: Uuid) -> Result<Vec<StaffMember>>;

    async fn find_all(&self) -> Result<Vec<StaffMember>>;

    /// Persist a supervisor assignment. Fails with `NotFound` if `staff_id`
    /// is unknown; performs no further checks.
    async fn set_supervisor(
        &self,
        staff_id: Uuid,
        supervisor_id: Option<Uuid>,
    ) -> Result<StaffMember>;
}

/// Storage contract for companies.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    /// Create a company. Fails with `DuplicateName` on a name conflict.
    async fn create(&self, input: CreateCompany) -> Result<Company>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Company>>;

    async fn find_all(&self) -> Result<Vec<Company>>;
}
