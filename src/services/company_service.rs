//! Company service - creation and lookups.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use crate::error::{HierarchyError, Result};
use crate::model::{Company, CreateCompany};
use crate::store::CompanyStore;

pub struct CompanyService {
    store: Arc<dyn CompanyStore>,
}

impl CompanyService {
    pub fn new(store: Arc<dyn CompanyStore>) -> Self {
        Self { store }
    }

    /// Create a company. Names are unique and at least two characters long.
    pub async fn create(&self, input: CreateCompany) -> Result<Company> {
        if input.name.trim().len() < 2 {
            return Err(HierarchyError::Validation(
                "company name must be at least 2 characters".into(),
            ));
        }
        let company = self.store.create(input).await?;
        info!(company_id = %company.id, name = %company.name, "company created");
        Ok(company)
    }

    pub async fn find_all(&self) -> Result<Vec<Company>> {
        self.store.find_all().await
    }

    pub async fn find_one(&self, id: Uuid) -> Result<Company> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| HierarchyError::NotFound(format!("company {id} not found")))
    }
}
