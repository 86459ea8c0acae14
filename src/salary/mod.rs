//! Compensation engine - recursive evaluation over the hierarchy.
//!
//! The engine owns the traversal: it loads staff records through the store,
//! selects the single applicable role formula, resolves the subordinate
//! total the formula's scope requires, and rounds once per node. A memo
//! cache lives for the duration of one top-level query and is discarded
//! afterwards; it never changes results, only how often they are derived.

pub mod formula;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::BoxFuture;
use tracing::debug;
use uuid::Uuid;

use crate::error::{HierarchyError, Result};
use crate::model::Role;
use crate::store::StaffStore;

use self::formula::{default_formulas, AggregationScope, RoleFormula};

/// Memoized results for a single top-level query.
///
/// The reference date is fixed for the whole query, so entries are keyed by
/// staff id alone. Never shared across queries: the hierarchy can change
/// between them.
#[derive(Default)]
struct QueryCache {
    compensation: HashMap<Uuid, i64>,
    subtree: HashMap<Uuid, i64>,
}

/// Computes point-in-time compensation for staff members.
pub struct CompensationEngine {
    store: Arc<dyn StaffStore>,
    formulas: Vec<Box<dyn RoleFormula>>,
}

impl CompensationEngine {
    /// Create an engine with the default per-role formula table.
    pub fn new(store: Arc<dyn StaffStore>) -> Self {
        Self::with_formulas(store, default_formulas())
    }

    /// Create an engine with a custom formula table.
    pub fn with_formulas(store: Arc<dyn StaffStore>, formulas: Vec<Box<dyn RoleFormula>>) -> Self {
        Self { store, formulas }
    }

    /// Compensation of one staff member at the reference date.
    ///
    /// Fails with `NotFound` if the id does not resolve and with
    /// `UnsupportedRole` if the member's role matches zero or multiple
    /// registered formulas.
    pub async fn get_compensation(&self, staff_id: Uuid, at: DateTime<Utc>) -> Result<i64> {
        let mut cache = QueryCache::default();
        let amount = self.compensation(staff_id, at, &mut cache).await?;
        debug!(staff_id = %staff_id, amount, "computed compensation");
        Ok(amount)
    }

    /// Sum of compensation over the entire descendant set of a staff member.
    ///
    /// Each descendant is counted exactly once; a member with no
    /// subordinates yields 0.
    pub async fn get_subtree_compensation_sum(
        &self,
        staff_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<i64> {
        let mut cache = QueryCache::default();
        self.subtree_sum(staff_id, at, &mut cache).await
    }

    /// Sum of every company member's own compensation at the reference date.
    ///
    /// The company list is flat: every member contributes exactly once,
    /// regardless of hierarchy position. One memo cache spans the whole
    /// query, so overlapping subtrees are evaluated once.
    pub async fn get_total_compensation_for_company(
        &self,
        company_id: Uuid,
        at: DateTime<Utc>,
    ) -> Result<i64> {
        let staff = self.store.find_by_company(company_id).await?;
        let mut cache = QueryCache::default();
        let mut total = 0i64;
        for member in &staff {
            total += self.compensation(member.id, at, &mut cache).await?;
        }
        debug!(company_id = %company_id, total, members = staff.len(), "computed company total");
        Ok(total)
    }

    /// Exactly-one-match contract over the formula table.
    fn formula_for(&self, role: Role) -> Result<&dyn RoleFormula> {
        let mut matching = self.formulas.iter().filter(|f| f.applies_to(role));
        let formula = matching.next().ok_or_else(|| {
            HierarchyError::UnsupportedRole(format!("no formula registered for role {role}"))
        })?;
        if matching.next().is_some() {
            return Err(HierarchyError::UnsupportedRole(format!(
                "multiple formulas registered for role {role}"
            )));
        }
        Ok(formula.as_ref())
    }

    fn compensation<'a>(
        &'a self,
        staff_id: Uuid,
        at: DateTime<Utc>,
        cache: &'a mut QueryCache,
    ) -> BoxFuture<'a, Result<i64>> {
        Box::pin(async move {
            if let Some(&amount) = cache.compensation.get(&staff_id) {
                return Ok(amount);
            }

            let (staff, subordinates) = self
                .store
                .find_with_subordinates(staff_id)
                .await?
                .ok_or_else(|| {
                    HierarchyError::NotFound(format!("staff member {staff_id} not found"))
                })?;

            let formula = self.formula_for(staff.role)?;
            let subordinate_total = match formula.scope() {
                AggregationScope::None => 0,
                AggregationScope::DirectReports => {
                    let mut sum = 0i64;
                    for sub in &subordinates {
                        sum += self.compensation(sub.id, at, &mut *cache).await?;
                    }
                    sum
                }
                AggregationScope::Subtree => self.subtree_sum(staff_id, at, &mut *cache).await?,
            };

            let amount = formula.evaluate(&staff, subordinate_total, at);
            cache.compensation.insert(staff_id, amount);
            Ok(amount)
        })
    }

    /// Direct subordinates contribute their own compensation plus, via the
    /// recursive call, their descendants' - complementary, never overlapping.
    fn subtree_sum<'a>(
        &'a self,
        staff_id: Uuid,
        at: DateTime<Utc>,
        cache: &'a mut QueryCache,
    ) -> BoxFuture<'a, Result<i64>> {
        Box::pin(async move {
            if let Some(&sum) = cache.subtree.get(&staff_id) {
                return Ok(sum);
            }

            let (_, subordinates) = self
                .store
                .find_with_subordinates(staff_id)
                .await?
                .ok_or_else(|| {
                    HierarchyError::NotFound(format!("staff member {staff_id} not found"))
                })?;

            let mut sum = 0i64;
            for sub in &subordinates {
                sum += self.compensation(sub.id, at, &mut *cache).await?;
                sum += self.subtree_sum(sub.id, at, &mut *cache).await?;
            }

            cache.subtree.insert(staff_id, sum);
            Ok(sum)
        })
    }
}
