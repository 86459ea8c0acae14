//! Per-role compensation formulas.
//!
//! Each formula is pure: the engine resolves whatever subordinate total the
//! formula's aggregation scope requires and hands it in as plain data. Shared
//! tenure step: whole elapsed days divided by a fixed 365-day year, truncating.
//! Rounding happens exactly once, at the end of each formula's own
//! computation.

use chrono::{DateTime, Utc};

use crate::model::{Role, StaffMember};

/// How much of the reporting tree a formula's contribution term covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregationScope {
    /// No contribution term
    None,
    /// Sum over direct subordinates only
    DirectReports,
    /// Sum over every descendant, all levels
    Subtree,
}

/// A role-specific compensation formula.
///
/// Exactly one registered formula must apply to each role; the engine
/// enforces that contract at selection time.
pub trait RoleFormula: Send + Sync {
    fn applies_to(&self, role: Role) -> bool;

    /// Which subordinate total the engine must resolve before evaluating.
    fn scope(&self) -> AggregationScope;

    /// Compute the rounded compensation amount. `subordinate_total` is the
    /// already-resolved sum for this formula's scope (0 when the scope is
    /// `None` or the subordinate set is empty).
    fn evaluate(&self, staff: &StaffMember, subordinate_total: i64, at: DateTime<Utc>) -> i64;
}

/// Whole years of tenure at the reference date, using a fixed 365-day year.
fn tenure_years(joined_at: DateTime<Utc>, at: DateTime<Utc>) -> i64 {
    (at - joined_at).num_days() / 365
}

fn base_plus_uplift(staff: &StaffMember, at: DateTime<Utc>, rate: f64, cap: f64) -> f64 {
    let years = tenure_years(staff.joined_at, at);
    let percent = (rate * years as f64).min(cap);
    let base = staff.base_salary as f64;
    base + base * percent
}

/// 3% per year of tenure, capped at 30%. No contribution term.
pub struct IndividualContributorFormula;

impl RoleFormula for IndividualContributorFormula {
    fn applies_to(&self, role: Role) -> bool {
        role == Role::IndividualContributor
    }

    fn scope(&self) -> AggregationScope {
        AggregationScope::None
    }

    fn evaluate(&self, staff: &StaffMember, _subordinate_total: i64, at: DateTime<Utc>) -> i64 {
        base_plus_uplift(staff, at, 0.03, 0.30).round() as i64
    }
}

/// 5% per year capped at 40%, plus 0.5% of the direct reports' compensation.
pub struct TeamLeadFormula;

impl RoleFormula for TeamLeadFormula {
    fn applies_to(&self, role: Role) -> bool {
        role == Role::TeamLead
    }

    fn scope(&self) -> AggregationScope {
        AggregationScope::DirectReports
    }

    fn evaluate(&self, staff: &StaffMember, subordinate_total: i64, at: DateTime<Utc>) -> i64 {
        let salary = base_plus_uplift(staff, at, 0.05, 0.40) + 0.005 * subordinate_total as f64;
        salary.round() as i64
    }
}

/// 1% per year capped at 35%, plus 0.3% of the whole subtree's compensation.
pub struct RainmakerFormula;

impl RoleFormula for RainmakerFormula {
    fn applies_to(&self, role: Role) -> bool {
        role == Role::Rainmaker
    }

    fn scope(&self) -> AggregationScope {
        AggregationScope::Subtree
    }

    fn evaluate(&self, staff: &StaffMember, subordinate_total: i64, at: DateTime<Utc>) -> i64 {
        let salary = base_plus_uplift(staff, at, 0.01, 0.35) + 0.003 * subordinate_total as f64;
        salary.round() as i64
    }
}

/// The default formula table: one formula per role.
pub fn default_formulas() -> Vec<Box<dyn RoleFormula>> {
    vec![
        Box::new(IndividualContributorFormula),
        Box::new(TeamLeadFormula),
        Box::new(RainmakerFormula),
    ]
}
