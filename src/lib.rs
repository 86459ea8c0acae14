//! Paygraph - organizational hierarchy and point-in-time compensation.
//!
//! Maintains a forest of staff members (supervisor back-references) and
//! computes, for any member and reference date, a compensation figure from
//! tenure, role, and subordinate compensation.
//!
//! ## Architecture
//!
//! - **store**: async persistence contracts plus an in-memory implementation
//! - **salary**: the compensation engine and the three role formulas
//! - **services**: validation, the supervisor invariant guard, and the
//!   query boundary (reference-date checks live here, not in the engine)
//!
//! The engine never mutates the hierarchy; the supervisor-assignment path in
//! [`services::StaffService`] is the only writer.

pub mod error;
pub mod model;
pub mod salary;
pub mod services;
pub mod store;

pub use error::{HierarchyError, Result};
pub use model::{Company, CreateCompany, CreateStaff, Role, StaffMember};
pub use salary::CompensationEngine;
pub use services::{CompanyService, StaffService};
