//! Error types for paygraph

use thiserror::Error;

use crate::model::Role;

#[derive(Error, Debug)]
pub enum HierarchyError {
    /// Staff member, supervisor, or company lookup missed
    #[error("Not found: {0}")]
    NotFound(String),

    /// A staff member may not be their own supervisor
    #[error("Staff member cannot be their own supervisor")]
    SelfSupervision,

    /// Only supervising roles may have subordinates
    #[error("Role {0} cannot have subordinates")]
    InvalidSupervisorRole(Role),

    /// Data-integrity failure: a role resolved to zero or multiple formulas
    #[error("Unsupported role: {0}")]
    UnsupportedRole(String),

    /// Reference date unparseable, in the future, or before a join date
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Creation conflict on a unique name
    #[error("Duplicate name: {0}")]
    DuplicateName(String),

    /// Creation-input validation failure
    #[error("Validation error: {0}")]
    Validation(String),

    /// Any other persistence failure, wrapped opaquely
    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, HierarchyError>;
