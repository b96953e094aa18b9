//! Shared building blocks for the barkeep domain crates: the error
//! taxonomy every operation reports through, and the tenant identifier
//! that scopes stored state. No IO and no infrastructure concerns.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::TenantId;
