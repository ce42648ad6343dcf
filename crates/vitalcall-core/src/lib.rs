//! vitalcall-core
//!
//! Pure domain types, call lifecycle rules, and the contracts every
//! collaborator implements. No AWS SDK or HTTP dependency; this is the
//! shared vocabulary of the VitalCall system.

pub mod error;
pub mod models;
pub mod ports;
pub mod s3_keys;

pub use error::{CollaboratorError, FailureKind};
pub use ports::BoxFuture;
