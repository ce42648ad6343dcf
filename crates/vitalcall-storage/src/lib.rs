//! vitalcall-storage
//!
//! Reading and call-record stores: in-memory for tests and demos, S3 for
//! deployments. Thin wrapper around the AWS S3 SDK.

pub mod calls;
pub mod client;
pub mod error;
pub mod objects;
pub mod readings;
pub mod state;
