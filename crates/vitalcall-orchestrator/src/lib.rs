//! vitalcall-orchestrator
//!
//! Sequences reading lookup, risk assessment, summary generation, and call
//! dispatch into one operation, and owns every later change to the
//! resulting call record.

pub mod error;
pub mod orchestrate;
pub mod retry;

pub use error::OrchestrationError;
pub use orchestrate::{Orchestrator, PatientAssessment};
pub use retry::RetryPolicy;
