//! vitalcall-audit
//!
//! Application-level audit events for the call pipeline.

pub mod events;
