//! vitalcall-telephony
//!
//! Outbound call placement: the Twilio REST dispatcher, a stub dispatcher
//! for running without credentials, and the TwiML served to Twilio when
//! the provider answers.

pub mod error;
pub mod status;
pub mod stub;
pub mod twilio;
pub mod twiml;

pub use stub::StubDispatcher;
pub use twilio::{TwilioConfig, TwilioDispatcher};
