//! vitalcall-bedrock
//!
//! Vitals summaries generated through the Bedrock Converse API.

pub mod client;
pub mod error;
pub mod prompt;
pub mod summarize;
pub mod tokens;
pub mod validate;

pub use summarize::BedrockSummarizer;
