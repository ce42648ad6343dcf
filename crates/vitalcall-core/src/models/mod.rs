pub mod call;
pub mod digest;
pub mod reading;
pub mod risk;
pub mod summary;
pub mod token_count;
pub mod vital;
