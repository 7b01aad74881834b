pub mod contest;
pub mod errors;
