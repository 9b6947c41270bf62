pub mod json;
pub mod onesky;
pub mod xlsx;
