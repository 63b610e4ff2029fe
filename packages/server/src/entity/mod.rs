pub mod entry;
pub mod prediction;
pub mod result;
pub mod user;
