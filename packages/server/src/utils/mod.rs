pub mod entry;
pub mod jwt;
