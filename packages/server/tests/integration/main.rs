mod common;

mod auth;
mod entry;
mod prediction;
