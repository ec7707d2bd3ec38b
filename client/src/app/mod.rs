//! Device client composition

pub mod client;
pub mod discovery;
