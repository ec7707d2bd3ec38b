//! Persistent state: layout, settings and the token file

pub mod layout;
pub mod settings;
pub mod token;
