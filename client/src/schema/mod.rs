//! Device capability schemas

pub mod attribute;
pub mod codec;
pub mod registry;
pub mod tables;
