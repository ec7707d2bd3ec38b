//! Caches

pub mod properties;
