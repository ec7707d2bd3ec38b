//! Signed transport to the ConnectLife API

pub mod client;
pub mod devices;
pub mod envelope;
pub mod params;
pub mod signing;
