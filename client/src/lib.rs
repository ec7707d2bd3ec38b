//! ConnectLife client library
//!
//! Device communication core for the ConnectLife appliance cloud: the signed
//! request transport, the OAuth2 token lifecycle and the device schema
//! registry that turns raw telemetry into typed attributes.

pub mod app;
pub mod authn;
pub mod cache;
pub mod errors;
pub mod filesys;
pub mod http;
pub mod logs;
pub mod models;
pub mod schema;
pub mod storage;
pub mod utils;

pub use app::client::DeviceClient;
pub use errors::ClientError;
