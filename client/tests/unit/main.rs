//! Integration tests for the ConnectLife client

mod common;
mod test_device_client;
mod test_transport;
