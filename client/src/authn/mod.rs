//! OAuth2 authentication

pub mod oauth;
pub mod token;
pub mod token_mngr;
