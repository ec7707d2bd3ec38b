//! Vendor request signing
//!
//! Every API call carries an HMAC-SHA256 signature over a small signing
//! string built from the app id, the method, the path with its query, the
//! `Date` header and the `hi-params-encrypt` header:
//!
//! ```text
//! {appId}\n{METHOD} {pathAndQuery}\ndate: {gmtDate}\nhi-params-encrypt: {appId}\n
//! ```
//!
//! The server rejects the call unless the signing string, the `Authorization`
//! layout and the body digest match byte for byte.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::{Position, Url};

use crate::utils::sha256_base64;

type HmacSha256 = Hmac<Sha256>;

/// Name of the signed application header
pub const SIGN_HEADER: &str = "hi-params-encrypt";

/// Digest sent for requests without a body (SHA-256 of the empty string)
pub const EMPTY_BODY_DIGEST: &str = "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU=";

/// RFC 1123 style date as used in the `Date` header
pub fn gmt_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// The URL with scheme and host stripped, query kept
pub fn path_and_query(url: &Url) -> &str {
    &url[Position::BeforePath..]
}

/// Build the string that gets signed
pub fn signing_string(app_id: &str, method: &str, path: &str, date: &str) -> String {
    format!(
        "{}\n{} {}\ndate: {}\n{}: {}\n",
        app_id, method, path, date, SIGN_HEADER, app_id
    )
}

/// Base64 HMAC-SHA256 of `signing_string` keyed by the app secret
pub fn compute_signature(app_secret: &str, signing_string: &str) -> String {
    // HMAC accepts keys of any length, the error branch is unreachable
    let mut mac = match HmacSha256::new_from_slice(app_secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return String::new(),
    };
    mac.update(signing_string.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Base64 SHA-256 of the exact body string, or the empty-body constant
pub fn body_digest(body: Option<&str>) -> String {
    match body {
        Some(body) if !body.is_empty() => sha256_base64(body.as_bytes()),
        _ => EMPTY_BODY_DIGEST.to_string(),
    }
}

/// `Authorization` header value.
///
/// The missing space before `algorithm` is part of the vendor format.
pub fn authorization_header(signature: &str, app_id: &str) -> String {
    format!(
        "Signature signature=\"{}\", keyId=\"{}\",algorithm=\"hmac-sha256\", headers=\"@request-target date {}\"",
        signature, app_id, SIGN_HEADER
    )
}

/// The headers of one signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub authorization: String,
    pub digest: String,
}

/// Sign a request for `url` sent at `now`
pub fn sign(
    app_id: &str,
    app_secret: &str,
    method: &str,
    url: &Url,
    body: Option<&str>,
    now: DateTime<Utc>,
) -> SignedHeaders {
    let date = gmt_date(now);
    let to_sign = signing_string(app_id, method, path_and_query(url), &date);
    let signature = compute_signature(app_secret, &to_sign);

    SignedHeaders {
        authorization: authorization_header(&signature, app_id),
        digest: format!("SHA-256={}", body_digest(body)),
        date,
    }
}
