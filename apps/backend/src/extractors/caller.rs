use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// Identity of the client making the request: its IP address.
///
/// Sessions record the creating caller as their owner; mutations compare
/// against it. This is an ownership check, not authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Caller(pub String);

impl Caller {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let info = req.connection_info();
        let result = info
            .realip_remote_addr()
            .map(|addr| Caller(strip_port(addr).to_string()))
            .ok_or_else(|| {
                AppError::bad_request(ErrorCode::BadRequest, "Unable to determine client address")
            });
        ready(result)
    }
}

/// `1.2.3.4:5678` -> `1.2.3.4`, `[::1]:80` -> `::1`; bare addresses pass through.
fn strip_port(addr: &str) -> &str {
    if let Some(rest) = addr.strip_prefix('[') {
        return rest.split(']').next().unwrap_or(rest);
    }
    match addr.rsplit_once(':') {
        // More than one colon without brackets: a bare IPv6 address.
        Some((host, _)) if !host.contains(':') => host,
        _ => addr,
    }
}
