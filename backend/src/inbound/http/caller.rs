//! Caller identity extracted from trusted headers.
//!
//! The chat host authenticates members before forwarding commands, then sends
//! the member id and role ids as headers. `X-Caller-Id` is required;
//! `X-Caller-Roles` may be absent for members without roles.

use actix_web::dev::Payload;
use actix_web::http::header::HeaderMap;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{Ready, ready};
use serde_json::json;

use crate::domain::{Error, Member, MemberId, parse_role_list};

/// Header carrying the authenticated member id.
pub const CALLER_ID_HEADER: &str = "X-Caller-Id";
/// Header carrying the member's comma-separated role ids.
pub const CALLER_ROLES_HEADER: &str = "X-Caller-Roles";

/// Authenticated caller for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerContext(Member);

impl CallerContext {
    /// Take the member out of the extractor.
    pub fn into_member(self) -> Member {
        self.0
    }
}

fn header_error(header: &str, message: &str) -> Error {
    Error::invalid_input(message.to_owned()).with_details(json!({ "header": header }))
}

fn header_text<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, Error> {
    headers
        .get(name)
        .map(|value| {
            value
                .to_str()
                .map_err(|_| header_error(name, "caller header must be visible ASCII"))
        })
        .transpose()
}

/// Parse the caller headers into a member.
///
/// # Errors
///
/// Returns `InvalidInput` when the id header is missing or either header is
/// malformed.
pub fn caller_from_headers(headers: &HeaderMap) -> Result<Member, Error> {
    let id = header_text(headers, CALLER_ID_HEADER)?
        .ok_or_else(|| header_error(CALLER_ID_HEADER, "caller id header is required"))?
        .parse::<MemberId>()
        .map_err(|_| header_error(CALLER_ID_HEADER, "caller id must be an integer"))?;
    let roles = match header_text(headers, CALLER_ROLES_HEADER)? {
        Some(raw) => parse_role_list(raw)
            .map_err(|err| header_error(CALLER_ROLES_HEADER, &err.to_string()))?,
        None => Default::default(),
    };
    Ok(Member { id, roles })
}

impl FromRequest for CallerContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(caller_from_headers(req.headers()).map(CallerContext))
    }
}
