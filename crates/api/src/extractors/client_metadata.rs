//! Client metadata extractor for tracking beacons.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use domain::models::ClientMetadata;

/// Proxy header carrying the original client address.
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

/// Fallback proxy header with a single client address.
pub const REAL_IP_HEADER: &str = "x-real-ip";

/// Country code set by the CDN in front of the service.
pub const COUNTRY_HEADER: &str = "cf-ipcountry";

/// Longest header value copied into a tracking row.
const MAX_HEADER_VALUE_LENGTH: usize = 512;

/// Request metadata recorded with downloads and page views.
///
/// Never rejects: missing or unreadable headers are simply absent.
#[derive(Debug, Clone, Default)]
pub struct ClientMeta(pub ClientMetadata);

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(MAX_HEADER_VALUE_LENGTH).collect())
}

/// First `X-Forwarded-For` entry, else `X-Real-IP`.
fn client_ip(headers: &HeaderMap) -> Option<String> {
    header_value(headers, FORWARDED_FOR_HEADER)
        .and_then(|list| {
            list.split(',')
                .next()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        })
        .or_else(|| header_value(headers, REAL_IP_HEADER))
}

pub fn metadata_from_headers(headers: &HeaderMap) -> ClientMetadata {
    ClientMetadata {
        ip_address: client_ip(headers),
        user_agent: header_value(headers, header::USER_AGENT.as_str()),
        referrer: header_value(headers, header::REFERER.as_str()),
        country: header_value(headers, COUNTRY_HEADER),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for ClientMeta
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(ClientMeta(metadata_from_headers(&parts.headers)))
    }
}
