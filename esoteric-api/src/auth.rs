//! Identity extraction.
//!
//! Authentication is performed by an identity-aware proxy in front of the
//! service. The proxy forwards the subject claim in a configurable header and
//! the optional profile claims in fixed `x-user-*` headers. Extracting an
//! [`AuthenticatedUser`] stores those claims, so every authenticated handler
//! runs with the user row present.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderName};
use esoteric_shared::UpsertUser;

use crate::errors::ApiError;
use crate::server::state::AppState;

pub const DEFAULT_USER_HEADER: &str = "x-user-id";
pub const EMAIL_HEADER: &str = "x-user-email";
pub const FIRST_NAME_HEADER: &str = "x-user-first-name";
pub const LAST_NAME_HEADER: &str = "x-user-last-name";
pub const PROFILE_IMAGE_HEADER: &str = "x-user-profile-image";

/// Optional claim headers a browser client may send.
pub const PROFILE_HEADERS: [&str; 4] = [
    EMAIL_HEADER,
    FIRST_NAME_HEADER,
    LAST_NAME_HEADER,
    PROFILE_IMAGE_HEADER,
];

/// The caller of an authenticated route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl AuthenticatedUser {
    /// Read the identity from request headers.
    ///
    /// Returns `None` when the subject header is missing, blank or not
    /// valid visible ASCII.
    pub fn from_headers(headers: &HeaderMap, subject_header: &HeaderName) -> Option<Self> {
        let id = header_value(headers, subject_header.as_str())?;
        Some(Self {
            id,
            email: header_value(headers, EMAIL_HEADER),
            first_name: header_value(headers, FIRST_NAME_HEADER),
            last_name: header_value(headers, LAST_NAME_HEADER),
            profile_image_url: header_value(headers, PROFILE_IMAGE_HEADER),
        })
    }

    /// The claims to store for this user.
    pub fn to_upsert(&self) -> UpsertUser {
        UpsertUser {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            profile_image_url: self.profile_image_url.clone(),
        }
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = Self::from_headers(&parts.headers, &state.auth_header)
            .ok_or(ApiError::Unauthorized)?;

        state
            .users
            .upsert_user(&user.to_upsert())
            .await
            .map_err(|e| ApiError::internal("Failed to authenticate user", e))?;

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn subject() -> HeaderName {
        HeaderName::from_static(DEFAULT_USER_HEADER)
    }

    #[test]
    fn test_identity_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(DEFAULT_USER_HEADER, HeaderValue::from_static("auth0|42"));
        headers.insert(EMAIL_HEADER, HeaderValue::from_static("seer@example.com"));
        headers.insert(LAST_NAME_HEADER, HeaderValue::from_static("   "));

        let user = AuthenticatedUser::from_headers(&headers, &subject()).unwrap();
        assert_eq!(user.id, "auth0|42");
        assert_eq!(user.email.as_deref(), Some("seer@example.com"));
        assert_eq!(user.last_name, None);

        let upsert = user.to_upsert();
        assert_eq!(upsert.id, "auth0|42");
        assert_eq!(upsert.first_name, None);
    }

    #[test]
    fn test_missing_or_blank_subject() {
        let mut headers = HeaderMap::new();
        assert!(AuthenticatedUser::from_headers(&headers, &subject()).is_none());

        headers.insert(DEFAULT_USER_HEADER, HeaderValue::from_static(" "));
        assert!(AuthenticatedUser::from_headers(&headers, &subject()).is_none());
    }

    #[test]
    fn test_custom_subject_header() {
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-user", HeaderValue::from_static("alice"));

        let custom = HeaderName::from_static("x-forwarded-user");
        assert!(AuthenticatedUser::from_headers(&headers, &subject()).is_none());
        assert_eq!(
            AuthenticatedUser::from_headers(&headers, &custom).unwrap().id,
            "alice"
        );
    }
}
