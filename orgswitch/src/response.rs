//! DTOs returned by the token endpoint

use serde::{Deserialize, Serialize};

use crate::{Scope, TokenIdentifier};

/// A successful token response as defined in
/// [RFC 6749, Section 5.1](https://datatracker.ietf.org/doc/html/rfc6749#section-5.1)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenResponse {
    /// The issued access token
    pub access_token: TokenIdentifier,

    /// The token type, generally `Bearer`
    pub token_type: String,

    /// The lifetime of the access token, in seconds
    pub expires_in: u64,

    /// A refresh token, if one was issued
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<TokenIdentifier>,

    /// The scope granted to the access token
    #[serde(default, skip_serializing_if = "Scope::is_empty")]
    pub scope: Scope,
}

/// An error response as defined in
/// [RFC 6749, Section 5.2](https://datatracker.ietf.org/doc/html/rfc6749#section-5.2)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The OAuth2 error code
    pub error: String,

    /// A human-readable description of the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
}
