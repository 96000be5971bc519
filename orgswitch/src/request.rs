//! Token requests and their parameters

use serde::{Deserialize, Serialize};

use crate::{ClientId, GrantType, OrganizationId, Scope, TokenIdentifier};

/// A raw request parameter as received by the token endpoint
///
/// A key may be associated with any number of values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestParameter {
    /// The parameter name
    pub key: String,

    /// The values sent for the parameter, in request order
    #[serde(default)]
    pub values: Vec<String>,
}

impl RequestParameter {
    /// Constructs a parameter with a single value
    pub fn single(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            values: vec![value.into()],
        }
    }
}

/// A request made to the OAuth2 token endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenRequest {
    /// The requested grant type
    pub grant_type: GrantType,

    /// The authenticated client making the request
    pub client_id: ClientId,

    /// The scope requested for the new token
    #[serde(default)]
    pub scope: Scope,

    /// All parameters sent with the request
    #[serde(default)]
    pub request_parameters: Vec<RequestParameter>,
}

impl AccessTokenRequest {
    /// Constructs a request without any additional parameters
    pub fn new(grant_type: GrantType, client_id: ClientId, scope: Scope) -> Self {
        Self {
            grant_type,
            client_id,
            scope,
            request_parameters: Vec::new(),
        }
    }

    /// Adds a parameter to the request
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request_parameters
            .push(RequestParameter::single(key, value));
        self
    }

    /// Gets the first value of the parameter named `key`
    ///
    /// Keys are matched exactly. Returns `None` if no parameter named `key`
    /// carries a value.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        extract_parameter(&self.request_parameters, key)
    }
}

/// Gets the first value of the first parameter named `key` that has one
pub fn extract_parameter<'a>(parameters: &'a [RequestParameter], key: &str) -> Option<&'a str> {
    parameters
        .iter()
        .filter(|p| p.key == key)
        .find_map(|p| p.values.first())
        .map(String::as_str)
}

/// The parameters specific to an organization switch
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrganizationSwitchRequest {
    /// The token being exchanged
    pub token: TokenIdentifier,

    /// The organization to switch into
    pub switching_organization: OrganizationId,
}
