//! Access token records and the bindings they carry

use serde::{Deserialize, Serialize};

use crate::{AuthenticatedUser, Scope, TokenBindingValue, TokenIdentifier};

/// Ties a token to a specific client context, such as a device or a browser
/// session
///
/// The binding is opaque to the grant: it is read from the presented token
/// and attached unchanged to the newly issued one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenBinding {
    /// The binding mechanism, for example `cookie` or `sso-session`
    pub binding_type: String,

    /// A reference correlating tokens issued under the same binding
    pub binding_reference: String,

    /// The bound value
    pub binding_value: TokenBindingValue,
}

impl TokenBinding {
    /// Constructs a new token binding
    pub fn new(
        binding_type: impl Into<String>,
        binding_reference: impl Into<String>,
        binding_value: TokenBindingValue,
    ) -> Self {
        Self {
            binding_type: binding_type.into(),
            binding_reference: binding_reference.into(),
            binding_value,
        }
    }
}

/// A persisted access token, as known to the token store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessTokenRecord {
    /// The token identifier
    pub token: TokenIdentifier,

    /// The user the token was issued to
    pub authorized_user: AuthenticatedUser,

    /// The scope granted to the token
    #[serde(default)]
    pub scope: Scope,

    /// The binding attached to the token, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_binding: Option<TokenBinding>,
}

impl AccessTokenRecord {
    /// Constructs an unbound record
    pub fn new(token: TokenIdentifier, authorized_user: AuthenticatedUser, scope: Scope) -> Self {
        Self {
            token,
            authorized_user,
            scope,
            token_binding: None,
        }
    }

    /// Attaches a binding to the record
    #[must_use]
    pub fn with_token_binding(mut self, token_binding: TokenBinding) -> Self {
        self.token_binding = Some(token_binding);
        self
    }
}
