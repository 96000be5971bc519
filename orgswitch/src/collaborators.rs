//! Services the grant depends on but does not implement
//!
//! The host environment supplies implementations of these traits when
//! constructing an [`OrganizationSwitchGrant`][crate::OrganizationSwitchGrant].
//! Calls are synchronous; retries, timeouts and caching are the concern of
//! the implementation.

use std::error::Error as StdError;

use thiserror::Error;

use crate::{
    AccessTokenRecord, AccessTokenResponse, OrganizationId, OrganizationIdRef, TenantDomain,
    TenantDomainRef, TokenIdentifier, TokenIdentifierRef, TokenRequestContext,
};

/// A boxed error from a collaborating service
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// An additional parameter supplied to the token validation service
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenValidationContextParam {
    /// The parameter key
    pub key: String,

    /// The parameter value
    pub value: String,
}

/// A request to validate a presented token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenValidationRequest {
    /// The token to validate
    pub token: TokenIdentifier,

    /// The type of the token, such as `bearer`
    pub token_type: String,

    /// Additional validation context
    pub context: Vec<TokenValidationContextParam>,
}

/// The outcome of validating a token
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenValidation {
    /// Whether the token is valid
    pub valid: bool,

    /// The subject identifier of the user the token was issued to, when
    /// the token is valid
    pub authorized_user: Option<String>,
}

impl TokenValidation {
    /// A successful validation for the given subject
    pub fn valid(authorized_user: impl Into<String>) -> Self {
        Self {
            valid: true,
            authorized_user: Some(authorized_user.into()),
        }
    }

    /// A failed validation
    pub const fn invalid() -> Self {
        Self {
            valid: false,
            authorized_user: None,
        }
    }
}

/// Validates tokens presented to the token endpoint
pub trait TokenValidator: Send + Sync {
    /// Validates a token
    ///
    /// An invalid token is reported through [`TokenValidation::valid`]; an
    /// error indicates that validation itself could not be performed.
    fn validate(&self, request: &TokenValidationRequest) -> Result<TokenValidation, BoxError>;
}

/// Looks up persisted access tokens
pub trait AccessTokenStore: Send + Sync {
    /// Finds the record for an access token, if one exists
    fn find_access_token(
        &self,
        token: &TokenIdentifierRef,
    ) -> Result<Option<AccessTokenRecord>, BoxError>;
}

/// An error raised by an organization resolver
#[derive(Debug, Error)]
pub enum OrganizationManagementError {
    /// No organization is mapped to the tenant
    #[error("organization not found for tenant '{tenant_domain}'")]
    OrganizationNotFoundForTenant {
        /// The tenant that could not be resolved
        tenant_domain: TenantDomain,
    },

    /// The organization does not exist
    #[error("organization '{organization_id}' not found")]
    OrganizationNotFound {
        /// The unknown organization
        organization_id: OrganizationId,
    },

    /// The organization backend failed
    #[error("organization backend unavailable")]
    Backend(#[source] BoxError),
}

/// Resolves organizations and their place in the organization hierarchy
pub trait OrganizationResolver: Send + Sync {
    /// Resolves the organization mapped to a tenant
    ///
    /// # Errors
    ///
    /// Returns [`OrganizationManagementError::OrganizationNotFoundForTenant`]
    /// if the tenant has no organization.
    fn resolve_organization_id(
        &self,
        tenant_domain: &TenantDomainRef,
    ) -> Result<OrganizationId, OrganizationManagementError>;

    /// The relative depth between two organizations
    ///
    /// A non-negative depth indicates that the organizations lie in the same
    /// branch of the hierarchy. A negative depth indicates that they do not.
    fn relative_depth_in_same_branch(
        &self,
        first: &OrganizationIdRef,
        second: &OrganizationIdRef,
    ) -> Result<i32, OrganizationManagementError>;
}

/// Mints access tokens from a validated request context
pub trait TokenIssuer: Send + Sync {
    /// Issues a token for the principal and scope held by the context
    fn issue(&self, context: &TokenRequestContext) -> Result<AccessTokenResponse, BoxError>;
}
