//! Errors raised while handling a grant

use thiserror::Error;

use crate::{
    collaborators::{BoxError, OrganizationManagementError},
    ErrorResponse, GrantType, OrganizationId, TenantDomain,
};

/// An error raised while validating a grant or issuing its token
///
/// Errors are either the fault of the client, in which case the grant is
/// rejected, or the fault of the server or one of its collaborators. Server
/// errors retain the underlying failure as their source.
#[derive(Debug, Error)]
pub enum GrantError {
    /// A required request parameter was missing or empty
    #[error("missing required parameter '{parameter}'")]
    MissingParameter {
        /// The name of the missing parameter
        parameter: String,
    },

    /// No handler is registered for the requested grant type
    #[error("unsupported grant type '{grant_type}'")]
    UnsupportedGrantType {
        /// The requested grant type
        grant_type: GrantType,
    },

    /// The presented token did not pass validation
    #[error("Invalid token received")]
    InvalidGrant,

    /// The presented token was issued for the organization being switched to
    #[error("Provided token was already issued for the requested organization.")]
    AlreadyIssuedForOrganization {
        /// The requested organization
        organization_id: OrganizationId,
    },

    /// The requested organization is not in the same branch as the
    /// organization the presented token was issued for
    #[error("Organization switch is only allowed for the organizations in the same branch.")]
    CrossBranchSwitch {
        /// The organization the presented token was issued for
        source_organization: OrganizationId,
        /// The requested organization
        target_organization: OrganizationId,
    },

    /// The organization of the token's tenant could not be resolved
    #[error("Error while resolving the organization of tenant '{tenant_domain}'")]
    OrganizationResolution {
        /// The tenant of the presented token
        tenant_domain: TenantDomain,
        /// The resolver failure
        #[source]
        source: OrganizationManagementError,
    },

    /// The hierarchy could not be queried to decide whether the switch is
    /// allowed
    #[error("Error while checking organizations allowed to switch")]
    SwitchEligibilityCheck(#[source] OrganizationManagementError),

    /// The token validation service failed
    #[error("Error while validating the presented token")]
    TokenValidation(#[source] BoxError),

    /// The token store failed
    #[error("Error while retrieving the presented token")]
    TokenLookup(#[source] BoxError),

    /// The issuer failed to mint a token
    #[error("Error while issuing the access token")]
    Issuance(#[source] BoxError),
}

impl GrantError {
    /// Whether the error results from an invalid client request
    ///
    /// Client errors reject the grant; they are not retried and are not
    /// indicative of a problem with the server.
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingParameter { .. }
                | Self::UnsupportedGrantType { .. }
                | Self::InvalidGrant
                | Self::AlreadyIssuedForOrganization { .. }
                | Self::CrossBranchSwitch { .. }
        )
    }

    /// The OAuth2 error code reported to the client
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => "invalid_request",
            Self::UnsupportedGrantType { .. } => "unsupported_grant_type",
            Self::InvalidGrant
            | Self::AlreadyIssuedForOrganization { .. }
            | Self::CrossBranchSwitch { .. } => "invalid_grant",
            Self::OrganizationResolution { .. }
            | Self::SwitchEligibilityCheck(_)
            | Self::TokenValidation(_)
            | Self::TokenLookup(_)
            | Self::Issuance(_) => "server_error",
        }
    }

    /// Converts the error into a response suitable for the client
    ///
    /// Server errors are reported without their cause.
    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.error_code().to_owned(),
            error_description: Some(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as StdError;

    use super::*;

    #[test]
    fn client_errors_are_invalid_grants() {
        let err = GrantError::CrossBranchSwitch {
            source_organization: OrganizationId::from_static("org-a"),
            target_organization: OrganizationId::from_static("org-c"),
        };

        assert!(err.is_client_error());
        assert_eq!(
            err.to_error_response(),
            ErrorResponse {
                error: "invalid_grant".to_owned(),
                error_description: Some(
                    "Organization switch is only allowed for the organizations in the same branch."
                        .to_owned()
                ),
            }
        );
    }

    #[test]
    fn missing_parameter_is_invalid_request() {
        let err = GrantError::MissingParameter {
            parameter: "token".to_owned(),
        };

        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "invalid_request");
    }

    #[test]
    fn server_errors_preserve_cause() {
        let err = GrantError::OrganizationResolution {
            tenant_domain: TenantDomain::from_static("acme.com"),
            source: OrganizationManagementError::OrganizationNotFoundForTenant {
                tenant_domain: TenantDomain::from_static("acme.com"),
            },
        };

        assert!(!err.is_client_error());
        assert_eq!(err.error_code(), "server_error");

        let cause = err
            .source()
            .and_then(|e| e.downcast_ref::<OrganizationManagementError>());
        assert!(matches!(
            cause,
            Some(OrganizationManagementError::OrganizationNotFoundForTenant { .. })
        ));
    }
}
