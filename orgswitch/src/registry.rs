//! Dispatch of token requests to registered grant handlers

use std::collections::HashMap;

use orgswitch_traits::GrantHandler;

use crate::{
    AccessTokenResponse, GrantError, GrantType, GrantTypeRef, OrganizationSwitchGrant,
    TokenRequestContext,
};

/// A grant handler known to a [`GrantRegistry`]
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum RegisteredGrant {
    /// The organization switch grant
    OrganizationSwitch(OrganizationSwitchGrant),
}

impl From<OrganizationSwitchGrant> for RegisteredGrant {
    #[inline]
    fn from(grant: OrganizationSwitchGrant) -> Self {
        Self::OrganizationSwitch(grant)
    }
}

impl GrantHandler for RegisteredGrant {
    type Context = TokenRequestContext;
    type Response = AccessTokenResponse;
    type Error = GrantError;

    fn grant_type(&self) -> &str {
        match self {
            Self::OrganizationSwitch(grant) => grant.grant_type(),
        }
    }

    fn validate_grant(&self, context: &mut TokenRequestContext) -> Result<(), GrantError> {
        match self {
            Self::OrganizationSwitch(grant) => grant.validate_grant(context),
        }
    }

    fn issue(&self, context: &mut TokenRequestContext) -> Result<AccessTokenResponse, GrantError> {
        match self {
            Self::OrganizationSwitch(grant) => grant.issue(context),
        }
    }
}

/// Routes token requests to the grant registered for their grant type
#[derive(Clone, Debug, Default)]
pub struct GrantRegistry {
    grants: HashMap<GrantType, RegisteredGrant>,
}

impl GrantRegistry {
    /// Constructs an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a grant under the grant type it reports
    ///
    /// Returns the grant previously registered for that grant type, if any.
    pub fn register(&mut self, grant: impl Into<RegisteredGrant>) -> Option<RegisteredGrant> {
        let grant = grant.into();
        let grant_type = GrantType::from(grant.grant_type());
        tracing::debug!(%grant_type, "registering grant handler");
        self.grants.insert(grant_type, grant)
    }

    /// Registers a grant, returning the registry
    #[must_use]
    pub fn with_grant(mut self, grant: impl Into<RegisteredGrant>) -> Self {
        self.register(grant);
        self
    }

    /// The grant registered for a grant type
    pub fn get(&self, grant_type: &GrantTypeRef) -> Option<&RegisteredGrant> {
        self.grants.get(grant_type)
    }

    /// Validates and, if valid, issues a token for the request in `context`
    ///
    /// # Errors
    ///
    /// Returns [`GrantError::UnsupportedGrantType`] if no grant is registered
    /// for the request's grant type, or the error raised by the grant.
    #[tracing::instrument(
        skip_all,
        fields(
            grant_type = %context.request().grant_type,
            client_id = %context.request().client_id,
        ),
    )]
    pub fn handle(
        &self,
        context: &mut TokenRequestContext,
    ) -> Result<AccessTokenResponse, GrantError> {
        let grant_type = &context.request().grant_type;
        let grant = self.get(grant_type).ok_or_else(|| {
            tracing::debug!("no grant handler registered");
            GrantError::UnsupportedGrantType {
                grant_type: grant_type.clone(),
            }
        })?;

        grant.validate_grant(context)?;
        grant.issue(context)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use color_eyre::Result;

    use super::*;
    use crate::{
        test::{self, FixedResolver, FixedStore, FixedValidator, RecordingIssuer},
        AccessTokenRequest, ClientId, OrganizationSwitchConfig, Scope,
    };

    fn grant(issuer: Arc<RecordingIssuer>) -> OrganizationSwitchGrant {
        OrganizationSwitchGrant::new(
            OrganizationSwitchConfig::default(),
            Arc::new(FixedValidator::valid(test::SUBJECT)),
            Arc::new(FixedStore::with(test::record())),
            Arc::new(FixedResolver::with_depth(1).with_tenant(test::TENANT, test::ORG_A)),
            issuer,
        )
    }

    #[test]
    fn registers_under_reported_grant_type() {
        let registry =
            GrantRegistry::new().with_grant(grant(Arc::new(RecordingIssuer::default())));

        assert!(registry
            .get(&GrantType::from_static("organization_switch"))
            .is_some());
        assert!(registry
            .get(&GrantType::from_static("authorization_code"))
            .is_none());
    }

    #[test]
    fn registering_again_replaces_previous_grant() {
        let mut registry = GrantRegistry::new();

        assert!(registry
            .register(grant(Arc::new(RecordingIssuer::default())))
            .is_none());
        assert!(registry
            .register(grant(Arc::new(RecordingIssuer::default())))
            .is_some());
    }

    #[test]
    fn handles_registered_grant() -> Result<()> {
        let issuer = Arc::new(RecordingIssuer::default());
        let registry = GrantRegistry::new().with_grant(grant(issuer.clone()));
        let mut context =
            TokenRequestContext::new(test::switch_request(test::TOKEN, test::ORG_B));

        let response = registry.handle(&mut context)?;

        assert_eq!(response.scope, Scope::from_space_delimited(test::SCOPE));
        assert_eq!(issuer.issued().len(), 1);
        Ok(())
    }

    #[test]
    fn rejects_unknown_grant_type() {
        let registry =
            GrantRegistry::new().with_grant(grant(Arc::new(RecordingIssuer::default())));
        let mut context = TokenRequestContext::new(AccessTokenRequest::new(
            GrantType::from_static("password"),
            ClientId::from_static("console"),
            Scope::empty(),
        ));

        let err = registry.handle(&mut context).unwrap_err();

        assert!(matches!(
            err,
            GrantError::UnsupportedGrantType { ref grant_type } if grant_type.as_str() == "password"
        ));
        assert_eq!(err.error_code(), "unsupported_grant_type");
    }

    #[test]
    fn failed_validation_skips_issuance() {
        let issuer = Arc::new(RecordingIssuer::default());
        let registry = GrantRegistry::new().with_grant(grant(issuer.clone()));
        let mut context =
            TokenRequestContext::new(test::switch_request(test::TOKEN, test::ORG_A));

        let err = registry.handle(&mut context).unwrap_err();

        assert!(matches!(err, GrantError::AlreadyIssuedForOrganization { .. }));
        assert!(issuer.issued().is_empty());
    }
}
