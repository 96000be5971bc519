use std::{error::Error as StdError, fmt, sync::Arc};

use orgswitch_traits::{GrantHandler, Policy};

use crate::{
    collaborators::{
        AccessTokenStore, OrganizationResolver, TokenIssuer, TokenValidation,
        TokenValidationContextParam, TokenValidationRequest, TokenValidator,
    },
    policy::{OrganizationSwitch, SameBranchPolicy},
    AccessTokenRequest, AccessTokenResponse, AuthenticatedUser, GrantError, OrganizationId,
    OrganizationSwitchConfig, OrganizationSwitchRequest, SwitchedPrincipal, TenantDomainRef,
    TokenIdentifier, TokenIdentifierRef, TokenRequestContext,
};

/// The organization switch grant
///
/// Exchanges an access token issued for one organization for a token
/// scoped to another organization in the same branch of the organization
/// hierarchy, without re-authenticating the user.
///
/// The grant holds no per-request state, and may be shared freely between
/// threads.
#[derive(Clone)]
pub struct OrganizationSwitchGrant {
    config: OrganizationSwitchConfig,
    token_validator: Arc<dyn TokenValidator>,
    token_store: Arc<dyn AccessTokenStore>,
    organization_resolver: Arc<dyn OrganizationResolver>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl fmt::Debug for OrganizationSwitchGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrganizationSwitchGrant")
            .field("config", &self.config)
            .finish()
    }
}

impl OrganizationSwitchGrant {
    /// Constructs the grant from its collaborators
    pub fn new(
        config: OrganizationSwitchConfig,
        token_validator: Arc<dyn TokenValidator>,
        token_store: Arc<dyn AccessTokenStore>,
        organization_resolver: Arc<dyn OrganizationResolver>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            config,
            token_validator,
            token_store,
            organization_resolver,
            token_issuer,
        }
    }

    /// The grant's configuration
    #[inline]
    pub fn config(&self) -> &OrganizationSwitchConfig {
        &self.config
    }

    /// Extracts the token and target organization from the request
    ///
    /// # Errors
    ///
    /// Returns [`GrantError::MissingParameter`] if either parameter is
    /// missing or blank.
    pub fn extract_request(
        &self,
        request: &AccessTokenRequest,
    ) -> Result<OrganizationSwitchRequest, GrantError> {
        let token = required_parameter(request, &self.config.token_parameter)?;
        let switching_organization =
            required_parameter(request, &self.config.organization_parameter)?;

        Ok(OrganizationSwitchRequest {
            token: TokenIdentifier::from(token),
            switching_organization: OrganizationId::from(switching_organization),
        })
    }

    fn validate_token(&self, token: &TokenIdentifierRef) -> Result<TokenValidation, GrantError> {
        let request = TokenValidationRequest {
            token: token.to_owned(),
            token_type: self.config.token_type.clone(),
            context: vec![TokenValidationContextParam::default()],
        };

        self.token_validator
            .validate(&request)
            .map_err(GrantError::TokenValidation)
    }

    fn resolve_organization(
        &self,
        tenant_domain: &TenantDomainRef,
    ) -> Result<OrganizationId, GrantError> {
        self.organization_resolver
            .resolve_organization_id(tenant_domain)
            .map_err(|source| {
                let error: &dyn StdError = &source;
                tracing::warn!(%tenant_domain, error, "unable to resolve organization for tenant");
                GrantError::OrganizationResolution {
                    tenant_domain: tenant_domain.to_owned(),
                    source,
                }
            })
    }
}

fn required_parameter<'a>(request: &'a AccessTokenRequest, key: &str) -> Result<&'a str, GrantError> {
    request
        .parameter(key)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| GrantError::MissingParameter {
            parameter: key.to_owned(),
        })
}

impl GrantHandler for OrganizationSwitchGrant {
    type Context = TokenRequestContext;
    type Response = AccessTokenResponse;
    type Error = GrantError;

    fn grant_type(&self) -> &str {
        self.config.grant_type.as_str()
    }

    #[tracing::instrument(
        skip_all,
        fields(
            client_id = %context.request().client_id,
            switching_organization = tracing::field::Empty,
        ),
    )]
    fn validate_grant(&self, context: &mut TokenRequestContext) -> Result<(), GrantError> {
        let request = self.extract_request(context.request())?;
        tracing::Span::current().record(
            "switching_organization",
            &request.switching_organization.as_str(),
        );

        let validation = self.validate_token(&request.token)?;
        if !validation.valid {
            tracing::debug!("access token validation failed");
            return Err(GrantError::InvalidGrant);
        }

        tracing::debug!("access token validation success");

        let record = self
            .token_store
            .find_access_token(&request.token)
            .map_err(GrantError::TokenLookup)?;

        let (authorized_user, token_binding) = match record {
            Some(record) => (record.authorized_user, record.token_binding),
            None => {
                let subject = validation.authorized_user.ok_or(GrantError::InvalidGrant)?;
                tracing::debug!("no record for validated token; using asserted subject");
                let user = AuthenticatedUser::from_subject_identifier(
                    &subject,
                    &self.config.default_tenant_domain,
                );
                (user, None)
            }
        };

        let switch = OrganizationSwitch {
            source: self.resolve_organization(&authorized_user.tenant_domain)?,
            target: request.switching_organization,
        };

        SameBranchPolicy::new(self.organization_resolver.as_ref()).evaluate(&switch)?;

        let principal = SwitchedPrincipal::derive(&authorized_user, &switch.source, &switch.target);
        let scope = context.request().scope.clone();

        tracing::debug!(
            user = principal.subject(),
            accessing_organization = %principal.accessing_organization(),
            user_resident_organization = %principal.user_resident_organization(),
            scope = ?scope,
            "issuing an access token for switched organization"
        );

        context.set_authorized_user(principal.into());
        context.set_scope(scope);
        if let Some(binding) = token_binding {
            context.carry_token_binding(binding);
        }

        Ok(())
    }

    #[tracing::instrument(skip_all, fields(client_id = %context.request().client_id))]
    fn issue(&self, context: &mut TokenRequestContext) -> Result<AccessTokenResponse, GrantError> {
        if context.attach_carried_token_binding() {
            tracing::trace!("attached token binding carried from presented token");
        }

        self.token_issuer
            .issue(context)
            .map_err(GrantError::Issuance)
    }
}
