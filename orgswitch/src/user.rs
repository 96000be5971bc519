//! Authenticated users and the principals derived from them

use serde::{Deserialize, Serialize};

use crate::{OrganizationId, OrganizationIdRef, TenantDomain, TenantDomainRef};

const USER_STORE_SEPARATOR: char = '/';
const TENANT_SEPARATOR: char = '@';

/// A user authenticated by the platform
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthenticatedUser {
    /// The subject identifier asserted for the user
    pub subject: String,

    /// The user name, without user store or tenant qualifiers
    pub user_name: String,

    /// The tenant in which the user authenticated
    pub tenant_domain: TenantDomain,

    /// The user store holding the user, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_store_domain: Option<String>,

    /// Whether the user was authenticated by a federated identity provider
    #[serde(default)]
    pub federated: bool,

    /// The organization the user's token currently operates against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessing_organization: Option<OrganizationId>,

    /// The organization in which the user's identity natively lives
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_resident_organization: Option<OrganizationId>,
}

impl AuthenticatedUser {
    /// Constructs a local user in the given tenant
    pub fn new(user_name: impl Into<String>, tenant_domain: TenantDomain) -> Self {
        let user_name = user_name.into();
        Self {
            subject: format!("{}{}{}", user_name, TENANT_SEPARATOR, tenant_domain),
            user_name,
            tenant_domain,
            user_store_domain: None,
            federated: false,
            accessing_organization: None,
            user_resident_organization: None,
        }
    }

    /// Constructs a local user from a subject identifier
    ///
    /// The subject identifier takes the form `[USER_STORE/]user_name[@tenant]`.
    /// The tenant is taken from the text following the last `@`; if there is
    /// none, or it is empty, the user is placed in `default_tenant`.
    pub fn from_subject_identifier(subject: &str, default_tenant: &TenantDomainRef) -> Self {
        let (qualified_name, tenant_domain) = match subject.rsplit_once(TENANT_SEPARATOR) {
            Some((name, "")) if !name.is_empty() => (name, default_tenant.to_owned()),
            Some((name, tenant)) if !name.is_empty() => (name, TenantDomain::from(tenant)),
            _ => (subject, default_tenant.to_owned()),
        };

        let (user_store_domain, user_name) = match qualified_name.split_once(USER_STORE_SEPARATOR)
        {
            Some((domain, name)) if !domain.is_empty() => (Some(domain.to_owned()), name),
            _ => (None, qualified_name),
        };

        Self {
            subject: subject.to_owned(),
            user_name: user_name.to_owned(),
            tenant_domain,
            user_store_domain,
            federated: false,
            accessing_organization: None,
            user_resident_organization: None,
        }
    }

    /// The user's resident organization, if one has been set and is not empty
    pub fn resident_organization(&self) -> Option<&OrganizationIdRef> {
        self.user_resident_organization
            .as_deref()
            .filter(|org| !org.as_str().is_empty())
    }
}

/// A principal re-scoped to operate against a different organization
///
/// The principal retains the identity of the user it was derived from while
/// pointing at the organization being switched into.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwitchedPrincipal {
    user: AuthenticatedUser,
    accessing_organization: OrganizationId,
    user_resident_organization: OrganizationId,
}

impl SwitchedPrincipal {
    /// Derives a principal for `target` from the original user
    ///
    /// The user's resident organization is preserved when the user already
    /// carries one, so that it does not drift across successive switches.
    /// Otherwise residency is anchored to `source`, the organization the
    /// presented token was issued for.
    pub fn derive(
        original: &AuthenticatedUser,
        source: &OrganizationIdRef,
        target: &OrganizationIdRef,
    ) -> Self {
        let user_resident_organization = original
            .resident_organization()
            .unwrap_or(source)
            .to_owned();

        Self {
            user: original.clone(),
            accessing_organization: target.to_owned(),
            user_resident_organization,
        }
    }

    /// The subject identifier of the underlying user
    #[inline]
    pub fn subject(&self) -> &str {
        &self.user.subject
    }

    /// The tenant of the underlying user
    #[inline]
    pub fn tenant_domain(&self) -> &TenantDomainRef {
        &self.user.tenant_domain
    }

    /// The organization the principal now operates against
    #[inline]
    pub fn accessing_organization(&self) -> &OrganizationIdRef {
        &self.accessing_organization
    }

    /// The organization in which the principal's identity lives
    #[inline]
    pub fn user_resident_organization(&self) -> &OrganizationIdRef {
        &self.user_resident_organization
    }
}

impl From<SwitchedPrincipal> for AuthenticatedUser {
    fn from(principal: SwitchedPrincipal) -> Self {
        Self {
            accessing_organization: Some(principal.accessing_organization),
            user_resident_organization: Some(principal.user_resident_organization),
            ..principal.user
        }
    }
}
