//! An in-memory organization directory

use std::{collections::HashMap, convert::TryFrom, sync::Arc};

use arc_swap::ArcSwap;

use crate::{
    collaborators::{OrganizationManagementError, OrganizationResolver},
    OrganizationId, OrganizationIdRef, TenantDomain, TenantDomainRef,
};

/// A snapshot of an organization hierarchy
///
/// Each organization is associated with the tenant it owns and, unless it is
/// a root organization, with its parent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrganizationHierarchy {
    tenants: HashMap<TenantDomain, OrganizationId>,
    parents: HashMap<OrganizationId, Option<OrganizationId>>,
}

impl OrganizationHierarchy {
    /// Constructs an empty hierarchy
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a root organization owning `tenant_domain`
    #[must_use]
    pub fn with_root(mut self, organization: OrganizationId, tenant_domain: TenantDomain) -> Self {
        self.insert(organization, None, tenant_domain);
        self
    }

    /// Adds an organization owning `tenant_domain` beneath `parent`
    #[must_use]
    pub fn with_child(
        mut self,
        parent: OrganizationId,
        organization: OrganizationId,
        tenant_domain: TenantDomain,
    ) -> Self {
        self.insert(organization, Some(parent), tenant_domain);
        self
    }

    /// Adds or replaces an organization
    ///
    /// A replaced organization no longer owns the tenant it was previously
    /// associated with.
    pub fn insert(
        &mut self,
        organization: OrganizationId,
        parent: Option<OrganizationId>,
        tenant_domain: TenantDomain,
    ) {
        self.tenants.retain(|_, owner| *owner != organization);
        self.tenants.insert(tenant_domain, organization.clone());
        self.parents.insert(organization, parent);
    }

    /// Whether the organization is known
    pub fn contains(&self, organization: &OrganizationIdRef) -> bool {
        self.parents.contains_key(organization)
    }

    /// The organization owning a tenant
    pub fn organization_for_tenant(
        &self,
        tenant_domain: &TenantDomainRef,
    ) -> Option<&OrganizationIdRef> {
        self.tenants.get(tenant_domain).map(|org| &**org)
    }

    /// The path from `organization` up to its root, starting with
    /// `organization` itself
    fn ancestry<'a>(&'a self, organization: &'a OrganizationIdRef) -> Vec<&'a OrganizationIdRef> {
        let mut path = vec![organization];
        let mut current = organization;

        // bounded in case a replacement introduced a cycle
        while path.len() <= self.parents.len() {
            match self.parents.get(current) {
                Some(Some(parent)) => {
                    current = &**parent;
                    path.push(current);
                }
                _ => break,
            }
        }

        path
    }

    /// The number of edges separating two organizations in the same branch
    ///
    /// The depth is `0` for an organization and itself, and positive when
    /// either organization is an ancestor of the other. Organizations in
    /// different branches have a depth of `-1`.
    ///
    /// # Errors
    ///
    /// Returns an error if either organization is unknown.
    pub fn relative_depth(
        &self,
        first: &OrganizationIdRef,
        second: &OrganizationIdRef,
    ) -> Result<i32, OrganizationManagementError> {
        for organization in [first, second].iter() {
            if !self.contains(organization) {
                return Err(OrganizationManagementError::OrganizationNotFound {
                    organization_id: (*organization).to_owned(),
                });
            }
        }

        let position = |descendant: &OrganizationIdRef, ancestor: &OrganizationIdRef| {
            self.ancestry(descendant)
                .iter()
                .position(|org| *org == ancestor)
        };

        let depth = position(second, first).or_else(|| position(first, second));

        Ok(depth.map_or(-1, |d| i32::try_from(d).unwrap_or(i32::MAX)))
    }
}

/// An organization resolver backed by an in-memory hierarchy
///
/// The hierarchy may be replaced at any time without blocking concurrent
/// lookups; each lookup observes a consistent snapshot.
#[derive(Debug)]
pub struct OrganizationDirectory {
    hierarchy: ArcSwap<OrganizationHierarchy>,
}

impl OrganizationDirectory {
    /// Constructs a directory over the given hierarchy
    pub fn new(hierarchy: OrganizationHierarchy) -> Self {
        Self {
            hierarchy: ArcSwap::from_pointee(hierarchy),
        }
    }

    /// The current hierarchy snapshot
    pub fn hierarchy(&self) -> Arc<OrganizationHierarchy> {
        self.hierarchy.load_full()
    }

    /// Replaces the hierarchy
    pub fn set_hierarchy(&self, hierarchy: OrganizationHierarchy) {
        self.hierarchy.store(Arc::new(hierarchy));
        tracing::debug!("organization hierarchy replaced");
    }

    /// Adds or replaces a single organization
    pub fn insert(
        &self,
        organization: OrganizationId,
        parent: Option<OrganizationId>,
        tenant_domain: TenantDomain,
    ) {
        self.hierarchy.rcu(|current| {
            let mut next = OrganizationHierarchy::clone(current);
            next.insert(organization.clone(), parent.clone(), tenant_domain.clone());
            next
        });
    }
}

impl Default for OrganizationDirectory {
    fn default() -> Self {
        Self::new(OrganizationHierarchy::default())
    }
}

impl OrganizationResolver for OrganizationDirectory {
    fn resolve_organization_id(
        &self,
        tenant_domain: &TenantDomainRef,
    ) -> Result<OrganizationId, OrganizationManagementError> {
        self.hierarchy
            .load()
            .organization_for_tenant(tenant_domain)
            .map(ToOwned::to_owned)
            .ok_or_else(|| OrganizationManagementError::OrganizationNotFoundForTenant {
                tenant_domain: tenant_domain.to_owned(),
            })
    }

    fn relative_depth_in_same_branch(
        &self,
        first: &OrganizationIdRef,
        second: &OrganizationIdRef,
    ) -> Result<i32, OrganizationManagementError> {
        self.hierarchy.load().relative_depth(first, second)
    }
}
