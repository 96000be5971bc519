#![allow(dead_code)]

use std::{
    collections::HashMap,
    io,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    },
};

use crate::{
    collaborators::{
        AccessTokenStore, BoxError, OrganizationManagementError, OrganizationResolver,
        TokenIssuer, TokenValidation, TokenValidationRequest, TokenValidator,
    },
    AccessTokenRecord, AccessTokenRequest, AccessTokenResponse, AuthenticatedUser, ClientId,
    GrantType, OrganizationId, OrganizationIdRef, Scope, TenantDomain, TenantDomainRef,
    TokenIdentifier, TokenIdentifierRef, TokenRequestContext,
};

pub const TOKEN: &str = "6a3f2c1e-9b8d-4e7f-a0c2-5d4e3f2a1b0c";
pub const SUBJECT: &str = "alice@acme.com";
pub const TENANT: &str = "acme.com";
pub const ORG_A: &str = "10084a8d-113f-4211-a0d5-efe36b082211";
pub const ORG_B: &str = "b3f6b1e2-7c1e-4c2b-9b8d-0f3c2a1d4e5f";
pub const SCOPE: &str = "openid internal_org_user_mgt_view profile";

pub fn switch_request(token: &str, organization: &str) -> AccessTokenRequest {
    AccessTokenRequest::new(
        GrantType::from_static("organization_switch"),
        ClientId::from_static("console"),
        Scope::from_space_delimited(SCOPE),
    )
    .with_parameter("token", token)
    .with_parameter("switching_organization", organization)
}

pub fn record() -> AccessTokenRecord {
    AccessTokenRecord::new(
        TokenIdentifier::from_static(TOKEN),
        AuthenticatedUser::new("alice", TenantDomain::from_static(TENANT)),
        Scope::from_space_delimited("openid"),
    )
}

fn unavailable() -> BoxError {
    io::Error::new(io::ErrorKind::Other, "service unavailable").into()
}

#[derive(Debug)]
enum ValidatorBehavior {
    Respond(TokenValidation),
    Fail,
}

#[derive(Debug)]
pub struct FixedValidator {
    behavior: ValidatorBehavior,
    requests: Mutex<Vec<TokenValidationRequest>>,
}

impl FixedValidator {
    fn with_behavior(behavior: ValidatorBehavior) -> Self {
        Self {
            behavior,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn valid(subject: &str) -> Self {
        Self::with_behavior(ValidatorBehavior::Respond(TokenValidation::valid(subject)))
    }

    pub fn invalid() -> Self {
        Self::with_behavior(ValidatorBehavior::Respond(TokenValidation::invalid()))
    }

    pub fn failing() -> Self {
        Self::with_behavior(ValidatorBehavior::Fail)
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<TokenValidationRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl TokenValidator for FixedValidator {
    fn validate(&self, request: &TokenValidationRequest) -> Result<TokenValidation, BoxError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.behavior {
            ValidatorBehavior::Respond(validation) => Ok(validation.clone()),
            ValidatorBehavior::Fail => Err(unavailable()),
        }
    }
}

#[derive(Debug)]
pub struct FixedStore {
    record: Option<AccessTokenRecord>,
    fail: bool,
}

impl FixedStore {
    pub fn empty() -> Self {
        Self {
            record: None,
            fail: false,
        }
    }

    pub fn with(record: AccessTokenRecord) -> Self {
        Self {
            record: Some(record),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            record: None,
            fail: true,
        }
    }
}

impl AccessTokenStore for FixedStore {
    fn find_access_token(
        &self,
        token: &TokenIdentifierRef,
    ) -> Result<Option<AccessTokenRecord>, BoxError> {
        if self.fail {
            return Err(unavailable());
        }

        Ok(self
            .record
            .as_ref()
            .filter(|record| record.token.as_str() == token.as_str())
            .cloned())
    }
}

#[derive(Debug)]
pub struct FixedResolver {
    tenants: HashMap<TenantDomain, OrganizationId>,
    depth: Option<i32>,
    resolutions: AtomicUsize,
    depth_queries: AtomicUsize,
}

impl FixedResolver {
    pub fn with_depth(depth: i32) -> Self {
        Self {
            tenants: HashMap::new(),
            depth: Some(depth),
            resolutions: AtomicUsize::new(0),
            depth_queries: AtomicUsize::new(0),
        }
    }

    pub fn with_depth_failure() -> Self {
        Self {
            depth: None,
            ..Self::with_depth(0)
        }
    }

    pub fn with_tenant(mut self, tenant: &str, organization: &str) -> Self {
        self.tenants
            .insert(TenantDomain::from(tenant), OrganizationId::from(organization));
        self
    }

    pub fn resolutions(&self) -> usize {
        self.resolutions.load(Ordering::SeqCst)
    }

    pub fn depth_queries(&self) -> usize {
        self.depth_queries.load(Ordering::SeqCst)
    }
}

impl OrganizationResolver for FixedResolver {
    fn resolve_organization_id(
        &self,
        tenant_domain: &TenantDomainRef,
    ) -> Result<OrganizationId, OrganizationManagementError> {
        self.resolutions.fetch_add(1, Ordering::SeqCst);
        self.tenants.get(tenant_domain).cloned().ok_or_else(|| {
            OrganizationManagementError::OrganizationNotFoundForTenant {
                tenant_domain: tenant_domain.to_owned(),
            }
        })
    }

    fn relative_depth_in_same_branch(
        &self,
        _first: &OrganizationIdRef,
        _second: &OrganizationIdRef,
    ) -> Result<i32, OrganizationManagementError> {
        self.depth_queries.fetch_add(1, Ordering::SeqCst);
        self.depth
            .ok_or_else(|| OrganizationManagementError::Backend(unavailable()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingIssuer {
    issued: Mutex<Vec<TokenRequestContext>>,
}

impl RecordingIssuer {
    pub fn issued(&self) -> Vec<TokenRequestContext> {
        self.issued.lock().unwrap().clone()
    }
}

impl TokenIssuer for RecordingIssuer {
    fn issue(&self, context: &TokenRequestContext) -> Result<AccessTokenResponse, BoxError> {
        self.issued.lock().unwrap().push(context.clone());
        Ok(AccessTokenResponse {
            access_token: TokenIdentifier::from_static("issued-token"),
            token_type: "Bearer".to_owned(),
            expires_in: 3600,
            refresh_token: None,
            scope: context.scope().clone(),
        })
    }
}
