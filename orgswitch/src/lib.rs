//! An OAuth2 grant for switching organizations in a hierarchical,
//! multi-tenant authorization server
//!
//! A user holding an access token issued for one organization may exchange
//! it for a token scoped to another organization, provided that the two
//! organizations lie in the same branch of the organization hierarchy. The
//! user is not asked to re-authenticate. The new token keeps the user's
//! identity, records the organization the user belongs to as their resident
//! organization, and inherits any binding of the presented token.
//!
//! Handling is split into two phases. [`GrantHandler::validate_grant`]
//! checks the request and records the switched principal in the
//! [`TokenRequestContext`]; [`GrantHandler::issue`] then mints the new token
//! through the configured [`TokenIssuer`](collaborators::TokenIssuer).
//!
//! ```
//! use std::sync::Arc;
//!
//! use orgswitch::{
//!     AccessTokenRecord, AccessTokenRequest, AuthenticatedUser, ClientId, GrantRegistry,
//!     GrantType, InMemoryTokenStore, OrganizationDirectory, OrganizationHierarchy,
//!     OrganizationId, OrganizationSwitchConfig, OrganizationSwitchGrant, Scope, TenantDomain,
//!     TokenIdentifier, TokenRequestContext,
//! };
//! # use orgswitch::{collaborators::{BoxError, TokenIssuer}, AccessTokenResponse};
//! # #[derive(Debug)]
//! # struct Issuer;
//! # impl TokenIssuer for Issuer {
//! #     fn issue(&self, context: &TokenRequestContext) -> Result<AccessTokenResponse, BoxError> {
//! #         Ok(AccessTokenResponse {
//! #             access_token: TokenIdentifier::from_static("new-token"),
//! #             token_type: "Bearer".to_owned(),
//! #             expires_in: 3600,
//! #             refresh_token: None,
//! #             scope: context.scope().clone(),
//! #         })
//! #     }
//! # }
//!
//! let tokens = Arc::new(InMemoryTokenStore::new());
//! tokens.insert(AccessTokenRecord::new(
//!     TokenIdentifier::from_static("presented-token"),
//!     AuthenticatedUser::new("alice", TenantDomain::from_static("acme.com")),
//!     Scope::from_space_delimited("openid"),
//! ));
//!
//! let directory = Arc::new(OrganizationDirectory::new(
//!     OrganizationHierarchy::new()
//!         .with_root(OrganizationId::from_static("acme"), TenantDomain::from_static("acme.com"))
//!         .with_child(
//!             OrganizationId::from_static("acme"),
//!             OrganizationId::from_static("acme-retail"),
//!             TenantDomain::from_static("retail.acme.com"),
//!         ),
//! ));
//!
//! let grant = OrganizationSwitchGrant::new(
//!     OrganizationSwitchConfig::default(),
//!     tokens.clone(),
//!     tokens,
//!     directory,
//!     Arc::new(Issuer),
//! );
//! let registry = GrantRegistry::new().with_grant(grant);
//!
//! let request = AccessTokenRequest::new(
//!     GrantType::from_static("organization_switch"),
//!     ClientId::from_static("console"),
//!     Scope::from_space_delimited("openid profile"),
//! )
//! .with_parameter("token", "presented-token")
//! .with_parameter("switching_organization", "acme-retail");
//!
//! let mut context = TokenRequestContext::new(request);
//! let response = registry.handle(&mut context).expect("switch is allowed");
//!
//! let user = context.authorized_user().expect("user is switched");
//! assert_eq!(user.accessing_organization.as_deref().map(|o| o.as_str()), Some("acme-retail"));
//! assert_eq!(user.user_resident_organization.as_deref().map(|o| o.as_str()), Some("acme"));
//! assert_eq!(response.scope, Scope::from_space_delimited("openid profile"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    unused_import_braces,
    unused_imports,
    unused_qualifications
)]
#![deny(
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unused_must_use
)]

mod braids;
pub mod collaborators;
mod config;
mod context;
mod directory;
mod error;
mod grant;
mod memory;
mod policy;
mod registry;
mod request;
mod response;
pub mod scope;
mod token;
mod user;

#[cfg(test)]
pub(crate) mod test;

pub use braids::*;
pub use collaborators::OrganizationManagementError;
pub use config::OrganizationSwitchConfig;
pub use context::TokenRequestContext;
pub use directory::{OrganizationDirectory, OrganizationHierarchy};
pub use error::GrantError;
pub use grant::OrganizationSwitchGrant;
pub use memory::InMemoryTokenStore;
pub use orgswitch_traits::{GrantHandler, Policy};
pub use policy::{OrganizationSwitch, SameBranchPolicy, SwitchDenial};
pub use registry::{GrantRegistry, RegisteredGrant};
pub use request::{
    extract_parameter, AccessTokenRequest, OrganizationSwitchRequest, RequestParameter,
};
pub use response::{AccessTokenResponse, ErrorResponse};
pub use scope::{Scope, ScopeToken};
pub use token::{AccessTokenRecord, TokenBinding};
pub use user::{AuthenticatedUser, SwitchedPrincipal};
