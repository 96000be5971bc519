//! An in-memory access token store

use std::{collections::HashMap, sync::Arc};

use arc_swap::ArcSwap;

use crate::{
    collaborators::{
        AccessTokenStore, BoxError, TokenValidation, TokenValidationRequest, TokenValidator,
    },
    AccessTokenRecord, TokenIdentifier, TokenIdentifierRef,
};

const BEARER: &str = "bearer";

#[derive(Clone, Debug)]
struct StoredToken {
    record: AccessTokenRecord,
    revoked: bool,
}

/// Holds issued access tokens in memory
///
/// The store both validates presented bearer tokens and serves their
/// records. A token is valid from the moment it is inserted until it is
/// revoked.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    tokens: ArcSwap<HashMap<TokenIdentifier, StoredToken>>,
}

impl InMemoryTokenStore {
    /// Constructs an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a token record, replacing any record with the same token
    pub fn insert(&self, record: AccessTokenRecord) {
        self.tokens.rcu(|tokens| {
            let mut tokens = HashMap::clone(tokens);
            tokens.insert(
                record.token.clone(),
                StoredToken {
                    record: record.clone(),
                    revoked: false,
                },
            );
            tokens
        });
    }

    /// Revokes a token
    ///
    /// Returns `false` if the token is not known.
    pub fn revoke(&self, token: &TokenIdentifierRef) -> bool {
        let previous = self.tokens.rcu(|tokens| {
            let mut tokens = HashMap::clone(tokens);
            if let Some(stored) = tokens.get_mut(token) {
                stored.revoked = true;
            }
            tokens
        });

        let known = previous.contains_key(token);
        if known {
            tracing::debug!("access token revoked");
        }
        known
    }

    fn active(&self, token: &TokenIdentifierRef) -> Option<AccessTokenRecord> {
        let tokens: Arc<_> = self.tokens.load_full();
        tokens
            .get(token)
            .filter(|stored| !stored.revoked)
            .map(|stored| stored.record.clone())
    }
}

impl TokenValidator for InMemoryTokenStore {
    fn validate(&self, request: &TokenValidationRequest) -> Result<TokenValidation, BoxError> {
        if !request.token_type.eq_ignore_ascii_case(BEARER) {
            tracing::debug!(token_type = %request.token_type, "unsupported token type");
            return Ok(TokenValidation::invalid());
        }

        Ok(match self.active(&request.token) {
            Some(record) => TokenValidation::valid(record.authorized_user.subject),
            None => TokenValidation::invalid(),
        })
    }
}

impl AccessTokenStore for InMemoryTokenStore {
    fn find_access_token(
        &self,
        token: &TokenIdentifierRef,
    ) -> Result<Option<AccessTokenRecord>, BoxError> {
        Ok(self.active(token))
    }
}
