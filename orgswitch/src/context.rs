use crate::{AccessTokenRequest, AuthenticatedUser, Scope, TokenBinding};

/// Per-request state shared by the validation and issuance phases of a grant
///
/// The context is owned by the request being processed. Validation fills in
/// the principal, scope and any binding carried over from the presented
/// token; the issuer later reads them to mint the new token.
#[derive(Clone, Debug)]
pub struct TokenRequestContext {
    request: AccessTokenRequest,
    authorized_user: Option<AuthenticatedUser>,
    scope: Scope,
    token_binding: Option<TokenBinding>,
    carried_token_binding: Option<TokenBinding>,
}

impl TokenRequestContext {
    /// Constructs a fresh context for a token request
    pub fn new(request: AccessTokenRequest) -> Self {
        Self {
            request,
            authorized_user: None,
            scope: Scope::empty(),
            token_binding: None,
            carried_token_binding: None,
        }
    }

    /// The token request being processed
    #[inline]
    pub fn request(&self) -> &AccessTokenRequest {
        &self.request
    }

    /// The user the new token will be issued to
    #[inline]
    pub fn authorized_user(&self) -> Option<&AuthenticatedUser> {
        self.authorized_user.as_ref()
    }

    /// Sets the user the new token will be issued to
    #[inline]
    pub fn set_authorized_user(&mut self, user: AuthenticatedUser) {
        self.authorized_user = Some(user);
    }

    /// The scope the new token will be issued with
    #[inline]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Sets the scope the new token will be issued with
    #[inline]
    pub fn set_scope(&mut self, scope: Scope) {
        self.scope = scope;
    }

    /// The binding to attach to the new token
    #[inline]
    pub fn token_binding(&self) -> Option<&TokenBinding> {
        self.token_binding.as_ref()
    }

    /// Sets the binding to attach to the new token
    #[inline]
    pub fn set_token_binding(&mut self, binding: TokenBinding) {
        self.token_binding = Some(binding);
    }

    /// A binding taken from a previously issued token, awaiting issuance
    #[inline]
    pub fn carried_token_binding(&self) -> Option<&TokenBinding> {
        self.carried_token_binding.as_ref()
    }

    /// Holds a binding from a previously issued token until issuance
    #[inline]
    pub fn carry_token_binding(&mut self, binding: TokenBinding) {
        self.carried_token_binding = Some(binding);
    }

    /// Moves any carried binding onto the new token
    ///
    /// Returns `true` if a binding was carried.
    pub fn attach_carried_token_binding(&mut self) -> bool {
        match self.carried_token_binding.take() {
            Some(binding) => {
                self.token_binding = Some(binding);
                true
            }
            None => false,
        }
    }
}
